// --- File: config.rs ---
use crate::attraction::AttractionMatrix;
use crate::constants::*;
use crate::error::{PhysarumError, Result};
use crate::grid::Interpolation;
use crate::motion::TurnRule;
use crate::particle::{InitPattern, Particle};
use crate::utils::{degrees, radians};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;

/// Motion and trail parameters of one species. Angles are in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesConfig {
    pub sensor_distance: f32,
    pub sensor_angle: f32,
    pub rotation_angle: f32,
    pub step_distance: f32,
    pub deposition_amount: f32,
    pub decay_factor: f32, // multiplied into the trail once per step, keep in [0, 1]
}

impl Default for SpeciesConfig {
    fn default() -> Self {
        Self {
            sensor_distance: 9.0,
            sensor_angle: radians(22.5),
            rotation_angle: radians(45.0),
            step_distance: 1.0,
            deposition_amount: 5.0,
            decay_factor: 0.9,
        }
    }
}

impl SpeciesConfig {
    /// Draws a species from the ranges in `constants.rs`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut uniform = |(lo, hi): (f32, f32)| rng.gen_range(lo..hi);
        Self {
            sensor_angle: radians(uniform(RANDOM_SENSOR_ANGLE_DEG)),
            sensor_distance: uniform(RANDOM_SENSOR_DISTANCE),
            rotation_angle: radians(uniform(RANDOM_ROTATION_ANGLE_DEG)),
            step_distance: uniform(RANDOM_STEP_DISTANCE),
            deposition_amount: uniform(RANDOM_DEPOSITION_AMOUNT),
            decay_factor: uniform(RANDOM_DECAY_FACTOR),
        }
    }

    // Values that are accepted but usually blow up or freeze the simulation
    fn warn_if_unstable(&self, index: usize) {
        if !(0.0..=1.0).contains(&self.decay_factor) {
            log::warn!(
                "Species {} decay factor {} is outside [0, 1]; trails may grow without bound",
                index,
                self.decay_factor
            );
        }
        if !(0.0..=PI).contains(&self.rotation_angle) {
            log::warn!(
                "Species {} rotation angle {:.3} rad is outside [0, π]",
                index,
                self.rotation_angle
            );
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub width: usize,
    pub height: usize,
    // Rounded up to a multiple of the species count at construction
    pub particles: usize,
    pub blur_radius: usize,
    pub blur_passes: usize,
    pub zoom_factor: f32,
    pub species: Vec<SpeciesConfig>,
    pub attraction: AttractionMatrix,
    pub pattern: InitPattern,
    pub seed: u64,
    // Move-phase partition count; `None` uses rayon's thread count
    pub workers: Option<usize>,
    pub trig_table_size: usize,
    pub turn_rule: TurnRule,
    pub interpolation: Interpolation,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            particles: DEFAULT_PARTICLES,
            blur_radius: DEFAULT_BLUR_RADIUS,
            blur_passes: DEFAULT_BLUR_PASSES,
            zoom_factor: DEFAULT_ZOOM_FACTOR,
            species: vec![SpeciesConfig::default()],
            attraction: AttractionMatrix::identity(1),
            pattern: InitPattern::default(),
            seed: 0,
            workers: None,
            trig_table_size: DEFAULT_TRIG_TABLE_SIZE,
            turn_rule: TurnRule::default(),
            interpolation: Interpolation::default(),
        }
    }
}

impl SimulationConfig {
    /// A default-sized run with 2 to 5 random species, a random attraction
    /// matrix and a random init pattern, all drawn from `seed`.
    pub fn random(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let count = rng.gen_range(RANDOM_SPECIES_COUNT.0..RANDOM_SPECIES_COUNT.1);
        let species = (0..count).map(|_| SpeciesConfig::random(&mut rng)).collect();
        let attraction = AttractionMatrix::random(count, &mut rng);
        let pattern = InitPattern::random(&mut rng);
        Self {
            species,
            attraction,
            pattern,
            seed,
            ..Self::default()
        }
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    /// Particles actually created: the request rounded up so every species
    /// gets the same share.
    pub fn particles_per_species(&self) -> usize {
        self.particles.div_ceil(self.species.len().max(1))
    }

    /// Checks everything `Simulation::new` relies on.
    pub fn validate(&self) -> Result<()> {
        let cells = self
            .width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(std::mem::size_of::<f32>()));
        let fits = cells.is_some_and(|b| b <= isize::MAX as usize);
        if self.width == 0 || self.height == 0 || !fits {
            return Err(PhysarumError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.species.is_empty() {
            return Err(PhysarumError::NoSpecies);
        }
        if self.particles == 0 {
            return Err(PhysarumError::NoParticles);
        }
        // The particle buffer has to be allocatable, not just countable
        let bytes = self
            .particles_per_species()
            .checked_mul(self.species.len())
            .and_then(|n| n.checked_mul(std::mem::size_of::<Particle>()));
        if !bytes.is_some_and(|b| b <= isize::MAX as usize) {
            return Err(PhysarumError::TooManyParticles(self.particles));
        }
        if self.attraction.len() != self.species.len() {
            return Err(PhysarumError::AttractionMismatch {
                expected: self.species.len(),
                actual: self.attraction.len(),
            });
        }
        if self.blur_passes == 0 {
            return Err(PhysarumError::NoBlurPasses);
        }
        if !(self.zoom_factor.is_finite() && self.zoom_factor > 0.0) {
            return Err(PhysarumError::InvalidZoom(self.zoom_factor));
        }
        // Positions wrap by a single hop, so one step must stay shorter than the grid
        let limit = self.width.min(self.height) as f32;
        for (i, species) in self.species.iter().enumerate() {
            let step = species.step_distance * self.zoom_factor;
            if !(step.abs() < limit) {
                return Err(PhysarumError::StepTooLong {
                    species: i,
                    step,
                    limit,
                });
            }
        }
        if !self.trig_table_size.is_power_of_two() {
            return Err(PhysarumError::TrigTableSize(self.trig_table_size));
        }
        if self.workers == Some(0) {
            return Err(PhysarumError::NoWorkers);
        }
        for (i, species) in self.species.iter().enumerate() {
            species.warn_if_unstable(i);
        }
        Ok(())
    }
}

/// Logs one line per species plus the attraction matrix.
pub fn log_species_table(species: &[SpeciesConfig], attraction: &AttractionMatrix) {
    log::info!("********************");
    for (i, s) in species.iter().enumerate() {
        log::info!(
            "species {}: sensor {:.1}° @ {:.2}, rotate {:.1}°, step {:.2}, deposit {:.2}, decay {:.3}",
            i,
            degrees(s.sensor_angle),
            s.sensor_distance,
            degrees(s.rotation_angle),
            s.step_distance,
            s.deposition_amount,
            s.decay_factor
        );
    }
    for i in 0..attraction.len() {
        let row: Vec<String> = attraction
            .row(i)
            .iter()
            .map(|w| format!("{:+.2}", w))
            .collect();
        log::info!("attraction[{}] = [{}]", i, row.join(", "));
    }
    log::info!("********************");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> SimulationConfig {
        SimulationConfig {
            width: 16,
            height: 16,
            particles: 10,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SimulationConfig::default().validate(), Ok(()));
        assert_eq!(small().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_each_bad_field() {
        let mut c = small();
        c.width = 0;
        assert_eq!(
            c.validate(),
            Err(PhysarumError::InvalidDimensions { width: 0, height: 16 })
        );

        let mut c = small();
        c.species.clear();
        assert_eq!(c.validate(), Err(PhysarumError::NoSpecies));

        let mut c = small();
        c.particles = 0;
        assert_eq!(c.validate(), Err(PhysarumError::NoParticles));

        let mut c = small();
        c.attraction = AttractionMatrix::identity(2);
        assert_eq!(
            c.validate(),
            Err(PhysarumError::AttractionMismatch { expected: 1, actual: 2 })
        );

        let mut c = small();
        c.blur_passes = 0;
        assert_eq!(c.validate(), Err(PhysarumError::NoBlurPasses));

        let mut c = small();
        c.zoom_factor = 0.0;
        assert_eq!(c.validate(), Err(PhysarumError::InvalidZoom(0.0)));

        let mut c = small();
        c.trig_table_size = 3000;
        assert_eq!(c.validate(), Err(PhysarumError::TrigTableSize(3000)));

        let mut c = small();
        c.workers = Some(0);
        assert_eq!(c.validate(), Err(PhysarumError::NoWorkers));

        let mut c = small();
        c.width = 4;
        c.height = 4;
        c.species[0].step_distance = 10.0;
        assert_eq!(
            c.validate(),
            Err(PhysarumError::StepTooLong {
                species: 0,
                step: 10.0,
                limit: 4.0
            })
        );

        // zoom counts toward the step length
        let mut c = small();
        c.species[0].step_distance = 2.0;
        c.zoom_factor = 8.0;
        assert_eq!(
            c.validate(),
            Err(PhysarumError::StepTooLong {
                species: 0,
                step: 16.0,
                limit: 16.0
            })
        );

        let mut c = small();
        c.species = vec![SpeciesConfig::default(); 3];
        c.attraction = AttractionMatrix::identity(3);
        c.particles = usize::MAX;
        assert_eq!(
            c.validate(),
            Err(PhysarumError::TooManyParticles(usize::MAX))
        );
        c.species.truncate(2);
        c.attraction = AttractionMatrix::identity(2);
        assert_eq!(
            c.validate(),
            Err(PhysarumError::TooManyParticles(usize::MAX))
        );

        let mut c = small();
        c.width = usize::MAX;
        c.height = 2;
        assert_eq!(
            c.validate(),
            Err(PhysarumError::InvalidDimensions {
                width: usize::MAX,
                height: 2
            })
        );
    }

    #[test]
    fn particle_count_rounds_up_per_species() {
        let mut c = small();
        c.species = vec![SpeciesConfig::default(); 3];
        c.attraction = AttractionMatrix::identity(3);
        c.particles = 10;
        assert_eq!(c.particles_per_species(), 4);
        c.particles = 9;
        assert_eq!(c.particles_per_species(), 3);
    }

    #[test]
    fn random_config_is_valid_and_reproducible() {
        for seed in 0..20 {
            let a = SimulationConfig::random(seed);
            let b = SimulationConfig::random(seed);
            assert_eq!(a, b);
            assert!((2..6).contains(&a.species_count()));
            assert_eq!(a.attraction.len(), a.species_count());
            assert_eq!(a.validate(), Ok(()));
            for s in &a.species {
                assert!((0.1..0.5).contains(&s.decay_factor));
                assert!((0.0..=radians(120.0)).contains(&s.sensor_angle));
            }
        }
    }
}

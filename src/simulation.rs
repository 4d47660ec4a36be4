// --- File: simulation.rs ---
use crate::attraction::AttractionMatrix;
use crate::config::{SimulationConfig, SpeciesConfig, log_species_table};
use crate::error::Result;
use crate::grid::{Interpolation, PheromoneGrid};
use crate::motion::{MotionContext, MotionParams, TurnRule};
use crate::particle::{InitPattern, Particle};
use crate::trig::TrigTable;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use std::time::Instant;

pub type SimRng = StdRng;

// SplitMix64 finalizer
#[inline]
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

// Move worker `worker` in step `iteration` always gets the same stream for a
// given run seed, whichever thread ends up running it. Each input goes through
// its own mixing round so no (iteration, worker) pairs alias.
#[inline]
fn worker_seed(seed: u64, iteration: u64, worker: usize) -> u64 {
    mix(mix(mix(seed) ^ iteration) ^ worker as u64)
}

#[inline]
fn reset_seed(seed: u64, generation: u64) -> u64 {
    seed ^ generation.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Multi-species trail simulation on a `width` x `height` torus.
///
/// A value of this type is always ready to step: construction validates the
/// whole configuration and places the particles.
pub struct Simulation {
    width: usize,
    height: usize,
    blur_radius: usize,
    blur_passes: usize,
    zoom_factor: f32,
    species: Vec<SpeciesConfig>,
    motion: Vec<MotionParams>, // species configs with zoom applied
    attraction: AttractionMatrix,
    grids: Vec<PheromoneGrid>,
    // Grouped by species: species s owns [s * per_species, (s + 1) * per_species)
    particles: Vec<Particle>,
    per_species: usize,
    iteration: u64,
    pattern: InitPattern,
    seed: u64,
    generation: u64, // bumped on every reset so each reset draws a fresh layout
    workers: usize,
    trig: TrigTable,
    turn_rule: TurnRule,
    interpolation: Interpolation,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let trig = TrigTable::new(config.trig_table_size)?;
        let workers = config.workers.unwrap_or_else(rayon::current_num_threads);
        let per_species = config.particles_per_species();
        let species_count = config.species.len();

        log::info!(
            "Creating {}x{} simulation: {} species x {} particles, blur r={} x{}, zoom {}, pattern {}, seed {}, {} move workers",
            config.width,
            config.height,
            species_count,
            per_species,
            config.blur_radius,
            config.blur_passes,
            config.zoom_factor,
            config.pattern,
            config.seed,
            workers
        );
        log_species_table(&config.species, &config.attraction);

        let motion = config
            .species
            .iter()
            .map(|s| MotionParams::new(s, config.zoom_factor))
            .collect();
        let grids = (0..species_count)
            .map(|_| PheromoneGrid::new(config.width, config.height))
            .collect();

        let mut sim = Self {
            width: config.width,
            height: config.height,
            blur_radius: config.blur_radius,
            blur_passes: config.blur_passes,
            zoom_factor: config.zoom_factor,
            species: config.species,
            motion,
            attraction: config.attraction,
            grids,
            particles: Vec::with_capacity(per_species * species_count),
            per_species,
            iteration: 0,
            pattern: config.pattern,
            seed: config.seed,
            generation: 0,
            workers,
            trig,
            turn_rule: config.turn_rule,
            interpolation: config.interpolation,
        };
        sim.initialize_particles();
        Ok(sim)
    }

    fn initialize_particles(&mut self) {
        let mut rng = SimRng::seed_from_u64(reset_seed(self.seed, self.generation));
        let (w, h) = (self.width as f32, self.height as f32);
        self.particles.clear();
        for species in 0..self.species.len() {
            for _ in 0..self.per_species {
                self.particles
                    .push(self.pattern.spawn(&mut rng, w, h, species as u32));
            }
        }
    }

    /// Places every particle again with the current pattern and zeroes the
    /// iteration counter. Trails and configuration are left untouched.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.iteration = 0;
        self.initialize_particles();
        log::debug!(
            "Reset {} particles with pattern {} (generation {})",
            self.particles.len(),
            self.pattern,
            self.generation
        );
    }

    /// Changes the pattern used by the next `reset`.
    pub fn set_pattern(&mut self, pattern: InitPattern) {
        self.pattern = pattern;
    }

    /// Advances one iteration: combine, move, then deposit/blur/decay.
    ///
    /// Each phase is a rayon fork/join, so a phase only starts once the
    /// previous one has fully finished. A panic in any task propagates out of
    /// this call.
    pub fn step(&mut self) {
        let started = Instant::now();
        self.combine_fields();
        let combined = started.elapsed();
        self.move_particles();
        let moved = started.elapsed();
        self.deposit_and_diffuse();
        self.iteration += 1;
        log::debug!(
            "Step {}: combine {:?}, move {:?}, deposit+blur {:?}",
            self.iteration,
            combined,
            moved - combined,
            started.elapsed() - moved
        );
    }

    // --- Phase 1: temp[i] = sum_j attraction[i][j] * data[j] ---
    fn combine_fields(&mut self) {
        let mut fields: Vec<Vec<f32>> = self
            .grids
            .iter_mut()
            .map(PheromoneGrid::take_temp)
            .collect();
        let grids = &self.grids;
        let attraction = &self.attraction;
        fields
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, field)| attraction.combine_into(i, grids, field));
        for (grid, field) in self.grids.iter_mut().zip(fields) {
            grid.restore_temp(field);
        }
    }

    // --- Phase 2: fixed, disjoint particle ranges, one private rng each ---
    fn move_particles(&mut self) {
        let ctx = MotionContext {
            trig: &self.trig,
            turn_rule: self.turn_rule,
            interpolation: self.interpolation,
            width: self.width as f32,
            height: self.height as f32,
        };
        let grids = &self.grids;
        let motion = &self.motion;
        let (seed, iteration) = (self.seed, self.iteration);
        let batch = self.particles.len().div_ceil(self.workers).max(1);

        self.particles
            .par_chunks_mut(batch)
            .enumerate()
            .for_each(|(worker, chunk)| {
                let mut rng = SimRng::seed_from_u64(worker_seed(seed, iteration, worker));
                for p in chunk {
                    let s = p.species as usize;
                    ctx.move_particle(&mut rng, p, &grids[s], &motion[s]);
                }
            });
    }

    // --- Phase 3: one task per species owns its grid ---
    fn deposit_and_diffuse(&mut self) {
        let particles = &self.particles;
        let species = &self.species;
        let per_species = self.per_species;
        let (radius, passes, mode) = (self.blur_radius, self.blur_passes, self.interpolation);

        self.grids.par_iter_mut().enumerate().for_each(|(s, grid)| {
            let config = &species[s];
            for p in &particles[s * per_species..(s + 1) * per_species] {
                grid.deposit_with(mode, p.position.x, p.position.y, config.deposition_amount);
            }
            grid.box_blur_and_decay(radius, passes, config.decay_factor);
        });
    }

    // --- Read accessors ---

    /// Copies every species' trail, for rendering or export.
    pub fn data(&self) -> Vec<Vec<f32>> {
        self.grids.iter().map(|g| g.data().to_vec()).collect()
    }

    pub fn grids(&self) -> &[PheromoneGrid] {
        &self.grids
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn species(&self) -> &[SpeciesConfig] {
        &self.species
    }

    pub fn attraction(&self) -> &AttractionMatrix {
        &self.attraction
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn zoom_factor(&self) -> f32 {
        self.zoom_factor
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn pattern(&self) -> InitPattern {
        self.pattern
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Sum of every species' trail.
    pub fn total_mass(&self) -> f64 {
        self.grids.iter().map(PheromoneGrid::total_mass).sum()
    }
}

// --- File: particle.rs ---
use crate::constants::CIRCLE_RADIUS_FRACTION;
use crate::error::PhysarumError;
use crate::utils::wrap;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub heading: f32, // radians, [0, 2π)
    pub species: u32,
}

/// Starting layout used when particles are (re)created.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum InitPattern {
    Random,
    Point,
    #[default]
    RandomCircleRandom,
    RandomCircleOut,
    RandomCircleIn,
    RandomCircleCw,
    RandomCircleQuads,
}

impl InitPattern {
    pub const ALL: [InitPattern; 7] = [
        InitPattern::Random,
        InitPattern::Point,
        InitPattern::RandomCircleRandom,
        InitPattern::RandomCircleOut,
        InitPattern::RandomCircleIn,
        InitPattern::RandomCircleCw,
        InitPattern::RandomCircleQuads,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            InitPattern::Random => "random",
            InitPattern::Point => "point",
            InitPattern::RandomCircleRandom => "random_circle_random",
            InitPattern::RandomCircleOut => "random_circle_out",
            InitPattern::RandomCircleIn => "random_circle_in",
            InitPattern::RandomCircleCw => "random_circle_cw",
            InitPattern::RandomCircleQuads => "random_circle_quads",
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Creates one particle of `species` on a `width` x `height` plane.
    pub fn spawn<R: Rng + ?Sized>(
        self,
        rng: &mut R,
        width: f32,
        height: f32,
        species: u32,
    ) -> Particle {
        let center = Vec2::new(width / 2.0, height / 2.0);
        let (position, heading) = match self {
            InitPattern::Random => (
                Vec2::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height)),
                random_heading(rng),
            ),
            InitPattern::Point => (center, random_heading(rng)),
            InitPattern::RandomCircleRandom => {
                let (theta, r) = disc_sample(rng, width, height);
                // sin/cos swapped on purpose: same disc, mirrored about the diagonal
                let offset = Vec2::new(theta.sin(), theta.cos()) * r;
                (center + offset, random_heading(rng))
            }
            InitPattern::RandomCircleOut => {
                let (theta, r) = disc_sample(rng, width, height);
                (center + Vec2::from_angle(theta) * r, theta)
            }
            InitPattern::RandomCircleIn => {
                let (theta, r) = disc_sample(rng, width, height);
                (center + Vec2::from_angle(theta) * r, wrap(theta + PI, TAU))
            }
            InitPattern::RandomCircleCw => {
                let (theta, r) = disc_sample(rng, width, height);
                (
                    center + Vec2::from_angle(theta) * r,
                    wrap(theta + FRAC_PI_2, TAU),
                )
            }
            InitPattern::RandomCircleQuads => {
                let (theta, r) = disc_sample(rng, width, height);
                let offset = Vec2::new(theta.sin(), theta.cos()) * r;
                (center + offset, theta)
            }
        };
        Particle {
            position: Vec2::new(wrap(position.x, width), wrap(position.y, height)),
            heading,
            species,
        }
    }
}

fn random_heading<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen_range(0.0..TAU)
}

// Uniform point in the init disc: angle and radius (sqrt keeps area density flat)
fn disc_sample<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> (f32, f32) {
    let theta = random_heading(rng);
    let r = CIRCLE_RADIUS_FRACTION * width.min(height) * rng.gen_range(0.0f32..1.0).sqrt();
    (theta, r)
}

impl fmt::Display for InitPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for InitPattern {
    type Err = PhysarumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.tag() == s)
            .ok_or_else(|| PhysarumError::UnknownPattern(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn tags_round_trip_through_from_str() {
        for pattern in InitPattern::ALL {
            assert_eq!(pattern.to_string().parse::<InitPattern>(), Ok(pattern));
        }
        assert_eq!(
            "spiral".parse::<InitPattern>(),
            Err(PhysarumError::UnknownPattern("spiral".into()))
        );
    }

    #[test]
    fn every_pattern_stays_on_the_plane() {
        let mut rng = StdRng::seed_from_u64(11);
        let (w, h) = (200.0, 120.0);
        for pattern in InitPattern::ALL {
            for _ in 0..2_000 {
                let p = pattern.spawn(&mut rng, w, h, 3);
                assert!((0.0..w).contains(&p.position.x), "{pattern}: {p:?}");
                assert!((0.0..h).contains(&p.position.y), "{pattern}: {p:?}");
                assert!((0.0..TAU).contains(&p.heading), "{pattern}: {p:?}");
                assert_eq!(p.species, 3);
            }
        }
    }

    #[test]
    fn circle_patterns_stay_inside_the_disc() {
        let mut rng = StdRng::seed_from_u64(5);
        let (w, h) = (300.0, 100.0);
        let center = Vec2::new(w / 2.0, h / 2.0);
        let max_r = CIRCLE_RADIUS_FRACTION * 100.0 + 1e-3;
        for pattern in &InitPattern::ALL[2..] {
            for _ in 0..1_000 {
                let p = pattern.spawn(&mut rng, w, h, 0);
                assert!(p.position.distance(center) <= max_r, "{pattern}: {p:?}");
            }
        }
    }

    #[test]
    fn point_pattern_starts_at_the_center() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = InitPattern::Point.spawn(&mut rng, 64.0, 32.0, 0);
        assert_eq!(p.position, Vec2::new(32.0, 16.0));
    }

    #[test]
    fn outward_and_inward_headings_follow_the_offset() {
        let mut rng = StdRng::seed_from_u64(9);
        let center = Vec2::new(50.0, 50.0);
        for _ in 0..500 {
            let out = InitPattern::RandomCircleOut.spawn(&mut rng, 100.0, 100.0, 0);
            let offset = out.position - center;
            if offset.length() > 1.0 {
                let dir = Vec2::from_angle(out.heading);
                assert!(dir.dot(offset.normalize()) > 0.99);
            }
            let inward = InitPattern::RandomCircleIn.spawn(&mut rng, 100.0, 100.0, 0);
            let offset = inward.position - center;
            if offset.length() > 1.0 {
                let dir = Vec2::from_angle(inward.heading);
                assert!(dir.dot(offset.normalize()) < -0.99);
            }
            let cw = InitPattern::RandomCircleCw.spawn(&mut rng, 100.0, 100.0, 0);
            let offset = cw.position - center;
            if offset.length() > 1.0 {
                let dir = Vec2::from_angle(cw.heading);
                assert!(dir.dot(offset.normalize()).abs() < 0.01);
            }
        }
    }
}

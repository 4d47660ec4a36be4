// --- File: motion.rs ---
// --- Particle sensing and motion ---

use crate::config::SpeciesConfig;
use crate::grid::{Interpolation, PheromoneGrid};
use crate::particle::Particle;
use crate::trig::TrigTable;
use crate::utils::wrap;
use rand::Rng;
use std::f32::consts::TAU;

/// How a particle turns given its centre, left and right sensor readings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TurnRule {
    /// Straight if the centre wins, random if the centre loses to both sides,
    /// otherwise toward the stronger side.
    #[default]
    Direction,
    /// Randomly picks between the two strongest readings, weighted by the gaps
    /// between the sorted readings.
    Weighted,
}

impl TurnRule {
    #[inline]
    pub fn turn<R: Rng + ?Sized>(self, rng: &mut R, c: f32, l: f32, r: f32) -> f32 {
        match self {
            TurnRule::Direction => direction(rng, c, l, r),
            TurnRule::Weighted => weighted_direction(rng, c, l, r),
        }
    }
}

/// Returns 0 (straight), -1 (toward the left sensor) or +1 (toward the right sensor).
#[inline]
pub fn direction<R: Rng + ?Sized>(rng: &mut R, c: f32, l: f32, r: f32) -> f32 {
    if c > l && c > r {
        0.0
    } else if c < l && c < r {
        if rng.gen_bool(0.5) { 1.0 } else { -1.0 }
    } else if l < r {
        1.0
    } else if r < l {
        -1.0
    } else {
        0.0
    }
}

pub fn weighted_direction<R: Rng + ?Sized>(rng: &mut R, c: f32, l: f32, r: f32) -> f32 {
    let mut readings = [(c, 0.0f32), (l, -1.0), (r, 1.0)];
    readings.sort_by(|a, b| a.0.total_cmp(&b.0));
    let [(low, _), (mid, mid_dir), (high, high_dir)] = readings;
    let a = mid - low;
    let b = high - mid;
    if a + b > 0.0 && rng.gen_range(0.0..a + b) < a {
        mid_dir
    } else {
        high_dir
    }
}

/// Per-species motion parameters with the zoom factor already applied.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MotionParams {
    pub sensor_distance: f32,
    pub sensor_angle: f32,
    pub rotation_angle: f32,
    pub step_distance: f32,
}

impl MotionParams {
    pub fn new(config: &SpeciesConfig, zoom_factor: f32) -> Self {
        Self {
            sensor_distance: config.sensor_distance * zoom_factor,
            sensor_angle: config.sensor_angle,
            rotation_angle: config.rotation_angle,
            step_distance: config.step_distance * zoom_factor,
        }
    }
}

/// Everything a move worker reads but never writes.
pub struct MotionContext<'a> {
    pub trig: &'a TrigTable,
    pub turn_rule: TurnRule,
    pub interpolation: Interpolation,
    pub width: f32,
    pub height: f32,
}

impl MotionContext<'_> {
    #[inline]
    fn sense(&self, field: &PheromoneGrid, p: &Particle, angle: f32, distance: f32) -> f32 {
        let (s, c) = self.trig.sin_cos(angle);
        field.sample_with(
            self.interpolation,
            p.position.x + c * distance,
            p.position.y + s * distance,
        )
    }

    /// Senses `field`, turns, and takes one step.
    #[inline]
    pub fn move_particle<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        p: &mut Particle,
        field: &PheromoneGrid,
        params: &MotionParams,
    ) {
        let d = params.sensor_distance;
        let center = self.sense(field, p, p.heading, d);
        let left = self.sense(field, p, p.heading - params.sensor_angle, d);
        let right = self.sense(field, p, p.heading + params.sensor_angle, d);

        let da = params.rotation_angle * self.turn_rule.turn(rng, center, left, right);
        p.heading = wrap(p.heading + da, TAU);

        let (s, c) = self.trig.sin_cos(p.heading);
        p.position.x = wrap(p.position.x + c * params.step_distance, self.width);
        p.position.y = wrap(p.position.y + s * params.step_distance, self.height);
    }
}

// --- File: trig.rs ---
// --- Fast sine/cosine lookup ---
//
// The motion rule evaluates six trig calls per particle per step, so the hot
// loop reads from a precomputed table instead of calling into libm.

use crate::constants::DEFAULT_TRIG_TABLE_SIZE;
use crate::error::{PhysarumError, Result};
use std::f64::consts::TAU;

#[derive(Debug, Clone)]
pub struct TrigTable {
    sin: Box<[f32]>,
    cos: Box<[f32]>,
    size: usize,
    mask: usize,
    // Samples per radian, kept in f64 so large angles still land on the right slot
    factor: f64,
}

impl TrigTable {
    /// Builds a table with `size` samples over one full turn.
    ///
    /// `size` must be a power of two so the index can be wrapped with a mask.
    pub fn new(size: usize) -> Result<Self> {
        if !size.is_power_of_two() {
            return Err(PhysarumError::TrigTableSize(size));
        }
        Ok(Self::build(size))
    }

    fn build(size: usize) -> Self {
        let (sin, cos): (Vec<f32>, Vec<f32>) = (0..size)
            .map(|i| {
                let angle = i as f64 / size as f64 * TAU;
                (angle.sin() as f32, angle.cos() as f32)
            })
            .unzip();
        Self {
            sin: sin.into_boxed_slice(),
            cos: cos.into_boxed_slice(),
            size,
            mask: size - 1,
            factor: size as f64 / TAU,
        }
    }

    #[inline]
    fn index(&self, angle: f32) -> usize {
        // Adding one full table keeps small negative angles positive; anything
        // further out still wraps correctly through the two's-complement mask.
        let slot = (f64::from(angle) * self.factor).floor() as i64 + self.size as i64;
        slot as usize & self.mask
    }

    #[inline]
    pub fn sin(&self, angle: f32) -> f32 {
        self.sin[self.index(angle)]
    }

    #[inline]
    pub fn cos(&self, angle: f32) -> f32 {
        self.cos[self.index(angle)]
    }

    /// Returns `(sin, cos)` from a single index computation.
    #[inline]
    pub fn sin_cos(&self, angle: f32) -> (f32, f32) {
        let i = self.index(angle);
        (self.sin[i], self.cos[i])
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl Default for TrigTable {
    fn default() -> Self {
        Self::build(DEFAULT_TRIG_TABLE_SIZE)
    }
}

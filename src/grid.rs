// --- File: grid.rs ---
// --- Per-species pheromone field ---

use crate::blur::box_blur;
use crate::utils::wrap_index;

/// How continuous coordinates map onto grid cells for deposit and sample.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Floor both coordinates and use that single cell.
    #[default]
    Nearest,
    /// Spread over / blend from the 2x2 block of cells around the point.
    Bilinear,
}

/// Toroidal scalar field with two separately owned buffers.
///
/// * `data` holds the trail. Written by deposit and blur, read by the
///   combine phase of the *next* step.
/// * `temp` holds the combined sensing field between the combine and move
///   phases, then becomes blur scratch. Its contents after a blur are
///   unspecified.
#[derive(Debug, Clone)]
pub struct PheromoneGrid {
    width: usize,
    height: usize,
    data: Vec<f32>,
    temp: Vec<f32>,
}

impl PheromoneGrid {
    pub fn new(width: usize, height: usize) -> Self {
        let len = width * height;
        Self {
            width,
            height,
            data: vec![0.0; len],
            temp: vec![0.0; len],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn temp(&self) -> &[f32] {
        &self.temp
    }

    pub fn total_mass(&self) -> f64 {
        self.data.iter().map(|&v| f64::from(v)).sum()
    }

    #[inline]
    fn cell(&self, x: f32, y: f32) -> usize {
        let ix = wrap_index(x.floor() as i64, self.width);
        let iy = wrap_index(y.floor() as i64, self.height);
        iy * self.width + ix
    }

    // Wrapped 2x2 block around (x, y) with the fractional offsets inside it.
    #[inline]
    fn bilinear_cells(&self, x: f32, y: f32) -> ([usize; 4], f32, f32) {
        let fx = x.floor();
        let fy = y.floor();
        let x0 = wrap_index(fx as i64, self.width);
        let y0 = wrap_index(fy as i64, self.height);
        let x1 = if x0 + 1 == self.width { 0 } else { x0 + 1 };
        let y1 = if y0 + 1 == self.height { 0 } else { y0 + 1 };
        let w = self.width;
        (
            [y0 * w + x0, y0 * w + x1, y1 * w + x0, y1 * w + x1],
            x - fx,
            y - fy,
        )
    }

    /// Adds `amount` to the trail at the cell containing (x, y).
    #[inline]
    pub fn deposit(&mut self, x: f32, y: f32, amount: f32) {
        let i = self.cell(x, y);
        self.data[i] += amount;
    }

    /// Reads the combined field at the cell containing (x, y).
    #[inline]
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        self.temp[self.cell(x, y)]
    }

    pub fn deposit_with(&mut self, mode: Interpolation, x: f32, y: f32, amount: f32) {
        match mode {
            Interpolation::Nearest => self.deposit(x, y, amount),
            Interpolation::Bilinear => {
                let ([c00, c10, c01, c11], tx, ty) = self.bilinear_cells(x, y);
                self.data[c00] += amount * (1.0 - tx) * (1.0 - ty);
                self.data[c10] += amount * tx * (1.0 - ty);
                self.data[c01] += amount * (1.0 - tx) * ty;
                self.data[c11] += amount * tx * ty;
            }
        }
    }

    pub fn sample_with(&self, mode: Interpolation, x: f32, y: f32) -> f32 {
        match mode {
            Interpolation::Nearest => self.sample(x, y),
            Interpolation::Bilinear => {
                let ([c00, c10, c01, c11], tx, ty) = self.bilinear_cells(x, y);
                let top = self.temp[c00] * (1.0 - tx) + self.temp[c10] * tx;
                let bottom = self.temp[c01] * (1.0 - tx) + self.temp[c11] * tx;
                top * (1.0 - ty) + bottom * ty
            }
        }
    }

    /// Runs `passes` box blurs of the given radius over the trail, scaling the
    /// last write by `decay`. `temp` is used as scratch.
    pub fn box_blur_and_decay(&mut self, radius: usize, passes: usize, decay: f32) {
        for pass in 0..passes {
            let scale = if pass + 1 == passes { decay } else { 1.0 };
            box_blur(
                &mut self.data,
                &mut self.temp,
                self.width,
                self.height,
                radius,
                scale,
            );
        }
    }

    // --- Buffer hand-off for the combine phase ---

    /// Moves the sensing buffer out so it can be filled while every grid's
    /// `data` is borrowed immutably.
    pub(crate) fn take_temp(&mut self) -> Vec<f32> {
        std::mem::take(&mut self.temp)
    }

    pub(crate) fn restore_temp(&mut self, temp: Vec<f32>) {
        debug_assert_eq!(temp.len(), self.width * self.height);
        self.temp = temp;
    }

    #[cfg(test)]
    pub(crate) fn temp_mut(&mut self) -> &mut [f32] {
        &mut self.temp
    }
}

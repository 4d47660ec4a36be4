// --- File: blur.rs ---
// --- Separable box blur with circular boundaries ---
//
// Both optimized passes keep a running window sum, so a pass costs O(W*H)
// whatever the radius. The `slow_*` versions sum the full window for every
// cell and are kept as the reference the fast kernels are tested against.

use crate::utils::wrap_index;
use rayon::prelude::*;

#[inline]
fn window_scale(radius: usize, scale: f32) -> f32 {
    scale / (2 * radius + 1) as f32
}

// Blurs one row (or any contiguous line) with wrap-around at both ends.
fn blur_line(line: &[f32], out: &mut [f32], radius: usize, m: f32) {
    let len = line.len();
    let r = radius as i64;
    let mut sum: f32 = (-r..=r).map(|k| line[wrap_index(k, len)]).sum();
    let mut enter = wrap_index(r + 1, len);
    let mut leave = wrap_index(-r, len);
    for o in out.iter_mut() {
        // Rounding in the running sum can leave a tiny negative residue once a
        // window empties; trails are never negative.
        *o = (sum * m).max(0.0);
        sum += line[enter] - line[leave];
        enter += 1;
        if enter == len {
            enter = 0;
        }
        leave += 1;
        if leave == len {
            leave = 0;
        }
    }
}

#[inline]
fn row_of(src: &[f32], width: usize, y: usize) -> &[f32] {
    &src[y * width..(y + 1) * width]
}

/// Horizontal mean filter of window `2 * radius + 1`, output multiplied by `scale`.
///
/// Rows are independent and are blurred in parallel. Output is clamped at
/// zero, as in the `slow_*` kernels.
pub fn box_blur_h(
    src: &[f32],
    dst: &mut [f32],
    width: usize,
    height: usize,
    radius: usize,
    scale: f32,
) {
    debug_assert_eq!(src.len(), width * height);
    debug_assert_eq!(dst.len(), width * height);
    let m = window_scale(radius, scale);
    src.par_chunks(width)
        .zip(dst.par_chunks_mut(width))
        .for_each(|(row, out)| blur_line(row, out, radius, m));
}

/// Vertical mean filter of window `2 * radius + 1`, output multiplied by `scale`.
///
/// Slides a whole row of column sums down the grid so memory is always read
/// row-major.
pub fn box_blur_v(
    src: &[f32],
    dst: &mut [f32],
    width: usize,
    height: usize,
    radius: usize,
    scale: f32,
) {
    debug_assert_eq!(src.len(), width * height);
    debug_assert_eq!(dst.len(), width * height);
    let m = window_scale(radius, scale);
    let r = radius as i64;

    let mut sums = vec![0.0f32; width];
    for k in -r..=r {
        for (s, v) in sums.iter_mut().zip(row_of(src, width, wrap_index(k, height))) {
            *s += v;
        }
    }

    let mut enter = wrap_index(r + 1, height);
    let mut leave = wrap_index(-r, height);
    for out in dst.chunks_mut(width) {
        for (o, s) in out.iter_mut().zip(&sums) {
            *o = (s * m).max(0.0);
        }
        let (entering, leaving) = (row_of(src, width, enter), row_of(src, width, leave));
        for ((s, a), b) in sums.iter_mut().zip(entering).zip(leaving) {
            *s += a - b;
        }
        enter += 1;
        if enter == height {
            enter = 0;
        }
        leave += 1;
        if leave == height {
            leave = 0;
        }
    }
}

/// One full blur pass: `data -> scratch` horizontally, then `scratch -> data`
/// vertically with `scale` applied to the final write.
pub fn box_blur(
    data: &mut [f32],
    scratch: &mut [f32],
    width: usize,
    height: usize,
    radius: usize,
    scale: f32,
) {
    box_blur_h(data, scratch, width, height, radius, 1.0);
    box_blur_v(scratch, data, width, height, radius, scale);
}

/// Brute-force `box_blur_h`: sums the whole window for every cell, clamped at zero.
pub fn slow_box_blur_h(
    src: &[f32],
    dst: &mut [f32],
    width: usize,
    height: usize,
    radius: usize,
    scale: f32,
) {
    let m = window_scale(radius, scale);
    let r = radius as i64;
    for y in 0..height {
        for x in 0..width {
            let mut val = 0.0f32;
            for k in -r..=r {
                val += src[y * width + wrap_index(x as i64 + k, width)];
            }
            dst[y * width + x] = (val * m).max(0.0);
        }
    }
}

/// Brute-force `box_blur_v`.
pub fn slow_box_blur_v(
    src: &[f32],
    dst: &mut [f32],
    width: usize,
    height: usize,
    radius: usize,
    scale: f32,
) {
    let m = window_scale(radius, scale);
    let r = radius as i64;
    for x in 0..width {
        for y in 0..height {
            let mut val = 0.0f32;
            for k in -r..=r {
                val += src[wrap_index(y as i64 + k, height) * width + x];
            }
            dst[y * width + x] = (val * m).max(0.0);
        }
    }
}

pub fn slow_box_blur(
    data: &mut [f32],
    scratch: &mut [f32],
    width: usize,
    height: usize,
    radius: usize,
    scale: f32,
) {
    slow_box_blur_h(data, scratch, width, height, radius, 1.0);
    slow_box_blur_v(scratch, data, width, height, radius, scale);
}

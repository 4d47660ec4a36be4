// --- File: utils.rs ---
// --- Helper Functions ---

/// Single-hop toroidal wrap into `[0, size)`.
///
/// Only valid when `x` is at most one `size` outside the range, which holds for
/// a heading change and for a particle step (`SimulationConfig::validate`
/// rejects steps as long as the grid).
#[inline]
pub fn wrap(x: f32, size: f32) -> f32 {
    if x < 0.0 {
        // -ε + size can round up to size
        let w = x + size;
        if w >= size { 0.0 } else { w }
    } else if x >= size {
        x - size
    } else {
        x
    }
}

/// Wraps any integer coordinate into `[0, size)`.
#[inline]
pub fn wrap_index(i: i64, size: usize) -> usize {
    i.rem_euclid(size as i64) as usize
}

pub fn radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

pub fn degrees(radians: f32) -> f32 {
    radians.to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_is_identity_inside_range() {
        assert_eq!(wrap(0.0, 10.0), 0.0);
        assert_eq!(wrap(4.5, 10.0), 4.5);
        assert_eq!(wrap(9.99, 10.0), 9.99);
    }

    #[test]
    fn wrap_moves_one_size_at_the_edges() {
        assert_eq!(wrap(-0.5, 10.0), 9.5);
        assert_eq!(wrap(-10.0, 10.0), 0.0);
        assert_eq!(wrap(10.0, 10.0), 0.0);
        assert_eq!(wrap(12.5, 10.0), 2.5);
    }

    #[test]
    fn wrap_index_handles_far_out_values() {
        assert_eq!(wrap_index(-1, 8), 7);
        assert_eq!(wrap_index(8, 8), 0);
        assert_eq!(wrap_index(-17, 8), 7);
        assert_eq!(wrap_index(3, 8), 3);
    }

    #[test]
    fn angle_conversions_round_trip() {
        assert!((radians(180.0) - std::f32::consts::PI).abs() < 1e-6);
        assert!((degrees(std::f32::consts::FRAC_PI_2) - 90.0).abs() < 1e-4);
    }
}

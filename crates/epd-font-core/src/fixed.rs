//! 26.6 fixed-point helpers.

/// Number of fractional bits in a 26.6 value.
pub const FRACTION_BITS: u32 = 6;

/// Convert a float pixel value to 26.6, rounding to the nearest 1/64.
pub fn from_f32(value: f32) -> i32 {
    (value * (1 << FRACTION_BITS) as f32).round() as i32
}

/// Whole pixels, rounded toward negative infinity.
pub fn floor(value: i32) -> i32 {
    value >> FRACTION_BITS
}

/// Whole pixels, rounded toward positive infinity.
pub fn ceil(value: i32) -> i32 {
    -((-value) >> FRACTION_BITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_and_ceil_follow_sign() {
        assert_eq!(floor(128), 2);
        assert_eq!(floor(129), 2);
        assert_eq!(floor(-1), -1);
        assert_eq!(floor(-64), -1);
        assert_eq!(floor(-65), -2);

        assert_eq!(ceil(128), 2);
        assert_eq!(ceil(129), 3);
        assert_eq!(ceil(-1), 0);
        assert_eq!(ceil(-65), -1);
    }

    #[test]
    fn from_f32_rounds_to_sixty_fourths() {
        assert_eq!(from_f32(1.0), 64);
        assert_eq!(from_f32(10.5), 672);
        assert_eq!(from_f32(-3.25), -208);
    }
}

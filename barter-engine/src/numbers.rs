//! Numeric conversion helpers centralizing safe quantity casts.

use num_traits::cast::cast;

/// Clamp a wide quantity into `u8`, saturating at `u8::MAX`.
#[must_use]
pub fn clamp_to_u8(value: u32) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

/// Convert a collection length into `u8`, saturating at `u8::MAX`.
#[must_use]
pub fn len_to_u8(len: usize) -> u8 {
    u8::try_from(len).unwrap_or(u8::MAX)
}

/// Convert a collection length into `u32`, saturating at `u32::MAX`.
#[must_use]
pub fn len_to_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Ceiling division that treats a zero divisor as one.
#[must_use]
pub const fn ceil_div(value: u32, divisor: u32) -> u32 {
    let divisor = if divisor == 0 { 1 } else { divisor };
    value.div_ceil(divisor)
}

/// Scale `value` by `fraction`, rounding down and never returning less than `floor`.
///
/// Non-finite or negative fractions collapse to `floor`.
#[must_use]
pub fn scale_down(value: u32, fraction: f64, floor: u32) -> u32 {
    if !fraction.is_finite() || fraction <= 0.0 {
        return floor;
    }
    let scaled = (f64::from(value) * fraction).floor();
    let max = cast::<u32, f64>(u32::MAX).unwrap_or(f64::MAX);
    cast::<f64, u32>(scaled.clamp(0.0, max))
        .unwrap_or(floor)
        .max(floor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_saturate() {
        assert_eq!(clamp_to_u8(12), 12);
        assert_eq!(clamp_to_u8(1_000), u8::MAX);
        assert_eq!(len_to_u8(300), u8::MAX);
        assert_eq!(len_to_u32(7), 7);
    }

    #[test]
    fn ceil_div_rounds_up_and_guards_zero() {
        assert_eq!(ceil_div(7, 2), 4);
        assert_eq!(ceil_div(6, 2), 3);
        assert_eq!(ceil_div(5, 0), 5);
        assert_eq!(ceil_div(0, 3), 0);
    }

    #[test]
    fn scale_down_floors_and_respects_minimum() {
        assert_eq!(scale_down(10, 0.45, 1), 4);
        assert_eq!(scale_down(1, 0.4, 1), 1);
        assert_eq!(scale_down(10, f64::NAN, 1), 1);
        assert_eq!(scale_down(10, -1.0, 2), 2);
    }
}

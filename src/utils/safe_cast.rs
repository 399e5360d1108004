//! Checked conversions between float and integer types

/// Clamp and convert f64 to i32
///
/// Non-finite input maps to `min`.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Clamping ensures safe truncation
pub fn f64_to_i32_clamp(value: f64, min: i32, max: i32) -> i32 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    if !value.is_finite() {
        return min;
    }

    let clamped = value.clamp(f64::from(min), f64::from(max));
    (clamped as i32).clamp(min, max)
}

/// Convert u32 to i32, saturating at `i32::MAX`
#[must_use]
pub fn u32_to_i32_clamp(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_f64_to_i32_clamp() {
        assert_eq!(f64_to_i32_clamp(50.0, 0, 100), 50);
        assert_eq!(f64_to_i32_clamp(-10.0, 0, 100), 0);
        assert_eq!(f64_to_i32_clamp(150.0, 0, 100), 100);
        assert_eq!(f64_to_i32_clamp(f64::NAN, 0, 100), 0);
        assert_eq!(f64_to_i32_clamp(f64::INFINITY, 0, 100), 0);
        assert_eq!(f64_to_i32_clamp(5.0, 100, 0), 5);
    }

    #[test]
    fn test_u32_to_i32_clamp() {
        assert_eq!(u32_to_i32_clamp(3), 3);
        assert_eq!(u32_to_i32_clamp(u32::MAX), i32::MAX);
    }

    proptest! {
        #[test]
        fn prop_f64_to_i32_clamp_always_within_bounds(
            value in any::<f64>(),
            min in any::<i32>(),
            max in any::<i32>()
        ) {
            let (min, max) = if min <= max { (min, max) } else { (max, min) };
            let result = f64_to_i32_clamp(value, min, max);
            prop_assert!(result >= min);
            prop_assert!(result <= max);
        }
    }
}

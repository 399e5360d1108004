//! Numeric helpers shared by the aggregation and comparison code.

pub mod safe_cast;

/// Round to a fixed number of decimal places
///
/// Non-finite values are returned unchanged.
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(safe_cast::u32_to_i32_clamp(decimals));
    (value * factor).round() / factor
}

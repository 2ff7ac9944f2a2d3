//! Fixed-point price representation.
//!
//! ## Overview
//!
//! Prices are stored as `u64` scaled by 10^8. Clients submit and observe
//! real-valued prices over the wire; conversion to ticks happens once at
//! ingress, so the book itself only ever compares integers. This keeps
//! price equality total and well-defined even when clients send imprecise
//! decimals like `99.10000000000001`.
//!
//! ## Scale Factor
//!
//! The scale factor is 10^8 (100,000,000), giving 8 decimal places —
//! enough for any realistic tick size.
//!
//! ## Examples
//!
//! ```
//! use matchbook::types::price::{to_fixed, from_fixed};
//!
//! let price = to_fixed("99.50").unwrap();
//! assert_eq!(price, 9_950_000_000);
//! assert_eq!(from_fixed(price), "99.50000000");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point prices: 10^8.
pub const SCALE: u64 = 100_000_000;

/// Convert a decimal string to fixed-point ticks.
///
/// Returns `None` if the string does not parse, is negative, or is out
/// of range.
///
/// # Example
///
/// ```
/// use matchbook::types::price::to_fixed;
///
/// assert_eq!(to_fixed("1.0"), Some(100_000_000));
/// assert_eq!(to_fixed("100.50"), Some(10_050_000_000));
/// assert_eq!(to_fixed("-1"), None);
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a `Decimal` to fixed-point ticks, rounding to the nearest tick.
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    let rounded = scaled.round_dp(0);
    rounded.to_u64()
}

/// Convert fixed-point ticks to a `Decimal`.
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Convert an `f64` price (as received in a JSON body) to fixed-point
/// ticks. NaN, infinite, and negative values return `None`.
pub fn from_f64(value: f64) -> Option<u64> {
    let decimal = Decimal::from_f64(value)?;
    decimal_to_fixed(decimal)
}

/// Convert fixed-point ticks to an `f64` for JSON responses.
pub fn to_f64(value: u64) -> f64 {
    fixed_to_decimal(value).to_f64().unwrap_or(0.0)
}

/// Render fixed-point ticks with 8 decimal places.
///
/// # Example
///
/// ```
/// use matchbook::types::price::from_fixed;
///
/// assert_eq!(from_fixed(100_000_000), "1.00000000");
/// assert_eq!(from_fixed(9_950_000_000), "99.50000000");
/// ```
pub fn from_fixed(value: u64) -> String {
    format!("{:.8}", fixed_to_decimal(value))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_fixed_basic() {
        assert_eq!(to_fixed("1.0"), Some(100_000_000));
        assert_eq!(to_fixed("1"), Some(100_000_000));
        assert_eq!(to_fixed("0.5"), Some(50_000_000));
        assert_eq!(to_fixed("99.50"), Some(9_950_000_000));
        assert_eq!(to_fixed("0.00000001"), Some(1));
    }

    #[test]
    fn test_to_fixed_rejects_garbage() {
        assert_eq!(to_fixed("-1.0"), None);
        assert_eq!(to_fixed("abc"), None);
        assert_eq!(to_fixed(""), None);
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(from_f64(99.5), Some(9_950_000_000));
        assert_eq!(from_f64(0.0), Some(0));
        assert_eq!(from_f64(-1.0), None);
        assert_eq!(from_f64(f64::NAN), None);
        assert_eq!(from_f64(f64::INFINITY), None);
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(to_f64(9_950_000_000), 99.5);
        assert_eq!(to_f64(0), 0.0);
    }

    #[test]
    fn test_from_fixed() {
        assert_eq!(from_fixed(100_000_000), "1.00000000");
        assert_eq!(from_fixed(1), "0.00000001");
        assert_eq!(from_fixed(0), "0.00000000");
    }

    #[test]
    fn test_f64_roundtrip_quantizes() {
        // Imprecise client decimals land on the same tick.
        let a = from_f64(99.1).unwrap();
        let b = from_f64(99.10000000000001).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_roundtrip() {
        let values = ["1.0", "0.5", "99.50", "101.00", "0.00000001"];

        for s in values {
            let fixed = to_fixed(s).unwrap();
            let back = from_fixed(fixed);
            let original = Decimal::from_str(s).unwrap();
            let converted = Decimal::from_str(&back).unwrap();
            assert_eq!(original, converted, "roundtrip failed for {}", s);
        }
    }
}

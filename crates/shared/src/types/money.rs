//! Conversion between decimal amounts and integer minor units.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts travel through the API as `rust_decimal::Decimal` and are stored
//! as integer minor units (value × 10⁴), which keeps balance arithmetic exact
//! on storage engines without a native decimal column type.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places carried by a stored amount.
pub const MINOR_UNIT_SCALE: u32 = 4;

/// Minor units per whole currency unit (10 ^ `MINOR_UNIT_SCALE`).
const MINOR_UNITS_PER_WHOLE: i64 = 10_000;

/// Converts a decimal amount to integer minor units.
///
/// The amount is rounded to [`MINOR_UNIT_SCALE`] decimal places with banker's
/// rounding first. Returns `None` when the result does not fit in an `i64`.
#[must_use]
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    let rounded =
        amount.round_dp_with_strategy(MINOR_UNIT_SCALE, RoundingStrategy::MidpointNearestEven);
    rounded.checked_mul(Decimal::from(MINOR_UNITS_PER_WHOLE))?.to_i64()
}

/// Converts integer minor units back to a decimal amount.
#[must_use]
pub fn from_minor_units(minor: i64) -> Decimal {
    Decimal::new(minor, MINOR_UNIT_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(1500), 15_000_000)]
    #[case(dec!(0.0001), 1)]
    #[case(dec!(-42.50), -425_000)]
    #[case(dec!(12.34565), 123_456)] // banker's: half rounds to even
    #[case(dec!(12.34575), 123_458)]
    #[case(dec!(0.00005), 0)]
    fn test_to_minor_units(#[case] amount: Decimal, #[case] expected: i64) {
        assert_eq!(to_minor_units(amount), Some(expected));
    }

    #[test]
    fn test_to_minor_units_overflow() {
        assert_eq!(to_minor_units(Decimal::MAX), None);
        assert_eq!(to_minor_units(dec!(999_999_999_999_999_999)), None);
    }

    #[test]
    fn test_from_minor_units() {
        assert_eq!(from_minor_units(15_000_000), dec!(1500));
        assert_eq!(from_minor_units(-425_000), dec!(-42.5));
        assert_eq!(from_minor_units(0), Decimal::ZERO);
    }

    proptest! {
        /// Storage and retrieval of any representable amount is exact.
        #[test]
        fn prop_minor_units_are_exact(minor in -1_000_000_000_000_i64..1_000_000_000_000_i64) {
            let amount = from_minor_units(minor);
            prop_assert_eq!(to_minor_units(amount), Some(minor));
        }
    }
}

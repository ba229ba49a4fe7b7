//! # Money Module
//!
//! Monetary amount validation with rust_decimal.
//!
//! Ironbank carries a single implicit currency with two decimal places.
//! Every amount crossing into the ledger passes through these helpers, so
//! floating point never touches a money path and comparisons stay exact.

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};

/// Number of fraction digits for monetary values.
pub const MONEY_SCALE: u32 = 2;

/// Validate a transfer/deposit/withdrawal amount.
///
/// The amount must be strictly positive and carry at most two fraction
/// digits. Returns the amount rescaled to exactly [`MONEY_SCALE`] digits.
pub fn require_amount(amount: Decimal) -> CoreResult<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(CoreError::invalid_amount(format!(
            "amount must be positive: {amount}"
        )));
    }
    rescaled(amount)
}

/// Validate an opening balance: zero is allowed, negative is not.
pub fn require_opening_balance(amount: Decimal) -> CoreResult<Decimal> {
    if amount < Decimal::ZERO {
        return Err(CoreError::invalid_amount(format!(
            "opening balance must not be negative: {amount}"
        )));
    }
    rescaled(amount)
}

fn rescaled(amount: Decimal) -> CoreResult<Decimal> {
    if amount.round_dp(MONEY_SCALE) != amount {
        return Err(CoreError::invalid_amount(format!(
            "amount has more than {MONEY_SCALE} decimal places: {amount}"
        )));
    }
    let mut normalized = amount;
    normalized.rescale(MONEY_SCALE);
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_positive_amount_accepted() {
        assert_eq!(require_amount(dec!(100.50)).unwrap(), dec!(100.50));
        assert_eq!(require_amount(dec!(0.01)).unwrap(), dec!(0.01));
    }

    #[test]
    fn test_amount_rescaled_to_two_places() {
        let normalized = require_amount(dec!(100)).unwrap();
        assert_eq!(normalized, dec!(100.00));
        assert_eq!(normalized.to_string(), "100.00");
    }

    #[test]
    fn test_zero_and_negative_amounts_rejected() {
        assert!(require_amount(Decimal::ZERO).is_err());
        assert!(require_amount(dec!(-5.00)).is_err());
    }

    #[test]
    fn test_sub_cent_amount_rejected() {
        let err = require_amount(dec!(0.001)).unwrap_err();
        assert!(err.to_string().contains("decimal places"));
    }

    #[test]
    fn test_opening_balance_allows_zero() {
        assert_eq!(require_opening_balance(Decimal::ZERO).unwrap(), dec!(0.00));
        assert!(require_opening_balance(dec!(-0.01)).is_err());
    }
}

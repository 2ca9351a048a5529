//! # Utilities Module
//!
//! This module contains helper functions used across the backend service.

/// Subtract a payment from a balance, flooring the result at zero.
///
/// This is the core balance rule of the ledger: overpayment is silently
/// absorbed rather than producing a negative balance or an error.
///
/// A negative `amount` increases the balance (input is unvalidated by
/// design), and `saturating_sub` keeps extreme inputs from wrapping.
///
/// ## Arguments
///
/// * `current` - The obligation's current balance
/// * `amount` - The payment amount to apply
///
/// ## Returns
///
/// `max(0, current - amount)`
pub fn clamped_subtract(current: i64, amount: i64) -> i64 {
    current.saturating_sub(amount).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_payment() {
        assert_eq!(clamped_subtract(1000, 300), 700);
        assert_eq!(clamped_subtract(700, 700), 0);
    }

    #[test]
    fn test_overpayment_clamps_to_zero() {
        // Overpayment is absorbed, not recorded as credit
        assert_eq!(clamped_subtract(700, 800), 0);
        assert_eq!(clamped_subtract(0, 1), 0);
    }

    #[test]
    fn test_negative_amount_increases_balance() {
        // Input is unvalidated; a negative payment grows the balance
        assert_eq!(clamped_subtract(100, -50), 150);
        assert_eq!(clamped_subtract(0, -100), 100);
    }

    #[test]
    fn test_zero_amount_is_identity() {
        assert_eq!(clamped_subtract(500, 0), 500);
        assert_eq!(clamped_subtract(0, 0), 0);
    }

    #[test]
    fn test_extreme_values_saturate() {
        assert_eq!(clamped_subtract(i64::MIN, 1), 0);
        assert_eq!(clamped_subtract(i64::MAX, -1), i64::MAX);
        assert_eq!(clamped_subtract(i64::MAX, i64::MIN), i64::MAX);
    }
}

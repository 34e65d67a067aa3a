//! Price display formatting.
//!
//! Cart amounts are kept as full-precision [`Decimal`] values; rounding to
//! two decimal places happens only here, at display time. Presentation
//! layers should never feed a formatted string back into computation.

use rust_decimal::Decimal;

/// Format a decimal amount as a display price string (e.g., "$19.99").
///
/// Rounds to 2 decimal places for display only; the stored amount keeps
/// full precision.
#[must_use]
pub fn display_amount(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

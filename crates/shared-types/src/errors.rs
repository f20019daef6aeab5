//! # Error Types
//!
//! Errors raised while parsing shared value types.

use thiserror::Error;

/// Errors that can occur when parsing an [`crate::Amount`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Input was empty or only whitespace.
    #[error("amount is empty")]
    Empty,

    /// Input is not a decimal number.
    #[error("invalid amount: {0:?}")]
    Invalid(String),

    /// More than two fractional digits were supplied.
    #[error("amount {0:?} has more than two decimal places")]
    Precision(String),

    /// Magnitude exceeds [`crate::Amount::MAX`].
    #[error("amount {0:?} is out of range")]
    Overflow(String),
}

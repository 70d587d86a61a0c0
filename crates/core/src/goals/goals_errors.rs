use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by goal operations.
#[derive(Error, Debug, PartialEq)]
pub enum GoalError {
    /// Missing, or owned by another account.
    #[error("Goal not found: {0}")]
    NotFound(String),

    #[error("Contribution must be greater than zero, got {0}")]
    InvalidContribution(Decimal),
}

//! Money arithmetic that reports overflow as a validation error.

use rust_decimal::Decimal;

use crate::errors::{Result, ValidationError};

/// Rejects `value` when it exceeds `max`.
pub fn ensure_at_most(value: Decimal, max: Decimal, field: &str) -> Result<()> {
    if value > max {
        return Err(ValidationError::field(field, format!("cannot exceed {}", max)).into());
    }
    Ok(())
}

pub fn checked_add(lhs: Decimal, rhs: Decimal, field: &str) -> Result<Decimal> {
    lhs.checked_add(rhs).ok_or_else(|| ValidationError::too_large(field).into())
}

pub fn checked_sub(lhs: Decimal, rhs: Decimal, field: &str) -> Result<Decimal> {
    lhs.checked_sub(rhs).ok_or_else(|| ValidationError::too_large(field).into())
}

pub fn checked_mul(lhs: Decimal, rhs: Decimal, field: &str) -> Result<Decimal> {
    lhs.checked_mul(rhs).ok_or_else(|| ValidationError::too_large(field).into())
}

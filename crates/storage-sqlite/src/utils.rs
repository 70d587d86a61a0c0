//! Conversions between SQLite column values and domain types.

use rust_decimal::Decimal;
use std::str::FromStr;

use fintrack_core::errors::{DatabaseError, Error, Result};

/// Decimals are stored as TEXT to keep exact values.
pub fn decimal_to_text(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Parses a stored decimal, reporting the column on failure.
pub fn parse_decimal(text: &str, column: &str) -> Result<Decimal> {
    Decimal::from_str(text).map_err(|e| {
        Error::Database(DatabaseError::CorruptValue(format!(
            "{} = '{}': {}",
            column, text, e
        )))
    })
}

/// Parses a stored tag into its domain enum.
pub fn parse_tag<T: FromStr>(text: &str, column: &str) -> Result<T> {
    T::from_str(text).map_err(|_| {
        Error::Database(DatabaseError::CorruptValue(format!(
            "{} = '{}'",
            column, text
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fintrack_core::transfers::TransferStatus;
    use rust_decimal_macros::dec;

    #[test]
    fn decimals_are_stored_without_trailing_zeros() {
        assert_eq!(decimal_to_text(dec!(50.00)), "50");
        assert_eq!(decimal_to_text(dec!(0.10)), "0.1");
    }

    #[test]
    fn corrupt_values_name_the_column() {
        let err = parse_decimal("abc", "balance").unwrap_err();
        assert!(err.to_string().contains("balance"));
        assert!(parse_tag::<TransferStatus>("lost", "status").is_err());
        assert_eq!(
            parse_tag::<TransferStatus>("pending", "status").unwrap(),
            TransferStatus::Pending
        );
    }
}

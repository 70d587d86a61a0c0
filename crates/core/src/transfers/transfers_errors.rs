use rust_decimal::Decimal;
use thiserror::Error;

/// Domain failures of a money transfer.
#[derive(Error, Debug, PartialEq)]
pub enum TransferError {
    #[error("Cannot send money to yourself")]
    SelfTransfer,

    #[error("Sender not found")]
    SenderNotFound,

    #[error("Recipient not found: {0}")]
    RecipientNotFound(String),

    #[error("Insufficient balance: available {available}, requested {requested}")]
    InsufficientFunds {
        available: Decimal,
        requested: Decimal,
    },

    #[error("Idempotency key '{0}' was already used for a different request")]
    IdempotencyMismatch(String),
}

//! Transfer domain models.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::idempotency::compute_request_fingerprint;
use crate::accounts::normalize_email;
use crate::constants::{DEFAULT_PAYMENT_METHOD, MAX_MONEY_AMOUNT};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::decimal_utils::ensure_at_most;

const IDEMPOTENCY_KEY_MAX_CHARS: usize = 255;

/// Lifecycle status of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    /// Scheduled for a future date and not yet settled.
    Pending,
    Completed,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Pending => "pending",
            TransferStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(TransferStatus::Pending),
            "completed" => Ok(TransferStatus::Completed),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown transfer status '{}'",
                other
            )))),
        }
    }
}

/// A recorded movement of funds. Immutable apart from `status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub id: String,
    pub sender_id: String,
    /// Absent when a demo sender addressed an unresolved recipient.
    pub recipient_id: Option<String>,
    pub recipient_email: String,
    pub amount: Decimal,
    pub note: String,
    pub payment_method: String,
    pub schedule_date: Option<DateTime<Utc>>,
    pub status: TransferStatus,
    pub idempotency_key: Option<String>,
    #[serde(skip)]
    pub request_fingerprint: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Transfer {
    /// True when the account is the sender or the recipient.
    pub fn involves(&self, account_id: &str) -> bool {
        self.sender_id == account_id || self.recipient_id.as_deref() == Some(account_id)
    }
}

/// Send-money payload as submitted by a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SendMoneyRequest {
    pub recipient_email: String,
    pub amount: Decimal,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub schedule_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

impl SendMoneyRequest {
    /// Validates the payload and binds it to the authenticated sender.
    ///
    /// Rejections here happen before any storage access.
    pub fn into_transfer_request(self, sender_id: &str) -> Result<TransferRequest> {
        let recipient_email = normalize_email(&self.recipient_email);
        if recipient_email.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "recipientEmail".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::field(
                "amount",
                "must be greater than zero",
            )));
        }
        ensure_at_most(self.amount, MAX_MONEY_AMOUNT, "amount")?;

        let idempotency_key = match self.idempotency_key.map(|k| k.trim().to_string()) {
            Some(key) if key.is_empty() => None,
            Some(key) if key.chars().count() > IDEMPOTENCY_KEY_MAX_CHARS => {
                return Err(Error::Validation(ValidationError::field(
                    "idempotencyKey",
                    format!("cannot exceed {} characters", IDEMPOTENCY_KEY_MAX_CHARS),
                )));
            }
            other => other,
        };

        let note = self.note.map(|n| n.trim().to_string()).unwrap_or_default();
        let payment_method = self
            .payment_method
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string());

        let fingerprint = compute_request_fingerprint(
            sender_id,
            &recipient_email,
            self.amount,
            &note,
            &payment_method,
            self.schedule_date.as_ref(),
        );

        Ok(TransferRequest {
            sender_id: sender_id.to_string(),
            recipient_email,
            amount: self.amount,
            note,
            payment_method,
            schedule_date: self.schedule_date,
            idempotency_key,
            fingerprint,
        })
    }
}

/// A validated transfer request bound to its sender.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub sender_id: String,
    pub recipient_email: String,
    pub amount: Decimal,
    pub note: String,
    pub payment_method: String,
    pub schedule_date: Option<DateTime<Utc>>,
    pub idempotency_key: Option<String>,
    pub fingerprint: String,
}

/// Row to be inserted by a ledger once a transfer has been planned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransferRecord {
    pub sender_id: String,
    pub recipient_id: Option<String>,
    pub recipient_email: String,
    pub amount: Decimal,
    pub note: String,
    pub payment_method: String,
    pub schedule_date: Option<DateTime<Utc>>,
    pub status: TransferStatus,
    pub idempotency_key: Option<String>,
    pub request_fingerprint: String,
}

/// Outcome of a send-money call.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransferReceipt {
    pub transfer: Transfer,
    /// Sender balance after the transfer.
    pub balance: Decimal,
    /// True when an earlier transfer was returned for a repeated idempotency key.
    pub replayed: bool,
}

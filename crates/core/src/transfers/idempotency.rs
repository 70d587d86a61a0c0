//! Request fingerprints for idempotent transfer submission.
//!
//! A client retry carries the same idempotency key. The fingerprint tells a
//! genuine retry apart from a different request that reuses a key.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

/// Computes a stable SHA-256 fingerprint of a transfer request.
///
/// Hashed fields, `|`-separated:
/// - sender_id
/// - recipient email (already canonical)
/// - amount, normalized so `50` and `50.00` match
/// - note, whitespace collapsed
/// - payment method
/// - schedule date as RFC 3339, or empty
pub fn compute_request_fingerprint(
    sender_id: &str,
    recipient_email: &str,
    amount: Decimal,
    note: &str,
    payment_method: &str,
    schedule_date: Option<&DateTime<Utc>>,
) -> String {
    let mut hasher = Sha256::new();

    hasher.update(sender_id.as_bytes());
    hasher.update(b"|");
    hasher.update(recipient_email.as_bytes());
    hasher.update(b"|");
    hasher.update(amount.normalize().to_string().as_bytes());
    hasher.update(b"|");
    hasher.update(normalize_whitespace(note).as_bytes());
    hasher.update(b"|");
    hasher.update(payment_method.as_bytes());
    hasher.update(b"|");
    if let Some(date) = schedule_date {
        hasher.update(date.to_rfc3339().as_bytes());
    }

    hex::encode(hasher.finalize())
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

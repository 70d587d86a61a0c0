//! Database model for transfers.

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;

use fintrack_core::transfers::{NewTransferRecord, Transfer};
use fintrack_core::Result;

use crate::utils::{decimal_to_text, parse_decimal, parse_tag};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transfers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransferDB {
    pub id: String,
    pub sender_id: String,
    pub recipient_id: Option<String>,
    pub recipient_email: String,
    pub amount: String,
    pub note: String,
    pub payment_method: String,
    pub schedule_date: Option<NaiveDateTime>,
    pub status: String,
    pub idempotency_key: Option<String>,
    pub request_fingerprint: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TransferDB {
    pub fn from_record(record: NewTransferRecord, id: String, now: NaiveDateTime) -> Self {
        Self {
            id,
            sender_id: record.sender_id,
            recipient_id: record.recipient_id,
            recipient_email: record.recipient_email,
            amount: decimal_to_text(record.amount),
            note: record.note,
            payment_method: record.payment_method,
            schedule_date: record.schedule_date.map(|d| d.naive_utc()),
            status: record.status.as_str().to_string(),
            idempotency_key: record.idempotency_key,
            request_fingerprint: Some(record.request_fingerprint),
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<TransferDB> for Transfer {
    type Error = fintrack_core::Error;

    fn try_from(db: TransferDB) -> Result<Self> {
        Ok(Self {
            amount: parse_decimal(&db.amount, "transfers.amount")?,
            status: parse_tag(&db.status, "transfers.status")?,
            schedule_date: db
                .schedule_date
                .map(|d| DateTime::<Utc>::from_naive_utc_and_offset(d, Utc)),
            id: db.id,
            sender_id: db.sender_id,
            recipient_id: db.recipient_id,
            recipient_email: db.recipient_email,
            note: db.note,
            payment_method: db.payment_method,
            idempotency_key: db.idempotency_key,
            request_fingerprint: db.request_fingerprint,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

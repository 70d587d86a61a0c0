//! Database model for cards.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use fintrack_core::cards::{Card, NewCardRecord};
use fintrack_core::Result;

use crate::accounts::AccountDB;
use crate::utils::parse_tag;

#[derive(
    Queryable, Identifiable, Insertable, Associations, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(belongs_to(AccountDB, foreign_key = account_id))]
#[diesel(table_name = crate::schema::cards)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CardDB {
    pub id: String,
    pub account_id: String,
    pub card_name: String,
    pub last4: String,
    pub expiry_date: String,
    pub brand: String,
    pub created_at: NaiveDateTime,
}

impl CardDB {
    pub fn from_new(
        record: NewCardRecord,
        account_id: String,
        id: String,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            account_id,
            card_name: record.card_name,
            last4: record.last4,
            expiry_date: record.expiry_date,
            brand: record.brand.as_str().to_string(),
            created_at: now,
        }
    }
}

impl TryFrom<CardDB> for Card {
    type Error = fintrack_core::Error;

    fn try_from(db: CardDB) -> Result<Self> {
        Ok(Self {
            brand: parse_tag(&db.brand, "cards.brand")?,
            id: db.id,
            account_id: db.account_id,
            card_name: db.card_name,
            last4: db.last4,
            expiry_date: db.expiry_date,
            created_at: db.created_at,
        })
    }
}

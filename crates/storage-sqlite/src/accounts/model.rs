//! Database model for accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;

use fintrack_core::accounts::{Account, NewAccount};
use fintrack_core::Result;

use crate::utils::{decimal_to_text, parse_decimal};

/// Database model for accounts
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: String,
    pub name: String,
    pub email: String,
    pub balance: String,
    pub is_demo: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl AccountDB {
    /// Builds the row for a new account under a freshly minted id.
    pub fn from_new(new_account: NewAccount, id: String, now: NaiveDateTime) -> Self {
        Self {
            id,
            name: new_account.name,
            email: new_account.email,
            balance: decimal_to_text(Decimal::ZERO),
            is_demo: new_account.is_demo,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<AccountDB> for Account {
    type Error = fintrack_core::Error;

    fn try_from(db: AccountDB) -> Result<Self> {
        Ok(Self {
            balance: parse_decimal(&db.balance, "accounts.balance")?,
            id: db.id,
            name: db.name,
            email: db.email,
            is_demo: db.is_demo,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

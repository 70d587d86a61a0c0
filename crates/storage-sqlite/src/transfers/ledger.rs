use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use uuid::Uuid;

use fintrack_core::accounts::Account;
use fintrack_core::transfers::{NewTransferRecord, Transfer, TransferLedger};
use fintrack_core::utils::time_utils::now_naive_utc;
use fintrack_core::Result;

use super::model::TransferDB;
use crate::accounts::{find_account, find_account_by_email, update_balance};
use crate::errors::IntoCore;
use crate::schema::transfers;

/// [`TransferLedger`] over a connection that already has a transaction open.
///
/// Only construct this inside a [`WriteHandle::exec`](crate::WriteHandle::exec) job.
pub struct SqliteLedger<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteLedger<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }
}

impl TransferLedger for SqliteLedger<'_> {
    fn find_by_idempotency_key(&mut self, sender_id: &str, key: &str) -> Result<Option<Transfer>> {
        transfers::table
            .select(TransferDB::as_select())
            .filter(transfers::sender_id.eq(sender_id))
            .filter(transfers::idempotency_key.eq(key))
            .first::<TransferDB>(&mut *self.conn)
            .optional()
            .into_core()?
            .map(Transfer::try_from)
            .transpose()
    }

    fn load_account(&mut self, account_id: &str) -> Result<Option<Account>> {
        find_account(self.conn, account_id)
    }

    fn find_account_by_email(&mut self, email: &str) -> Result<Option<Account>> {
        find_account_by_email(self.conn, email)
    }

    fn set_balance(&mut self, account_id: &str, balance: Decimal) -> Result<()> {
        update_balance(self.conn, account_id, balance)
    }

    fn insert_transfer(&mut self, record: NewTransferRecord) -> Result<Transfer> {
        let row = TransferDB::from_record(record, Uuid::new_v4().to_string(), now_naive_utc());
        diesel::insert_into(transfers::table)
            .values(&row)
            .execute(&mut *self.conn)
            .into_core()?;
        Transfer::try_from(row)
    }
}

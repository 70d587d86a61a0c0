use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use fintrack_core::accounts::{Account, AccountRepositoryTrait, NewAccount};
use fintrack_core::utils::time_utils::now_naive_utc;
use fintrack_core::{Error, Result};

use super::model::AccountDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::accounts;
use crate::schema::accounts::dsl::*;
use crate::utils::decimal_to_text;

/// Repository for managing account data in the database
pub struct AccountRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AccountRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

/// Loads an account on an existing connection, `None` if absent.
pub(crate) fn find_account(
    conn: &mut SqliteConnection,
    account_id: &str,
) -> Result<Option<Account>> {
    accounts
        .select(AccountDB::as_select())
        .find(account_id)
        .first::<AccountDB>(conn)
        .optional()
        .into_core()?
        .map(Account::try_from)
        .transpose()
}

pub(crate) fn find_account_by_email(
    conn: &mut SqliteConnection,
    email_param: &str,
) -> Result<Option<Account>> {
    accounts
        .select(AccountDB::as_select())
        .filter(email.eq(email_param))
        .first::<AccountDB>(conn)
        .optional()
        .into_core()?
        .map(Account::try_from)
        .transpose()
}

pub(crate) fn update_balance(
    conn: &mut SqliteConnection,
    account_id: &str,
    new_balance: rust_decimal::Decimal,
) -> Result<()> {
    let updated = diesel::update(accounts.find(account_id))
        .set((
            balance.eq(decimal_to_text(new_balance)),
            updated_at.eq(now_naive_utc()),
        ))
        .execute(conn)
        .into_core()?;
    if updated == 0 {
        return Err(Error::NotFound("Account".to_string()));
    }
    Ok(())
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account> {
        self.writer
            .exec(move |conn| {
                let row =
                    AccountDB::from_new(new_account, Uuid::new_v4().to_string(), now_naive_utc());
                diesel::insert_into(accounts::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Account::try_from(row)
            })
            .await
    }

    async fn delete(&self, account_id: &str) -> Result<usize> {
        let id_to_delete = account_id.to_string();
        self.writer
            .exec(move |conn| diesel::delete(accounts.find(id_to_delete)).execute(conn).into_core())
            .await
    }

    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;
        find_account(&mut conn, account_id)?.ok_or_else(|| Error::NotFound("Account".to_string()))
    }

    fn find_by_email(&self, email_param: &str) -> Result<Option<Account>> {
        let mut conn = get_connection(&self.pool)?;
        find_account_by_email(&mut conn, email_param)
    }
}

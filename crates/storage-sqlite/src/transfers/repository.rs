use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use std::sync::Arc;

use fintrack_core::transfers::{
    execute_transfer, Transfer, TransferReceipt, TransferRepositoryTrait, TransferRequest,
    TransferStatus,
};
use fintrack_core::utils::time_utils::now_naive_utc;
use fintrack_core::{Error, Result};

use super::ledger::SqliteLedger;
use super::model::TransferDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::transfers;

pub struct TransferRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransferRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransferRepository { pool, writer }
    }
}

#[async_trait]
impl TransferRepositoryTrait for TransferRepository {
    async fn execute_transfer(&self, request: TransferRequest) -> Result<TransferReceipt> {
        self.writer
            .exec(move |conn| execute_transfer(&mut SqliteLedger::new(conn), &request))
            .await
    }

    fn get_by_id(&self, transfer_id: &str) -> Result<Transfer> {
        let mut conn = get_connection(&self.pool)?;
        transfers::table
            .select(TransferDB::as_select())
            .find(transfer_id)
            .first::<TransferDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::NotFound("Transaction".to_string()))
            .and_then(Transfer::try_from)
    }

    fn list_for_account(&self, account_id: &str) -> Result<Vec<Transfer>> {
        let mut conn = get_connection(&self.pool)?;
        transfers::table
            .select(TransferDB::as_select())
            .filter(
                transfers::sender_id
                    .eq(account_id)
                    .or(transfers::recipient_id.eq(account_id)),
            )
            .order((transfers::created_at.desc(), transfers::id.desc()))
            .load::<TransferDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Transfer::try_from)
            .collect()
    }

    async fn complete_due_transfers(&self, now: DateTime<Utc>) -> Result<usize> {
        let cutoff = now.naive_utc();
        self.writer
            .exec(move |conn| {
                diesel::update(
                    transfers::table
                        .filter(transfers::status.eq(TransferStatus::Pending.as_str()))
                        .filter(transfers::schedule_date.le(cutoff)),
                )
                .set((
                    transfers::status.eq(TransferStatus::Completed.as_str()),
                    transfers::updated_at.eq(now_naive_utc()),
                ))
                .execute(conn)
                .into_core()
            })
            .await
    }
}

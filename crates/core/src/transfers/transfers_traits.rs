use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::transfers_model::{SendMoneyRequest, Transfer, TransferReceipt, TransferRequest};
use crate::errors::Result;

/// Trait for transfer repository operations
#[async_trait]
pub trait TransferRepositoryTrait: Send + Sync {
    /// Runs [`execute_transfer`](super::execute_transfer) inside one write transaction.
    async fn execute_transfer(&self, request: TransferRequest) -> Result<TransferReceipt>;

    fn get_by_id(&self, transfer_id: &str) -> Result<Transfer>;

    /// Transfers where the account is sender or recipient, newest first.
    fn list_for_account(&self, account_id: &str) -> Result<Vec<Transfer>>;

    /// Marks pending transfers scheduled at or before `now` as completed.
    ///
    /// Returns the number of transfers settled.
    async fn complete_due_transfers(&self, now: DateTime<Utc>) -> Result<usize>;
}

/// Trait for transfer service operations
#[async_trait]
pub trait TransferServiceTrait: Send + Sync {
    async fn send_money(
        &self,
        sender_id: &str,
        request: SendMoneyRequest,
    ) -> Result<TransferReceipt>;

    /// Loads a transfer visible to the account.
    fn get_transfer(&self, account_id: &str, transfer_id: &str) -> Result<Transfer>;

    fn list_transfers(&self, account_id: &str) -> Result<Vec<Transfer>>;

    async fn settle_due_transfers(&self, now: DateTime<Utc>) -> Result<usize>;
}

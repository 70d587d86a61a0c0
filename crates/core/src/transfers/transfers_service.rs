use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::sync::Arc;

use super::transfers_model::{SendMoneyRequest, Transfer, TransferReceipt};
use super::transfers_traits::{TransferRepositoryTrait, TransferServiceTrait};
use crate::errors::{DatabaseError, Error, Result};

pub struct TransferService {
    repository: Arc<dyn TransferRepositoryTrait>,
}

impl TransferService {
    pub fn new(repository: Arc<dyn TransferRepositoryTrait>) -> Self {
        TransferService { repository }
    }
}

#[async_trait]
impl TransferServiceTrait for TransferService {
    async fn send_money(
        &self,
        sender_id: &str,
        request: SendMoneyRequest,
    ) -> Result<TransferReceipt> {
        let request = request.into_transfer_request(sender_id)?;
        debug!(
            "Send request from {} to {} for {}",
            request.sender_id, request.recipient_email, request.amount
        );

        self.repository
            .execute_transfer(request)
            .await
            .inspect_err(|err| {
                if let Error::Database(DatabaseError::UniqueViolation(_)) = err {
                    warn!("Idempotency key collision for sender {}", sender_id);
                }
            })
    }

    fn get_transfer(&self, account_id: &str, transfer_id: &str) -> Result<Transfer> {
        let transfer = self.repository.get_by_id(transfer_id)?;
        if !transfer.involves(account_id) {
            return Err(Error::NotFound("Transaction".to_string()));
        }
        Ok(transfer)
    }

    fn list_transfers(&self, account_id: &str) -> Result<Vec<Transfer>> {
        self.repository.list_for_account(account_id)
    }

    async fn settle_due_transfers(&self, now: DateTime<Utc>) -> Result<usize> {
        let settled = self.repository.complete_due_transfers(now).await?;
        if settled > 0 {
            info!("Settled {} scheduled transfer(s)", settled);
        }
        Ok(settled)
    }
}

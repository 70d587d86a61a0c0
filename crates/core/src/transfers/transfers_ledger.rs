//! The transfer state machine, independent of storage.

use log::{debug, info};
use rust_decimal::Decimal;

use super::transfers_errors::TransferError;
use super::transfers_model::{
    NewTransferRecord, Transfer, TransferReceipt, TransferRequest, TransferStatus,
};
use crate::accounts::Account;
use crate::errors::Result;
use crate::utils::decimal_utils::{checked_add, checked_sub};

/// Storage operations a transfer needs, all within one unit of work.
///
/// Implementations must run every call against the same transaction so that
/// [`execute_transfer`] commits or rolls back atomically.
pub trait TransferLedger {
    /// Loads an earlier transfer recorded under `(sender_id, key)`.
    fn find_by_idempotency_key(&mut self, sender_id: &str, key: &str) -> Result<Option<Transfer>>;

    fn load_account(&mut self, account_id: &str) -> Result<Option<Account>>;

    /// Looks an account up by canonical email.
    fn find_account_by_email(&mut self, email: &str) -> Result<Option<Account>>;

    fn set_balance(&mut self, account_id: &str, balance: Decimal) -> Result<()>;

    fn insert_transfer(&mut self, record: NewTransferRecord) -> Result<Transfer>;
}

/// New balance for the credited recipient.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipientCredit {
    pub account_id: String,
    pub new_balance: Decimal,
}

/// Balance changes and status decided for a transfer, before persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferPlan {
    pub sender_balance: Decimal,
    /// `None` for demo senders, who never touch a recipient.
    pub recipient_credit: Option<RecipientCredit>,
    pub status: TransferStatus,
}

/// Decides the outcome of a transfer from the current account state.
///
/// Checks run in order: self-transfer, recipient resolution, funds.
/// Demo senders skip the last two and keep their balance.
pub fn plan_transfer(
    sender: &Account,
    recipient: Option<&Account>,
    request: &TransferRequest,
) -> Result<TransferPlan> {
    if sender.email.eq_ignore_ascii_case(&request.recipient_email)
        || recipient.is_some_and(|r| r.id == sender.id)
    {
        return Err(TransferError::SelfTransfer.into());
    }

    let status = if request.schedule_date.is_some() {
        TransferStatus::Pending
    } else {
        TransferStatus::Completed
    };

    if sender.is_demo {
        return Ok(TransferPlan {
            sender_balance: sender.balance,
            recipient_credit: None,
            status,
        });
    }

    let recipient = recipient
        .ok_or_else(|| TransferError::RecipientNotFound(request.recipient_email.clone()))?;

    if sender.balance < request.amount {
        return Err(TransferError::InsufficientFunds {
            available: sender.balance,
            requested: request.amount,
        }
        .into());
    }

    Ok(TransferPlan {
        sender_balance: checked_sub(sender.balance, request.amount, "balance")?,
        recipient_credit: Some(RecipientCredit {
            account_id: recipient.id.clone(),
            new_balance: checked_add(recipient.balance, request.amount, "balance")?,
        }),
        status,
    })
}

/// Runs a transfer end to end against a ledger.
///
/// A repeated idempotency key with a matching fingerprint returns the original
/// transfer and the sender's current balance without mutating anything.
pub fn execute_transfer(
    ledger: &mut dyn TransferLedger,
    request: &TransferRequest,
) -> Result<TransferReceipt> {
    if let Some(key) = request.idempotency_key.as_deref() {
        if let Some(existing) = ledger.find_by_idempotency_key(&request.sender_id, key)? {
            if existing.request_fingerprint.as_deref() != Some(request.fingerprint.as_str()) {
                return Err(TransferError::IdempotencyMismatch(key.to_string()).into());
            }
            let sender = ledger
                .load_account(&request.sender_id)?
                .ok_or(TransferError::SenderNotFound)?;
            debug!(
                "Replaying transfer {} for idempotency key {}",
                existing.id, key
            );
            return Ok(TransferReceipt {
                transfer: existing,
                balance: sender.balance,
                replayed: true,
            });
        }
    }

    let sender = ledger
        .load_account(&request.sender_id)?
        .ok_or(TransferError::SenderNotFound)?;

    let recipient = if sender.is_demo {
        None
    } else {
        ledger.find_account_by_email(&request.recipient_email)?
    };

    let plan = plan_transfer(&sender, recipient.as_ref(), request)?;

    if let Some(credit) = &plan.recipient_credit {
        ledger.set_balance(&sender.id, plan.sender_balance)?;
        ledger.set_balance(&credit.account_id, credit.new_balance)?;
    }

    let transfer = ledger.insert_transfer(NewTransferRecord {
        sender_id: sender.id.clone(),
        recipient_id: plan.recipient_credit.as_ref().map(|c| c.account_id.clone()),
        recipient_email: request.recipient_email.clone(),
        amount: request.amount,
        note: request.note.clone(),
        payment_method: request.payment_method.clone(),
        schedule_date: request.schedule_date,
        status: plan.status,
        idempotency_key: request.idempotency_key.clone(),
        request_fingerprint: request.fingerprint.clone(),
    })?;

    info!(
        "Transfer {} of {} from {} recorded as {}",
        transfer.id, transfer.amount, sender.id, transfer.status
    );

    Ok(TransferReceipt {
        transfer,
        balance: plan.sender_balance,
        replayed: false,
    })
}

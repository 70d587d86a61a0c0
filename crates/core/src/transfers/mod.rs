//! Transfers module - peer-to-peer money movement between accounts.
//!
//! The whole debit/credit/record sequence lives in [`execute_transfer`], which
//! runs against a [`TransferLedger`]. Storage implementations provide a ledger
//! bound to a single database transaction, so the sequence commits or rolls
//! back as one unit.

mod idempotency;
mod transfers_errors;
mod transfers_ledger;
mod transfers_model;
mod transfers_service;
mod transfers_traits;


pub use idempotency::compute_request_fingerprint;
pub use transfers_errors::TransferError;
pub use transfers_ledger::{
    execute_transfer, plan_transfer, RecipientCredit, TransferLedger, TransferPlan,
};
pub use transfers_model::{
    NewTransferRecord, SendMoneyRequest, Transfer, TransferReceipt, TransferRequest,
    TransferStatus,
};
pub use transfers_service::TransferService;
pub use transfers_traits::{TransferRepositoryTrait, TransferServiceTrait};

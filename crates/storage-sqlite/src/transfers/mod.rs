//! SQLite storage implementation for transfers.

mod ledger;
mod model;
mod repository;

pub use ledger::SqliteLedger;
pub use model::TransferDB;
pub use repository::TransferRepository;

//! Fintrack Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for Fintrack: accounts, peer
//! transfers, savings goals, registered cards, and simulated investment orders.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod accounts;
pub mod cards;
pub mod constants;
pub mod errors;
pub mod goals;
pub mod orders;
pub mod transfers;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

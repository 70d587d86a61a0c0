//! SQLite storage implementation for registered cards.

mod model;
mod repository;

pub use model::CardDB;
pub use repository::CardRepository;

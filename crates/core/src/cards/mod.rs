//! Cards module - payment cards registered against an account.
//!
//! Only the last four digits, the expiry and the detected brand are kept.
//! The full number and the security code are checked on registration and
//! then dropped.

mod cards_model;
mod cards_service;
mod cards_traits;


pub use cards_model::{luhn_valid, Card, CardBrand, CardExpiry, NewCard, NewCardRecord};
pub use cards_service::CardService;
pub use cards_traits::{CardRepositoryTrait, CardServiceTrait};

//! Account repository and service traits.
//!
//! These traits define the contract for account operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::accounts_model::{Account, NewAccount};
use crate::errors::Result;

/// Trait defining the contract for Account repository operations.
///
/// Implementations of this trait handle the persistence of account data.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// Creates a new account. The email is expected in canonical form.
    async fn create(&self, new_account: NewAccount) -> Result<Account>;

    /// Deletes an account by its ID.
    ///
    /// Returns the number of deleted records.
    async fn delete(&self, account_id: &str) -> Result<usize>;

    /// Retrieves an account by its ID.
    fn get_by_id(&self, account_id: &str) -> Result<Account>;

    /// Looks an account up by canonical email.
    fn find_by_email(&self, email: &str) -> Result<Option<Account>>;
}

/// Trait defining the contract for Account service operations.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    /// Creates a new account with business validation.
    async fn create_account(&self, new_account: NewAccount) -> Result<Account>;

    /// Deletes an account. Goals and orders go with it; transfers are kept.
    async fn delete_account(&self, account_id: &str) -> Result<()>;

    /// Retrieves an account by its ID.
    fn get_account(&self, account_id: &str) -> Result<Account>;

    /// Balance as presented to the client, with the display fallback applied.
    fn get_display_balance(&self, account_id: &str) -> Result<Decimal>;
}

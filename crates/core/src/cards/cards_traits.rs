use async_trait::async_trait;
use chrono::NaiveDate;

use super::cards_model::{Card, NewCard, NewCardRecord};
use crate::errors::Result;

/// Trait for card repository operations
#[async_trait]
pub trait CardRepositoryTrait: Send + Sync {
    async fn insert_card(&self, account_id: &str, record: NewCardRecord) -> Result<Card>;

    /// Cards registered by the account, newest first.
    fn list_for_account(&self, account_id: &str) -> Result<Vec<Card>>;

    /// Deletes the card only if the account owns it. Returns rows removed.
    async fn delete_for_account(&self, account_id: &str, card_id: &str) -> Result<usize>;
}

/// Trait for card service operations
#[async_trait]
pub trait CardServiceTrait: Send + Sync {
    async fn add_card(
        &self,
        account_id: &str,
        new_card: NewCard,
        today: NaiveDate,
    ) -> Result<Card>;
    fn list_cards(&self, account_id: &str) -> Result<Vec<Card>>;
    async fn delete_card(&self, account_id: &str, card_id: &str) -> Result<()>;
}

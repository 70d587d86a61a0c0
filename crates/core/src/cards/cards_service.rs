use crate::cards::cards_model::{Card, NewCard};
use crate::cards::cards_traits::{CardRepositoryTrait, CardServiceTrait};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use std::sync::Arc;

pub struct CardService {
    card_repo: Arc<dyn CardRepositoryTrait>,
}

impl CardService {
    pub fn new(card_repo: Arc<dyn CardRepositoryTrait>) -> Self {
        CardService { card_repo }
    }
}

#[async_trait]
impl CardServiceTrait for CardService {
    async fn add_card(
        &self,
        account_id: &str,
        new_card: NewCard,
        today: NaiveDate,
    ) -> Result<Card> {
        let record = new_card.into_record(today)?;
        let card = self.card_repo.insert_card(account_id, record).await?;
        debug!(
            "Registered {} card ending {} for account {}",
            card.brand, card.last4, account_id
        );
        Ok(card)
    }

    fn list_cards(&self, account_id: &str) -> Result<Vec<Card>> {
        self.card_repo.list_for_account(account_id)
    }

    async fn delete_card(&self, account_id: &str, card_id: &str) -> Result<()> {
        match self.card_repo.delete_for_account(account_id, card_id).await? {
            0 => Err(Error::NotFound("Card".to_string())),
            _ => Ok(()),
        }
    }
}

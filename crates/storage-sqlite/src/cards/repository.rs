use async_trait::async_trait;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use fintrack_core::cards::{Card, CardRepositoryTrait, NewCardRecord};
use fintrack_core::utils::time_utils::now_naive_utc;
use fintrack_core::Result;

use super::model::CardDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::cards;

pub struct CardRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CardRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CardRepository { pool, writer }
    }
}

#[async_trait]
impl CardRepositoryTrait for CardRepository {
    async fn insert_card(&self, account_id: &str, record: NewCardRecord) -> Result<Card> {
        let owner = account_id.to_string();
        self.writer
            .exec(move |conn| {
                let row =
                    CardDB::from_new(record, owner, Uuid::new_v4().to_string(), now_naive_utc());
                diesel::insert_into(cards::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Card::try_from(row)
            })
            .await
    }

    fn list_for_account(&self, account_id: &str) -> Result<Vec<Card>> {
        let mut conn = get_connection(&self.pool)?;
        cards::table
            .select(CardDB::as_select())
            .filter(cards::account_id.eq(account_id))
            .order((cards::created_at.desc(), cards::id.desc()))
            .load::<CardDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Card::try_from)
            .collect()
    }

    async fn delete_for_account(&self, account_id: &str, card_id: &str) -> Result<usize> {
        let account_id = account_id.to_string();
        let card_id = card_id.to_string();
        self.writer
            .exec(move |conn| {
                let removed = diesel::delete(
                    cards::table
                        .filter(cards::id.eq(&card_id))
                        .filter(cards::account_id.eq(&account_id)),
                )
                .execute(conn)
                .into_core()?;
                debug!("Removed {} card row(s) for {}", removed, card_id);
                Ok(removed)
            })
            .await
    }
}

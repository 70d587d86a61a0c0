use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use fintrack_core::orders::{check_sell_allowed, NewOrder, Order, OrderRepositoryTrait};
use fintrack_core::utils::time_utils::now_naive_utc;
use fintrack_core::Result;

use super::model::OrderDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::orders;

pub struct OrderRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl OrderRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        OrderRepository { pool, writer }
    }
}

fn load_orders(
    conn: &mut SqliteConnection,
    account_id: &str,
    symbol: Option<&str>,
) -> Result<Vec<Order>> {
    let mut query = orders::table
        .select(OrderDB::as_select())
        .filter(orders::account_id.eq(account_id))
        .into_boxed();
    if let Some(symbol) = symbol {
        query = query.filter(orders::symbol.eq(symbol));
    }
    query
        .order((orders::created_at.desc(), orders::id.desc()))
        .load::<OrderDB>(conn)
        .into_core()?
        .into_iter()
        .map(Order::try_from)
        .collect()
}

#[async_trait]
impl OrderRepositoryTrait for OrderRepository {
    async fn place_order(&self, account_id: &str, new_order: NewOrder) -> Result<Order> {
        let account_id = account_id.to_string();
        self.writer
            .exec(move |conn| {
                let held = load_orders(conn, &account_id, Some(&new_order.symbol))?;
                check_sell_allowed(&new_order, &held)?;

                let id = Uuid::new_v4().to_string();
                let row = OrderDB::from_new(new_order, account_id, id, now_naive_utc())?;
                diesel::insert_into(orders::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Order::try_from(row)
            })
            .await
    }

    fn list_for_account(&self, account_id: &str) -> Result<Vec<Order>> {
        let mut conn = get_connection(&self.pool)?;
        load_orders(&mut conn, account_id, None)
    }
}

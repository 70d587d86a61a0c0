//! Database model for orders.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use fintrack_core::orders::{NewOrder, Order, OrderStatus};
use fintrack_core::Result;

use crate::accounts::AccountDB;
use crate::utils::{decimal_to_text, parse_decimal, parse_tag};

#[derive(
    Queryable, Identifiable, Insertable, Associations, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(belongs_to(AccountDB, foreign_key = account_id))]
#[diesel(table_name = crate::schema::orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderDB {
    pub id: String,
    pub account_id: String,
    pub order_type: String,
    pub symbol: String,
    pub name: String,
    pub shares: String,
    pub price: String,
    pub total: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

impl OrderDB {
    /// Row for a placed order. Orders settle immediately.
    pub fn from_new(
        new_order: NewOrder,
        account_id: String,
        id: String,
        now: NaiveDateTime,
    ) -> Result<Self> {
        Ok(Self {
            id,
            account_id,
            order_type: new_order.order_type.as_str().to_string(),
            total: decimal_to_text(new_order.total()?),
            symbol: new_order.symbol,
            name: new_order.name,
            shares: decimal_to_text(new_order.shares),
            price: decimal_to_text(new_order.price),
            status: OrderStatus::Completed.as_str().to_string(),
            created_at: now,
        })
    }
}

impl TryFrom<OrderDB> for Order {
    type Error = fintrack_core::Error;

    fn try_from(db: OrderDB) -> Result<Self> {
        Ok(Self {
            order_type: parse_tag(&db.order_type, "orders.order_type")?,
            shares: parse_decimal(&db.shares, "orders.shares")?,
            price: parse_decimal(&db.price, "orders.price")?,
            total: parse_decimal(&db.total, "orders.total")?,
            status: parse_tag(&db.status, "orders.status")?,
            id: db.id,
            account_id: db.account_id,
            symbol: db.symbol,
            name: db.name,
            created_at: db.created_at,
        })
    }
}

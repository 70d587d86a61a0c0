use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use super::orders_model::{aggregate_holdings, Holding, NewOrder, Order};
use super::orders_traits::{OrderRepositoryTrait, OrderServiceTrait};
use crate::errors::Result;

pub struct OrderService {
    repository: Arc<dyn OrderRepositoryTrait>,
}

impl OrderService {
    pub fn new(repository: Arc<dyn OrderRepositoryTrait>) -> Self {
        OrderService { repository }
    }
}

#[async_trait]
impl OrderServiceTrait for OrderService {
    async fn place_order(&self, account_id: &str, new_order: NewOrder) -> Result<Order> {
        let new_order = new_order.normalized();
        new_order.validate()?;
        let order = self.repository.place_order(account_id, new_order).await?;
        info!(
            "Order {} placed: {} {} {} @ {}",
            order.id, order.order_type, order.shares, order.symbol, order.price
        );
        Ok(order)
    }

    fn list_orders(&self, account_id: &str) -> Result<Vec<Order>> {
        self.repository.list_for_account(account_id)
    }

    fn get_holdings(&self, account_id: &str) -> Result<Vec<Holding>> {
        let orders = self.repository.list_for_account(account_id)?;
        Ok(aggregate_holdings(&orders))
    }
}

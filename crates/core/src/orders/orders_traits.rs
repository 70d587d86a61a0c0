use async_trait::async_trait;

use super::orders_model::{Holding, NewOrder, Order};
use crate::errors::Result;

/// Trait for order repository operations
#[async_trait]
pub trait OrderRepositoryTrait: Send + Sync {
    /// Records a validated order, checking sells against current holdings in
    /// the same write.
    async fn place_order(&self, account_id: &str, new_order: NewOrder) -> Result<Order>;

    /// Orders placed by the account, newest first.
    fn list_for_account(&self, account_id: &str) -> Result<Vec<Order>>;
}

/// Trait for order service operations
#[async_trait]
pub trait OrderServiceTrait: Send + Sync {
    async fn place_order(&self, account_id: &str, new_order: NewOrder) -> Result<Order>;
    fn list_orders(&self, account_id: &str) -> Result<Vec<Order>>;
    fn get_holdings(&self, account_id: &str) -> Result<Vec<Holding>>;
}

//! Orders module - simulated buy and sell orders and the holdings they add up to.
//!
//! Orders are recorded for tracking only; they never move an account's cash
//! balance.

mod orders_errors;
mod orders_model;
mod orders_service;
mod orders_traits;


pub use orders_errors::OrderError;
pub use orders_model::{
    aggregate_holdings, check_sell_allowed, net_shares, Holding, NewOrder, Order, OrderStatus,
    OrderType,
};
pub use orders_service::OrderService;
pub use orders_traits::{OrderRepositoryTrait, OrderServiceTrait};

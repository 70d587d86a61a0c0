//! Order and holding models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::orders_errors::OrderError;
use crate::constants::{MAX_MONEY_AMOUNT, MAX_ORDER_SHARES};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::decimal_utils::{checked_mul, ensure_at_most};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Buy,
    Sell,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Buy => "buy",
            OrderType::Sell => "sell",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "buy" => Ok(OrderType::Buy),
            "sell" => Ok(OrderType::Sell),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown order type '{}'",
                other
            )))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Failed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "completed" => Ok(OrderStatus::Completed),
            "failed" => Ok(OrderStatus::Failed),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown order status '{}'",
                other
            )))),
        }
    }
}

/// A recorded buy or sell order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub account_id: String,
    pub order_type: OrderType,
    pub symbol: String,
    pub name: String,
    pub shares: Decimal,
    pub price: Decimal,
    /// `shares × price`, fixed at placement.
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
}

/// Input model for placing an order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewOrder {
    pub order_type: OrderType,
    pub symbol: String,
    pub name: String,
    pub shares: Decimal,
    pub price: Decimal,
}

impl NewOrder {
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "symbol".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if self.shares <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::field(
                "shares",
                "must be greater than zero",
            )));
        }
        if self.price <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::field(
                "price",
                "must be greater than zero",
            )));
        }
        ensure_at_most(self.shares, MAX_ORDER_SHARES, "shares")?;
        ensure_at_most(self.price, MAX_MONEY_AMOUNT, "price")?;
        Ok(())
    }

    /// Returns a copy with an upper-case symbol and trimmed name.
    pub fn normalized(self) -> Self {
        Self {
            symbol: self.symbol.trim().to_uppercase(),
            name: self.name.trim().to_string(),
            ..self
        }
    }

    pub fn total(&self) -> Result<Decimal> {
        checked_mul(self.shares, self.price, "total")
    }
}

/// Net shares held of `symbol` across completed orders.
pub fn net_shares(orders: &[Order], symbol: &str) -> Decimal {
    orders
        .iter()
        .filter(|o| o.symbol == symbol && o.status == OrderStatus::Completed)
        .fold(Decimal::ZERO, |held, o| match o.order_type {
            OrderType::Buy => held.saturating_add(o.shares),
            OrderType::Sell => held.saturating_sub(o.shares),
        })
}

/// Rejects a sell that exceeds the shares held in `existing`.
pub fn check_sell_allowed(order: &NewOrder, existing: &[Order]) -> Result<()> {
    if order.order_type != OrderType::Sell {
        return Ok(());
    }
    let held = net_shares(existing, &order.symbol);
    if order.shares > held {
        return Err(OrderError::InsufficientShares {
            symbol: order.symbol.clone(),
            held,
            requested: order.shares,
        }
        .into());
    }
    Ok(())
}

/// Current position in one symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    pub shares: Decimal,
    /// Sum of all completed buy totals.
    pub total_cost: Decimal,
    pub average_price: Decimal,
}

#[derive(Default)]
struct HoldingAcc {
    name: String,
    bought: Decimal,
    sold: Decimal,
    cost: Decimal,
}

/// Folds completed orders into per-symbol holdings, sorted by symbol.
///
/// Symbols with no shares left are omitted.
pub fn aggregate_holdings(orders: &[Order]) -> Vec<Holding> {
    let mut by_symbol: BTreeMap<&str, HoldingAcc> = BTreeMap::new();
    for order in orders.iter().filter(|o| o.status == OrderStatus::Completed) {
        let acc = by_symbol.entry(order.symbol.as_str()).or_default();
        if acc.name.is_empty() {
            acc.name = order.name.clone();
        }
        match order.order_type {
            OrderType::Buy => {
                acc.bought = acc.bought.saturating_add(order.shares);
                acc.cost = acc.cost.saturating_add(order.total);
            }
            OrderType::Sell => acc.sold = acc.sold.saturating_add(order.shares),
        }
    }

    by_symbol
        .into_iter()
        .filter_map(|(symbol, acc)| {
            let shares = acc.bought.saturating_sub(acc.sold);
            if shares <= Decimal::ZERO {
                return None;
            }
            let average_price = acc.cost.checked_div(acc.bought).unwrap_or(Decimal::ZERO);
            Some(Holding {
                symbol: symbol.to_string(),
                name: acc.name,
                shares,
                total_cost: acc.cost,
                average_price,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn order(order_type: OrderType, symbol: &str, shares: Decimal, price: Decimal) -> Order {
        Order {
            id: format!("{}-{}", symbol, shares),
            account_id: "alice".to_string(),
            order_type,
            symbol: symbol.to_string(),
            name: format!("{} Inc", symbol),
            shares,
            price,
            total: shares * price,
            status: OrderStatus::Completed,
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn holdings_net_buys_against_sells() {
        let orders = vec![
            order(OrderType::Buy, "AAPL", dec!(10), dec!(100)),
            order(OrderType::Buy, "AAPL", dec!(10), dec!(200)),
            order(OrderType::Sell, "AAPL", dec!(5), dec!(250)),
            order(OrderType::Buy, "MSFT", dec!(2), dec!(300)),
            order(OrderType::Sell, "MSFT", dec!(2), dec!(310)),
        ];

        let holdings = aggregate_holdings(&orders);

        assert_eq!(holdings.len(), 1);
        let aapl = &holdings[0];
        assert_eq!(aapl.symbol, "AAPL");
        assert_eq!(aapl.shares, dec!(15));
        assert_eq!(aapl.total_cost, dec!(3000));
        assert_eq!(aapl.average_price, dec!(150));
    }

    #[test]
    fn failed_orders_are_ignored() {
        let mut failed = order(OrderType::Buy, "TSLA", dec!(3), dec!(10));
        failed.status = OrderStatus::Failed;
        assert!(aggregate_holdings(&[failed.clone()]).is_empty());
        assert_eq!(net_shares(&[failed], "TSLA"), dec!(0));
    }

    #[test]
    fn selling_more_than_held_is_rejected() {
        let existing = vec![order(OrderType::Buy, "AAPL", dec!(3), dec!(100))];
        let sell = NewOrder {
            order_type: OrderType::Sell,
            symbol: "AAPL".to_string(),
            name: "Apple".to_string(),
            shares: dec!(4),
            price: dec!(100),
        };
        let err = check_sell_allowed(&sell, &existing).unwrap_err();
        assert!(matches!(
            err,
            Error::Order(OrderError::InsufficientShares { .. })
        ));

        let sell = NewOrder {
            shares: dec!(3),
            ..sell
        };
        assert!(check_sell_allowed(&sell, &existing).is_ok());
    }

    #[test]
    fn new_order_normalizes_and_validates() {
        let order = NewOrder {
            order_type: OrderType::Buy,
            symbol: " aapl ".to_string(),
            name: "Apple".to_string(),
            shares: dec!(2.5),
            price: dec!(10),
        }
        .normalized();
        assert_eq!(order.symbol, "AAPL");
        assert_eq!(order.total().unwrap(), dec!(25));
        assert!(order.validate().is_ok());

        let bad = NewOrder {
            shares: dec!(0),
            ..order
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn oversized_orders_fail_validation_instead_of_overflowing() {
        let order = NewOrder {
            order_type: OrderType::Buy,
            symbol: "AAPL".to_string(),
            name: "Apple".to_string(),
            shares: dec!(10000000000000000),
            price: dec!(10000000000000000),
        };
        assert!(matches!(order.validate(), Err(Error::Validation(_))));
        assert!(matches!(order.total(), Err(Error::Validation(_))));

        let capped = NewOrder {
            shares: MAX_ORDER_SHARES,
            price: MAX_MONEY_AMOUNT,
            ..order
        };
        assert!(capped.validate().is_ok());
        assert_eq!(capped.total().unwrap(), dec!(1000000000000000000000));
    }
}

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use fintrack_core::accounts as core_accounts;
use fintrack_core::cards as core_cards;
use fintrack_core::goals as core_goals;
use fintrack_core::orders as core_orders;
use fintrack_core::transfers as core_transfers;

// ===================== Accounts =====================

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    #[schema(value_type = f64)]
    pub balance: Decimal,
    pub is_demo: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_accounts::Account> for Account {
    fn from(a: core_accounts::Account) -> Self {
        Self {
            id: a.id,
            name: a.name,
            email: a.email,
            balance: a.balance,
            is_demo: a.is_demo,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_demo: bool,
}

impl From<NewAccount> for core_accounts::NewAccount {
    fn from(a: NewAccount) -> Self {
        Self {
            name: a.name,
            email: a.email,
            is_demo: a.is_demo,
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AccountCreated {
    pub account: Account,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct BalanceResponse {
    #[schema(value_type = f64)]
    pub balance: Decimal,
}

// ===================== Transactions =====================

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub sender_id: String,
    pub recipient_id: Option<String>,
    pub recipient_email: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub note: String,
    pub payment_method: String,
    pub schedule_date: Option<DateTime<Utc>>,
    /// `pending` or `completed`.
    pub status: String,
    pub idempotency_key: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_transfers::Transfer> for Transaction {
    fn from(t: core_transfers::Transfer) -> Self {
        Self {
            id: t.id,
            sender_id: t.sender_id,
            recipient_id: t.recipient_id,
            recipient_email: t.recipient_email,
            amount: t.amount,
            note: t.note,
            payment_method: t.payment_method,
            schedule_date: t.schedule_date,
            status: t.status.to_string(),
            idempotency_key: t.idempotency_key,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SendMoneyRequest {
    pub recipient_email: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub schedule_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

impl From<SendMoneyRequest> for core_transfers::SendMoneyRequest {
    fn from(r: SendMoneyRequest) -> Self {
        Self {
            recipient_email: r.recipient_email,
            amount: r.amount,
            note: r.note,
            payment_method: r.payment_method,
            schedule_date: r.schedule_date,
            idempotency_key: r.idempotency_key,
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct SendMoneyResponse {
    pub success: bool,
    pub transaction: Transaction,
    /// Sender balance after the transfer.
    #[schema(value_type = f64)]
    pub balance: Decimal,
    /// Set when an earlier transaction was returned for a repeated key.
    pub replayed: bool,
}

impl From<core_transfers::TransferReceipt> for SendMoneyResponse {
    fn from(receipt: core_transfers::TransferReceipt) -> Self {
        Self {
            success: true,
            transaction: receipt.transfer.into(),
            balance: receipt.balance,
            replayed: receipt.replayed,
        }
    }
}

// ===================== Goals =====================

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub account_id: String,
    pub name: String,
    pub description: String,
    #[schema(value_type = f64)]
    pub current: Decimal,
    #[schema(value_type = f64)]
    pub target: Decimal,
    #[schema(value_type = f64)]
    pub monthly_contribution: Decimal,
    pub deadline: NaiveDate,
    pub category: String,
    pub icon: String,
    pub priority: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_goals::Goal> for Goal {
    fn from(g: core_goals::Goal) -> Self {
        Self {
            id: g.id,
            account_id: g.account_id,
            name: g.name,
            description: g.description,
            current: g.current,
            target: g.target,
            monthly_contribution: g.monthly_contribution,
            deadline: g.deadline,
            category: g.category.to_string(),
            icon: g.icon.to_string(),
            priority: g.priority.to_string(),
            created_at: g.created_at,
            updated_at: g.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewGoal {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[schema(value_type = f64)]
    pub target: Decimal,
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub monthly_contribution: Option<Decimal>,
    pub deadline: NaiveDate,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "travel")]
    pub category: Option<core_goals::GoalCategory>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "plane")]
    pub icon: Option<core_goals::GoalIcon>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "high")]
    pub priority: Option<core_goals::GoalPriority>,
}

impl From<NewGoal> for core_goals::NewGoal {
    fn from(g: NewGoal) -> Self {
        Self {
            name: g.name,
            description: g.description,
            target: g.target,
            monthly_contribution: g.monthly_contribution,
            deadline: g.deadline,
            category: g.category,
            icon: g.icon,
            priority: g.priority,
        }
    }
}

/// Partial goal update. `current` is not accepted here.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GoalUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub target: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub monthly_contribution: Option<Decimal>,
    pub deadline: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub category: Option<core_goals::GoalCategory>,
    #[schema(value_type = Option<String>)]
    pub icon: Option<core_goals::GoalIcon>,
    #[schema(value_type = Option<String>)]
    pub priority: Option<core_goals::GoalPriority>,
}

impl From<GoalUpdate> for core_goals::GoalUpdate {
    fn from(u: GoalUpdate) -> Self {
        Self {
            name: u.name,
            description: u.description,
            target: u.target,
            monthly_contribution: u.monthly_contribution,
            deadline: u.deadline,
            category: u.category,
            icon: u.icon,
            priority: u.priority,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GoalContribution {
    #[schema(value_type = f64)]
    pub amount: Decimal,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct GoalContributionResponse {
    pub success: bool,
    pub goal: Goal,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal_id: String,
    #[schema(value_type = f64)]
    pub current: Decimal,
    #[schema(value_type = f64)]
    pub target: Decimal,
    #[schema(value_type = f64)]
    pub remaining: Decimal,
    #[schema(value_type = f64)]
    pub progress_percentage: Decimal,
    pub days_to_deadline: i64,
    pub months_to_goal: i64,
    pub is_on_track: bool,
}

impl From<core_goals::GoalProgress> for GoalProgress {
    fn from(p: core_goals::GoalProgress) -> Self {
        Self {
            goal_id: p.goal_id,
            current: p.current,
            target: p.target,
            remaining: p.remaining,
            progress_percentage: p.progress_percentage,
            days_to_deadline: p.days_to_deadline,
            months_to_goal: p.months_to_goal,
            is_on_track: p.is_on_track,
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct SuccessResponse {
    pub success: bool,
}

// ===================== Orders =====================

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub account_id: String,
    /// `buy` or `sell`.
    pub order_type: String,
    pub symbol: String,
    pub name: String,
    #[schema(value_type = f64)]
    pub shares: Decimal,
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[schema(value_type = f64)]
    pub total: Decimal,
    pub status: String,
    pub created_at: NaiveDateTime,
}

impl From<core_orders::Order> for Order {
    fn from(o: core_orders::Order) -> Self {
        Self {
            id: o.id,
            account_id: o.account_id,
            order_type: o.order_type.to_string(),
            symbol: o.symbol,
            name: o.name,
            shares: o.shares,
            price: o.price,
            total: o.total,
            status: o.status.to_string(),
            created_at: o.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewOrder {
    #[schema(value_type = String, example = "buy")]
    pub order_type: core_orders::OrderType,
    pub symbol: String,
    pub name: String,
    #[schema(value_type = f64)]
    pub shares: Decimal,
    #[schema(value_type = f64)]
    pub price: Decimal,
}

impl From<NewOrder> for core_orders::NewOrder {
    fn from(o: NewOrder) -> Self {
        Self {
            order_type: o.order_type,
            symbol: o.symbol,
            name: o.name,
            shares: o.shares,
            price: o.price,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    #[schema(value_type = f64)]
    pub shares: Decimal,
    #[schema(value_type = f64)]
    pub total_cost: Decimal,
    #[schema(value_type = f64)]
    pub average_price: Decimal,
}

impl From<core_orders::Holding> for Holding {
    fn from(h: core_orders::Holding) -> Self {
        Self {
            symbol: h.symbol,
            name: h.name,
            shares: h.shares,
            total_cost: h.total_cost,
            average_price: h.average_price,
        }
    }
}

// ===================== Cards =====================

/// A registered card. The number and security code are never returned.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub account_id: String,
    pub card_name: String,
    #[schema(example = "4242")]
    pub last4: String,
    #[schema(example = "09/29")]
    pub expiry_date: String,
    #[schema(example = "visa")]
    pub brand: String,
    pub created_at: NaiveDateTime,
}

impl From<core_cards::Card> for Card {
    fn from(c: core_cards::Card) -> Self {
        Self {
            id: c.id,
            account_id: c.account_id,
            card_name: c.card_name,
            last4: c.last4,
            expiry_date: c.expiry_date,
            brand: c.brand.to_string(),
            created_at: c.created_at,
        }
    }
}

#[derive(Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCard {
    #[schema(example = "4242 4242 4242 4242")]
    pub card_number: String,
    pub card_name: String,
    #[schema(example = "09/29")]
    pub expiry_date: String,
    #[schema(example = "123")]
    pub cvv: String,
}

impl From<NewCard> for core_cards::NewCard {
    fn from(c: NewCard) -> Self {
        Self {
            card_number: c.card_number,
            card_name: c.card_name,
            expiry_date: c.expiry_date,
            cvv: c.cvv,
        }
    }
}

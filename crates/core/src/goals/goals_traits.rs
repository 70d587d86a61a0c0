use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalUpdate, NewGoal};
use crate::goals::goals_progress::GoalProgress;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    /// Goals owned by the account, newest first.
    fn load_goals_for_account(&self, account_id: &str) -> Result<Vec<Goal>>;
    fn get_goal(&self, goal_id: &str) -> Result<Goal>;
    async fn insert_new_goal(&self, account_id: &str, new_goal: NewGoal) -> Result<Goal>;
    /// Persists the editable fields of `goal`. `current` is left untouched.
    async fn update_goal(&self, goal: Goal) -> Result<Goal>;
    async fn delete_goal(&self, goal_id: &str) -> Result<usize>;
    /// Adds `amount` to a goal owned by `account_id` in a single write.
    async fn contribute(&self, goal_id: &str, account_id: &str, amount: Decimal) -> Result<Goal>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self, account_id: &str) -> Result<Vec<Goal>>;
    fn get_goal(&self, account_id: &str, goal_id: &str) -> Result<Goal>;
    async fn create_goal(&self, account_id: &str, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, account_id: &str, goal_id: &str, update: GoalUpdate)
        -> Result<Goal>;
    async fn delete_goal(&self, account_id: &str, goal_id: &str) -> Result<usize>;
    async fn contribute(&self, account_id: &str, goal_id: &str, amount: Decimal) -> Result<Goal>;
    fn get_progress(&self, account_id: &str, goal_id: &str, now: DateTime<Utc>)
        -> Result<GoalProgress>;
}

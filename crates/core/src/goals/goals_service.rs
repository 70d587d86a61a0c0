use crate::errors::{Error, Result, ValidationError};
use crate::goals::goals_errors::GoalError;
use crate::goals::goals_model::{Goal, GoalUpdate, NewGoal};
use crate::goals::goals_progress::GoalProgress;
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

pub struct GoalService {
    goal_repo: Arc<dyn GoalRepositoryTrait>,
}

impl GoalService {
    pub fn new(goal_repo: Arc<dyn GoalRepositoryTrait>) -> Self {
        GoalService { goal_repo }
    }

    /// Loads a goal, hiding goals that belong to other accounts.
    fn owned_goal(&self, account_id: &str, goal_id: &str) -> Result<Goal> {
        let goal = self.goal_repo.get_goal(goal_id)?;
        if !goal.is_owned_by(account_id) {
            return Err(GoalError::NotFound(goal_id.to_string()).into());
        }
        Ok(goal)
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self, account_id: &str) -> Result<Vec<Goal>> {
        self.goal_repo.load_goals_for_account(account_id)
    }

    fn get_goal(&self, account_id: &str, goal_id: &str) -> Result<Goal> {
        self.owned_goal(account_id, goal_id)
    }

    async fn create_goal(&self, account_id: &str, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;
        let goal = self.goal_repo.insert_new_goal(account_id, new_goal).await?;
        debug!("Created goal {} for account {}", goal.id, account_id);
        Ok(goal)
    }

    async fn update_goal(
        &self,
        account_id: &str,
        goal_id: &str,
        update: GoalUpdate,
    ) -> Result<Goal> {
        if update.is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "No fields to update".to_string(),
            )));
        }
        update.validate()?;
        let mut goal = self.owned_goal(account_id, goal_id)?;
        update.apply_to(&mut goal);
        self.goal_repo.update_goal(goal).await
    }

    async fn delete_goal(&self, account_id: &str, goal_id: &str) -> Result<usize> {
        self.owned_goal(account_id, goal_id)?;
        self.goal_repo.delete_goal(goal_id).await
    }

    async fn contribute(&self, account_id: &str, goal_id: &str, amount: Decimal) -> Result<Goal> {
        if amount <= Decimal::ZERO {
            return Err(GoalError::InvalidContribution(amount).into());
        }
        let goal = self.goal_repo.contribute(goal_id, account_id, amount).await?;
        debug!(
            "Contributed {} to goal {} (now {} of {})",
            amount, goal.id, goal.current, goal.target
        );
        Ok(goal)
    }

    fn get_progress(
        &self,
        account_id: &str,
        goal_id: &str,
        now: DateTime<Utc>,
    ) -> Result<GoalProgress> {
        let goal = self.owned_goal(account_id, goal_id)?;
        Ok(GoalProgress::compute(&goal, now))
    }
}

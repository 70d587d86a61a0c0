use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use fintrack_core::goals::{apply_contribution, Goal, GoalError, GoalRepositoryTrait, NewGoal};
use fintrack_core::utils::time_utils::now_naive_utc;
use fintrack_core::Result;

use super::model::GoalDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::goals;
use crate::utils::decimal_to_text;

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

fn load_goal(conn: &mut SqliteConnection, goal_id: &str) -> Result<Goal> {
    goals::table
        .select(GoalDB::as_select())
        .find(goal_id)
        .first::<GoalDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| GoalError::NotFound(goal_id.to_string()).into())
        .and_then(Goal::try_from)
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn load_goals_for_account(&self, account_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        goals::table
            .select(GoalDB::as_select())
            .filter(goals::account_id.eq(account_id))
            .order((goals::created_at.desc(), goals::id.desc()))
            .load::<GoalDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Goal::try_from)
            .collect()
    }

    fn get_goal(&self, goal_id: &str) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        load_goal(&mut conn, goal_id)
    }

    async fn insert_new_goal(&self, account_id: &str, new_goal: NewGoal) -> Result<Goal> {
        let owner = account_id.to_string();
        self.writer
            .exec(move |conn| {
                let row =
                    GoalDB::from_new(new_goal, owner, Uuid::new_v4().to_string(), now_naive_utc());
                diesel::insert_into(goals::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Goal::try_from(row)
            })
            .await
    }

    async fn update_goal(&self, goal: Goal) -> Result<Goal> {
        self.writer
            .exec(move |conn| {
                let updated = diesel::update(goals::table.find(&goal.id))
                    .set((
                        goals::name.eq(&goal.name),
                        goals::description.eq(&goal.description),
                        goals::target.eq(decimal_to_text(goal.target)),
                        goals::monthly_contribution.eq(decimal_to_text(goal.monthly_contribution)),
                        goals::deadline.eq(goal.deadline),
                        goals::category.eq(goal.category.as_str()),
                        goals::icon.eq(goal.icon.as_str()),
                        goals::priority.eq(goal.priority.as_str()),
                        goals::updated_at.eq(now_naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;
                if updated == 0 {
                    return Err(GoalError::NotFound(goal.id.clone()).into());
                }
                load_goal(conn, &goal.id)
            })
            .await
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<usize> {
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(goals::table.find(goal_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    async fn contribute(&self, goal_id: &str, account_id: &str, amount: Decimal) -> Result<Goal> {
        let goal_id = goal_id.to_string();
        let account_id = account_id.to_string();
        self.writer
            .exec(move |conn| {
                let mut goal = load_goal(conn, &goal_id)?;
                apply_contribution(&mut goal, &account_id, amount)?;
                goal.updated_at = now_naive_utc();
                diesel::update(goals::table.find(&goal.id))
                    .set((
                        goals::current.eq(decimal_to_text(goal.current)),
                        goals::updated_at.eq(goal.updated_at),
                    ))
                    .execute(conn)
                    .into_core()?;
                debug!("Goal {} now at {}", goal.id, goal.current);
                Ok(goal)
            })
            .await
    }
}

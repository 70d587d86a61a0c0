//! Database models for goals.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use fintrack_core::goals::{Goal, NewGoal};
use fintrack_core::Result;

use crate::accounts::AccountDB;
use crate::utils::{decimal_to_text, parse_decimal, parse_tag};

/// Database model for goals
#[derive(
    Queryable, Identifiable, Insertable, Associations, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(belongs_to(AccountDB, foreign_key = account_id))]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    pub id: String,
    pub account_id: String,
    pub name: String,
    pub description: String,
    pub current: String,
    pub target: String,
    pub monthly_contribution: String,
    pub deadline: NaiveDate,
    pub category: String,
    pub icon: String,
    pub priority: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl GoalDB {
    /// Row for a new goal with defaults applied and `current` at zero.
    pub fn from_new(new_goal: NewGoal, account_id: String, id: String, now: NaiveDateTime) -> Self {
        Self {
            id,
            account_id,
            name: new_goal.name.trim().to_string(),
            description: new_goal
                .description
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
            current: "0".to_string(),
            target: decimal_to_text(new_goal.target),
            monthly_contribution: decimal_to_text(
                new_goal.monthly_contribution.unwrap_or_default(),
            ),
            deadline: new_goal.deadline,
            category: new_goal.category.unwrap_or_default().as_str().to_string(),
            icon: new_goal.icon.unwrap_or_default().as_str().to_string(),
            priority: new_goal.priority.unwrap_or_default().as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<GoalDB> for Goal {
    type Error = fintrack_core::Error;

    fn try_from(db: GoalDB) -> Result<Self> {
        Ok(Self {
            current: parse_decimal(&db.current, "goals.current")?,
            target: parse_decimal(&db.target, "goals.target")?,
            monthly_contribution: parse_decimal(
                &db.monthly_contribution,
                "goals.monthly_contribution",
            )?,
            category: parse_tag(&db.category, "goals.category")?,
            icon: parse_tag(&db.icon, "goals.icon")?,
            priority: parse_tag(&db.priority, "goals.priority")?,
            id: db.id,
            account_id: db.account_id,
            name: db.name,
            description: db.description,
            deadline: db.deadline,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

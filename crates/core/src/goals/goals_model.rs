//! Goals domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::goals_errors::GoalError;
use crate::constants::{GOAL_DESCRIPTION_MAX_CHARS, GOAL_NAME_MAX_CHARS, MAX_MONEY_AMOUNT};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::decimal_utils::{checked_add, ensure_at_most};

macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident default $default:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                        "Unknown {} '{}'",
                        stringify!($name),
                        other
                    )))),
                }
            }
        }
    };
}

text_enum!(
    /// What a goal is saving for.
    GoalCategory default Emergency {
        Emergency => "emergency",
        Travel => "travel",
        Transportation => "transportation",
        Housing => "housing",
        Education => "education",
        Health => "health",
        Business => "business",
        Tech => "tech",
    }
);

text_enum!(
    GoalIcon default Shield {
        Shield => "shield",
        Plane => "plane",
        Car => "car",
        Home => "home",
        Education => "education",
        Health => "health",
        Business => "business",
        Tech => "tech",
        Target => "target",
    }
);

text_enum!(
    GoalPriority default Medium {
        High => "high",
        Medium => "medium",
        Low => "low",
    }
);

/// Domain model representing a savings goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub account_id: String,
    pub name: String,
    pub description: String,
    /// Amount saved so far. Grows only through contributions.
    pub current: Decimal,
    pub target: Decimal,
    pub monthly_contribution: Decimal,
    pub deadline: NaiveDate,
    pub category: GoalCategory,
    pub icon: GoalIcon,
    pub priority: GoalPriority,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Goal {
    pub fn is_owned_by(&self, account_id: &str) -> bool {
        self.account_id == account_id
    }
}

fn validate_name(name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "name".to_string(),
        )));
    }
    if name.chars().count() > GOAL_NAME_MAX_CHARS {
        return Err(Error::Validation(ValidationError::field(
            "name",
            format!("cannot exceed {} characters", GOAL_NAME_MAX_CHARS),
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<()> {
    if description.trim().chars().count() > GOAL_DESCRIPTION_MAX_CHARS {
        return Err(Error::Validation(ValidationError::field(
            "description",
            format!("cannot exceed {} characters", GOAL_DESCRIPTION_MAX_CHARS),
        )));
    }
    Ok(())
}

fn validate_target(target: Decimal) -> Result<()> {
    if target <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::field(
            "target",
            "must be greater than zero",
        )));
    }
    ensure_at_most(target, MAX_MONEY_AMOUNT, "target")
}

fn validate_monthly_contribution(amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(Error::Validation(ValidationError::field(
            "monthlyContribution",
            "cannot be negative",
        )));
    }
    ensure_at_most(amount, MAX_MONEY_AMOUNT, "monthlyContribution")
}

/// Input model for creating a new goal
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewGoal {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub target: Decimal,
    #[serde(default)]
    pub monthly_contribution: Option<Decimal>,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub category: Option<GoalCategory>,
    #[serde(default)]
    pub icon: Option<GoalIcon>,
    #[serde(default)]
    pub priority: Option<GoalPriority>,
}

impl NewGoal {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        validate_target(self.target)?;
        if let Some(amount) = self.monthly_contribution {
            validate_monthly_contribution(amount)?;
        }
        Ok(())
    }
}

/// Partial update of a goal. `current` is deliberately absent.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GoalUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub target: Option<Decimal>,
    pub monthly_contribution: Option<Decimal>,
    pub deadline: Option<NaiveDate>,
    pub category: Option<GoalCategory>,
    pub icon: Option<GoalIcon>,
    pub priority: Option<GoalPriority>,
}

impl GoalUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let Some(target) = self.target {
            validate_target(target)?;
        }
        if let Some(amount) = self.monthly_contribution {
            validate_monthly_contribution(amount)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.target.is_none()
            && self.monthly_contribution.is_none()
            && self.deadline.is_none()
            && self.category.is_none()
            && self.icon.is_none()
            && self.priority.is_none()
    }

    /// Applies the present fields onto `goal`.
    pub fn apply_to(self, goal: &mut Goal) {
        if let Some(name) = self.name {
            goal.name = name.trim().to_string();
        }
        if let Some(description) = self.description {
            goal.description = description.trim().to_string();
        }
        if let Some(target) = self.target {
            goal.target = target;
        }
        if let Some(amount) = self.monthly_contribution {
            goal.monthly_contribution = amount;
        }
        if let Some(deadline) = self.deadline {
            goal.deadline = deadline;
        }
        if let Some(category) = self.category {
            goal.category = category;
        }
        if let Some(icon) = self.icon {
            goal.icon = icon;
        }
        if let Some(priority) = self.priority {
            goal.priority = priority;
        }
    }
}

/// Adds a contribution to a goal owned by `account_id`.
///
/// Overshooting the target is allowed.
pub fn apply_contribution(goal: &mut Goal, account_id: &str, amount: Decimal) -> Result<()> {
    if !goal.is_owned_by(account_id) {
        return Err(GoalError::NotFound(goal.id.clone()).into());
    }
    if amount <= Decimal::ZERO {
        return Err(GoalError::InvalidContribution(amount).into());
    }
    ensure_at_most(amount, MAX_MONEY_AMOUNT, "amount")?;
    goal.current = checked_add(goal.current, amount, "current")?;
    Ok(())
}

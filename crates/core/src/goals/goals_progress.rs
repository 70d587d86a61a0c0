//! Progress figures derived from a goal. Pure and recomputed on every read.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::goals_model::Goal;
use crate::constants::DAYS_PER_MONTH;
use crate::utils::time_utils::{ceil_days_between, start_of_day_utc};

/// Share of the target reached, as a percentage clamped to `0..=100`.
///
/// A non-positive target reports zero progress.
pub fn progress_percentage(current: Decimal, target: Decimal) -> Decimal {
    if target <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    // An overflowing quotient is far past the target.
    let ratio = match current.checked_div(target) {
        Some(ratio) => ratio.clamp(Decimal::ZERO, Decimal::ONE),
        None if current.is_sign_negative() => Decimal::ZERO,
        None => Decimal::ONE,
    };
    ratio * dec!(100)
}

/// Days until the deadline (00:00 UTC), rounded up. Negative once passed.
pub fn days_to_deadline(deadline: chrono::NaiveDate, now: DateTime<Utc>) -> i64 {
    ceil_days_between(now, start_of_day_utc(deadline))
}

/// Months of contributions still needed, rounded up.
///
/// Zero when there is no monthly contribution. Saturates at the `i64` range.
pub fn months_to_goal(current: Decimal, target: Decimal, monthly_contribution: Decimal) -> i64 {
    if monthly_contribution <= Decimal::ZERO {
        return 0;
    }
    let outstanding = target.saturating_sub(current);
    match outstanding
        .checked_div(monthly_contribution)
        .and_then(|months| months.ceil().to_i64())
    {
        Some(months) => months,
        None if outstanding.is_sign_negative() => i64::MIN,
        None => i64::MAX,
    }
}

pub fn is_on_track(
    current: Decimal,
    target: Decimal,
    months_to_goal: i64,
    days_to_deadline: i64,
) -> bool {
    let months_left = Decimal::from(days_to_deadline) / Decimal::from(DAYS_PER_MONTH);
    Decimal::from(months_to_goal) <= months_left || current >= target
}

/// Derived progress of a goal at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal_id: String,
    pub current: Decimal,
    pub target: Decimal,
    pub remaining: Decimal,
    pub progress_percentage: Decimal,
    pub days_to_deadline: i64,
    pub months_to_goal: i64,
    pub is_on_track: bool,
}

impl GoalProgress {
    pub fn compute(goal: &Goal, now: DateTime<Utc>) -> Self {
        let days = days_to_deadline(goal.deadline, now);
        let months = months_to_goal(goal.current, goal.target, goal.monthly_contribution);
        GoalProgress {
            goal_id: goal.id.clone(),
            current: goal.current,
            target: goal.target,
            remaining: goal.target.saturating_sub(goal.current).max(Decimal::ZERO),
            progress_percentage: progress_percentage(goal.current, goal.target),
            days_to_deadline: days,
            months_to_goal: months,
            is_on_track: is_on_track(goal.current, goal.target, months, days),
        }
    }
}

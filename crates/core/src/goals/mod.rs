//! Goals module - savings goals, contributions, and derived progress.

mod goals_errors;
mod goals_model;
mod goals_progress;
mod goals_service;
mod goals_traits;


pub use goals_errors::GoalError;
pub use goals_model::{
    apply_contribution, Goal, GoalCategory, GoalIcon, GoalPriority, GoalUpdate, NewGoal,
};
pub use goals_progress::{
    days_to_deadline, is_on_track, months_to_goal, progress_percentage, GoalProgress,
};
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};

pub mod api_connection;
pub mod cli;
pub mod config;
pub mod energy;
pub mod meal;
pub mod planner;
pub mod profile;
pub mod prompts;
pub mod records;
pub mod templates;
pub mod tracker;

pub use config::{GenerationMode, PlannerConfig, PlannerError};
pub use meal::{DayPlan, Meal, MealSlot, WeeklyMealPlan, Weekday};
pub use planner::{MealPlanner, PlanSource, Sourced};
pub use profile::{normalize, ActivityLevel, Profile, RawProfile};

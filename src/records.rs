use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::meal::{Weekday, WeeklyMealPlan};
use crate::planner::{PlanSource, Sourced};

pub const GENERATED_PLAN_NAME: &str = "AI-Generated Personalized Plan";
pub const TEMPLATE_PLAN_NAME: &str = "Personalized Template Plan";

/// Shape of a meal plan as stored by the hosted data store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanRecord {
    pub user_id: String,
    pub plan_name: String,
    pub meals: WeeklyMealPlan,
    pub calories_target: u32,
    pub source: PlanSource,
    pub created_at: DateTime<Utc>,
}

impl MealPlanRecord {
    /// `calories_target` is the total of the plan's first day.
    pub fn from_outcome(
        user_id: impl Into<String>,
        outcome: Sourced<WeeklyMealPlan>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let plan_name = match outcome.source {
            PlanSource::Generated => GENERATED_PLAN_NAME,
            PlanSource::Template => TEMPLATE_PLAN_NAME,
        };
        MealPlanRecord {
            user_id: user_id.into(),
            plan_name: plan_name.to_string(),
            calories_target: outcome.value.daily_calories(Weekday::Monday),
            meals: outcome.value,
            source: outcome.source,
            created_at,
        }
    }

    pub async fn write_json(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize meal plan record")?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write meal plan record to '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::build_template_week;
    use chrono::TimeZone;

    #[test]
    fn test_record_from_template_outcome() {
        let created_at = Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap();
        let outcome = Sourced::template(build_template_week(2002));
        let record = MealPlanRecord::from_outcome("user-1", outcome, created_at);
        assert_eq!(record.plan_name, TEMPLATE_PLAN_NAME);
        // per-slot rounding drifts: 501 + 701 + 601 + 200
        assert_eq!(record.calories_target, 2003);
        assert_eq!(record.source, PlanSource::Template);
    }

    #[test]
    fn test_record_from_generated_outcome() {
        let outcome = Sourced::generated(build_template_week(2000));
        let record = MealPlanRecord::from_outcome("user-2", outcome, Utc::now());
        assert_eq!(record.plan_name, GENERATED_PLAN_NAME);
        assert_eq!(record.calories_target, 2000);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["source"], "generated");
        assert!(json["meals"]["monday"]["breakfast"]["name"].is_string());
    }
}

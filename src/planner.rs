use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api_connection::{
    ApiConnectionError, ChatCompletionClient, ChatCompletionRequest, ChatMessage,
};
use crate::config::{GenerationMode, PlannerConfig, PlannerError};
use crate::energy::estimate_daily_target;
use crate::meal::{Meal, WeeklyMealPlan};
use crate::profile::Profile;
use crate::prompts::{suggestions_prompt, weekly_plan_prompt, SYSTEM_PROMPT};
use crate::templates::{
    build_template_week, fallback_suggestion, suggestion_calories, template_suggestions,
};

/// Upper bound on remote suggestions kept per call.
pub const MAX_SUGGESTIONS: usize = 5;

/// Which path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    Generated,
    Template,
}

/// A result tagged with the path that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sourced<T> {
    pub source: PlanSource,
    pub value: T,
}

impl<T> Sourced<T> {
    pub fn generated(value: T) -> Self {
        Self { source: PlanSource::Generated, value }
    }

    pub fn template(value: T) -> Self {
        Self { source: PlanSource::Template, value }
    }

    pub fn is_generated(&self) -> bool {
        self.source == PlanSource::Generated
    }
}

// Model replies for suggestions come back either as a bare array or wrapped.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SuggestionsReply {
    List(Vec<Meal>),
    Wrapped {
        #[serde(alias = "meals")]
        suggestions: Vec<Meal>,
    },
}

impl SuggestionsReply {
    fn into_meals(self) -> Vec<Meal> {
        match self {
            SuggestionsReply::List(meals) => meals,
            SuggestionsReply::Wrapped { suggestions } => suggestions,
        }
    }
}

/// Builds weekly plans and per-meal suggestions, either from the canned
/// templates or through a chat-completion endpoint.
///
/// Every call is independent. Remote failures never surface as errors: they
/// are logged and replaced with template output tagged [`PlanSource::Template`].
#[derive(Debug, Clone)]
pub struct MealPlanner {
    config: PlannerConfig,
    client: Option<ChatCompletionClient>,
}

impl MealPlanner {
    pub fn new(config: PlannerConfig) -> Result<Self, PlannerError> {
        config.validate()?;
        let client = match config.mode {
            GenerationMode::Template => None,
            GenerationMode::Remote => Some(ChatCompletionClient::new(&config.remote)?),
        };
        Ok(Self { config, client })
    }

    pub fn template_only() -> Self {
        Self {
            config: PlannerConfig::template_only(),
            client: None,
        }
    }

    pub fn mode(&self) -> GenerationMode {
        self.config.mode
    }

    pub fn daily_target(&self, profile: &Profile) -> u32 {
        estimate_daily_target(profile)
    }

    /// Deterministic week built from the canned recipes.
    pub fn template_plan(&self, profile: &Profile) -> WeeklyMealPlan {
        build_template_week(estimate_daily_target(profile))
    }

    pub fn template_suggestions(&self, profile: &Profile, meal_type: &str) -> Vec<Meal> {
        template_suggestions(estimate_daily_target(profile), meal_type)
    }

    pub async fn generate_plan(&self, profile: &Profile) -> Sourced<WeeklyMealPlan> {
        let target = estimate_daily_target(profile);
        let client = match &self.client {
            Some(client) => client,
            None => return Sourced::template(build_template_week(target)),
        };

        let request = self.request(weekly_plan_prompt(profile, target));
        match client.complete_json::<WeeklyMealPlan>(&request).await {
            Ok(plan) => {
                info!(target_kcal = target, "weekly plan generated remotely");
                Sourced::generated(plan)
            }
            Err(e) => {
                warn!(error = %e, "remote plan generation failed, using template plan");
                Sourced::template(build_template_week(target))
            }
        }
    }

    /// Three template suggestions in template mode. In remote mode, up to
    /// [`MAX_SUGGESTIONS`] generated meals, or a single generic fallback meal
    /// when the remote call fails.
    pub async fn generate_suggestions(
        &self,
        profile: &Profile,
        meal_type: &str,
        preferences: &[String],
    ) -> Sourced<Vec<Meal>> {
        let target = estimate_daily_target(profile);
        let client = match &self.client {
            Some(client) => client,
            None => return Sourced::template(template_suggestions(target, meal_type)),
        };

        let calories = suggestion_calories(target, meal_type);
        let request = self.request(suggestions_prompt(profile, meal_type, calories, preferences));
        let result = client
            .complete_json::<SuggestionsReply>(&request)
            .await
            .map(SuggestionsReply::into_meals)
            .and_then(|meals| {
                if meals.is_empty() {
                    Err(ApiConnectionError::EmptyResponse)
                } else {
                    Ok(meals)
                }
            });

        match result {
            Ok(mut meals) => {
                meals.truncate(MAX_SUGGESTIONS);
                info!(meal_type, count = meals.len(), "suggestions generated remotely");
                Sourced::generated(meals)
            }
            Err(e) => {
                warn!(error = %e, meal_type, "remote suggestions failed, using fallback meal");
                Sourced::template(vec![fallback_suggestion(target, meal_type)])
            }
        }
    }

    fn request(&self, prompt: String) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.remote.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
            temperature: Some(self.config.remote.temperature),
            max_tokens: Some(self.config.remote.max_tokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meal::{MealSlot, SlotCalories};
    use crate::profile::ActivityLevel;

    fn reference_profile() -> Profile {
        Profile {
            age: Some(30),
            height_cm: Some(170.0),
            weight_kg: Some(70.0),
            activity_level: Some(ActivityLevel::Moderate),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_rejects_remote_without_key() {
        let mut config = PlannerConfig::template_only();
        config.mode = GenerationMode::Remote;
        assert!(matches!(MealPlanner::new(config), Err(PlannerError::NotConfigured(_))));
    }

    #[test]
    fn test_template_plan_slots() {
        let planner = MealPlanner::template_only();
        let plan = planner.template_plan(&reference_profile());
        let slots = SlotCalories::from_target(2507);
        for (_, day) in plan.days() {
            for slot in MealSlot::ALL {
                assert_eq!(day.meal(slot).calories, slots.get(slot));
            }
        }
        assert_eq!(plan.monday.breakfast.calories, 627);
    }

    #[test]
    fn test_template_plan_is_deterministic() {
        let planner = MealPlanner::template_only();
        let first = serde_json::to_string(&planner.template_plan(&reference_profile())).unwrap();
        let second = serde_json::to_string(&planner.template_plan(&reference_profile())).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_template_mode_generate_plan() {
        let planner = MealPlanner::new(PlannerConfig::template_only()).unwrap();
        let result = planner.generate_plan(&reference_profile()).await;
        assert_eq!(result.source, PlanSource::Template);
        assert_eq!(result.value, planner.template_plan(&reference_profile()));
    }

    #[tokio::test]
    async fn test_template_mode_suggestions() {
        let planner = MealPlanner::template_only();
        let result = planner.generate_suggestions(&reference_profile(), "dinner", &[]).await;
        assert_eq!(result.source, PlanSource::Template);
        assert_eq!(result.value.len(), 3);
        assert_eq!(result.value[0].name, "Healthy Dinner Option 1");
        assert_eq!(result.value[0].calories, 752);
    }

    #[test]
    fn test_sourced_serializes_source_tag() {
        let value = serde_json::to_value(Sourced::generated(1)).unwrap();
        assert_eq!(value["source"], "generated");
        assert_eq!(value["value"], 1);
    }

    #[test]
    fn test_suggestions_reply_shapes() {
        let meal = serde_json::json!({
            "name": "A", "calories": 1, "protein": 1, "carbs": 1, "fats": 1
        });
        let list: SuggestionsReply =
            serde_json::from_value(serde_json::json!([meal.clone()])).unwrap();
        assert_eq!(list.into_meals().len(), 1);
        let wrapped: SuggestionsReply =
            serde_json::from_value(serde_json::json!({"meals": [meal.clone(), meal]})).unwrap();
        assert_eq!(wrapped.into_meals().len(), 2);
    }
}

use std::collections::BTreeSet;

use crate::meal::SlotCalories;
use crate::profile::Profile;

pub const SYSTEM_PROMPT: &str = "You are a registered dietitian and nutrition planner. \
You design realistic, culturally appropriate meals that respect dietary restrictions \
and medical conditions. Respond with JSON only. Do not include explanatory text, \
comments, or markdown formatting before or after the JSON.";

const NOT_SPECIFIED: &str = "not specified";

fn join_or_default(values: &BTreeSet<String>) -> String {
    if values.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        values.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

fn optional<T: ToString>(value: Option<T>, unit: &str) -> String {
    match value {
        Some(v) => format!("{}{}", v.to_string(), unit),
        None => NOT_SPECIFIED.to_string(),
    }
}

fn profile_block(profile: &Profile) -> String {
    format!(
        "User profile:
- Age: {age}
- Height: {height}
- Weight: {weight}
- Activity level: {activity}
- Fitness goals: {goals}
- Dietary restrictions: {restrictions}
- Medical conditions: {conditions}
- Cultural preferences: {cultures}
",
        age = optional(profile.age, " years"),
        height = optional(profile.height_cm, " cm"),
        weight = optional(profile.weight_kg, " kg"),
        activity = optional(profile.activity_level, ""),
        goals = join_or_default(&profile.fitness_goals),
        restrictions = join_or_default(&profile.dietary_restrictions),
        conditions = join_or_default(&profile.medical_conditions),
        cultures = join_or_default(&profile.cultural_preferences),
    )
}

const MEAL_SHAPE: &str = "{\"name\": string, \"calories\": number, \"protein\": number, \
\"carbs\": number, \"fats\": number, \"ingredients\": [string], \"instructions\": [string]}";

pub fn weekly_plan_prompt(profile: &Profile, daily_target: u32) -> String {
    let slots = SlotCalories::from_target(daily_target);
    format!(
        "Create a personalized 7-day meal plan.

{profile}
Daily calorie target: {target} kcal.
Per-meal calorie targets: breakfast {b} kcal, lunch {l} kcal, dinner {d} kcal, \
snacks {s} kcal.

Return a single JSON object with exactly these keys: \"monday\", \"tuesday\", \
\"wednesday\", \"thursday\", \"friday\", \"saturday\", \"sunday\".
Each day must be an object with exactly the keys \"breakfast\", \"lunch\", \"dinner\" \
and \"snacks\".
Each meal must have this shape: {meal}
Macronutrients are in grams; protein and carbs count 4 kcal/g and fats 9 kcal/g.
Your response must start with {{ and end with }}.",
        profile = profile_block(profile),
        target = daily_target,
        b = slots.breakfast,
        l = slots.lunch,
        d = slots.dinner,
        s = slots.snacks,
        meal = MEAL_SHAPE,
    )
}

pub fn suggestions_prompt(
    profile: &Profile,
    meal_type: &str,
    meal_calories: u32,
    preferences: &[String],
) -> String {
    let preferences = if preferences.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        preferences.join(", ")
    };
    format!(
        "Suggest 3 to 5 {meal_type} options.

{profile}
Target calories per option: about {calories} kcal.
Additional preferences: {preferences}.

Return a JSON array of meals. Each meal must have this shape: {meal}
Your response must start with [ and end with ].",
        meal_type = meal_type.trim(),
        profile = profile_block(profile),
        calories = meal_calories,
        preferences = preferences,
        meal = MEAL_SHAPE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ActivityLevel;

    fn sample_profile() -> Profile {
        Profile {
            age: Some(30),
            height_cm: Some(170.0),
            weight_kg: Some(70.0),
            activity_level: Some(ActivityLevel::Moderate),
            dietary_restrictions: ["Vegetarian".to_string(), "Gluten-Free".to_string()].into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_weekly_prompt_embeds_profile_and_targets() {
        let prompt = weekly_plan_prompt(&sample_profile(), 2507);
        assert!(prompt.contains("Age: 30 years"));
        assert!(prompt.contains("Height: 170 cm"));
        assert!(prompt.contains("Activity level: moderate"));
        assert!(prompt.contains("Dietary restrictions: Gluten-Free, Vegetarian"));
        assert!(prompt.contains("Medical conditions: not specified"));
        assert!(prompt.contains("Daily calorie target: 2507 kcal"));
        assert!(prompt.contains("breakfast 627 kcal"));
        assert!(prompt.contains("\"sunday\""));
    }

    #[test]
    fn test_profile_block_lists_every_field() {
        let block = profile_block(&sample_profile());
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "User profile:");
        assert_eq!(lines[1], "- Age: 30 years");
        assert_eq!(lines[3], "- Weight: 70 kg");
        assert_eq!(lines[5], "- Fitness goals: not specified");
        assert_eq!(lines[8], "- Cultural preferences: not specified");
        assert!(block.ends_with('\n'));
    }

    #[test]
    fn test_missing_fields_render_as_not_specified() {
        let prompt = weekly_plan_prompt(&Profile::default(), 2000);
        assert!(prompt.contains("Age: not specified"));
        assert!(prompt.contains("Weight: not specified"));
        assert!(prompt.contains("Activity level: not specified"));
    }

    #[test]
    fn test_suggestions_prompt() {
        let preferences = ["mediterranean".to_string()];
        let prompt = suggestions_prompt(&sample_profile(), "lunch", 877, &preferences);
        assert!(prompt.contains("Suggest 3 to 5 lunch options"));
        assert!(prompt.contains("about 877 kcal"));
        assert!(prompt.contains("Additional preferences: mediterranean."));
        assert!(prompt.ends_with("end with ]."));
    }
}

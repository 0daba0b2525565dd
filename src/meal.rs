use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    #[serde(deserialize_with = "deserialize_rounded")]
    pub calories: u32,
    #[serde(rename = "protein", deserialize_with = "deserialize_rounded")]
    pub protein_g: u32,
    #[serde(rename = "carbs", deserialize_with = "deserialize_rounded")]
    pub carbs_g: u32,
    #[serde(rename = "fats", deserialize_with = "deserialize_rounded")]
    pub fats_g: u32,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

// Model replies are free to send 412.6 or 412; anything negative is malformed.
fn deserialize_rounded<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(de::Error::custom(format!(
            "expected a non-negative number, got {}",
            value
        )));
    }
    Ok(value.round() as u32)
}

/// Share of a meal's calories given to each macronutrient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroSplit {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MacroGrams {
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fats_g: u32,
}

impl MacroSplit {
    pub const fn new(protein: f64, carbs: f64, fats: f64) -> Self {
        Self { protein, carbs, fats }
    }

    /// Grams of each macro for `calories`, each rounded on its own.
    pub fn apply(&self, calories: u32) -> MacroGrams {
        let kcal = f64::from(calories);
        MacroGrams {
            protein_g: grams(kcal * self.protein, KCAL_PER_GRAM_PROTEIN),
            carbs_g: grams(kcal * self.carbs, KCAL_PER_GRAM_CARBS),
            fats_g: grams(kcal * self.fats, KCAL_PER_GRAM_FAT),
        }
    }
}

fn grams(kcal: f64, kcal_per_gram: f64) -> u32 {
    (kcal / kcal_per_gram).round().max(0.0) as u32
}

impl Meal {
    pub fn from_split(
        name: impl Into<String>,
        calories: u32,
        split: MacroSplit,
        ingredients: &[&str],
        instructions: &[&str],
    ) -> Self {
        let macros = split.apply(calories);
        Meal {
            name: name.into(),
            calories,
            protein_g: macros.protein_g,
            carbs_g: macros.carbs_g,
            fats_g: macros.fats_g,
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            instructions: instructions.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Calories implied by the macros (Atwater factors).
    pub fn macro_calories(&self) -> f64 {
        f64::from(self.protein_g) * KCAL_PER_GRAM_PROTEIN
            + f64::from(self.carbs_g) * KCAL_PER_GRAM_CARBS
            + f64::from(self.fats_g) * KCAL_PER_GRAM_FAT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snacks,
    ];

    pub fn calorie_share(&self) -> f64 {
        match self {
            MealSlot::Breakfast => 0.25,
            MealSlot::Lunch => 0.35,
            MealSlot::Dinner => 0.30,
            MealSlot::Snacks => 0.10,
        }
    }

    pub fn calories_for(&self, daily_target: u32) -> u32 {
        (f64::from(daily_target) * self.calorie_share()).round() as u32
    }

    /// Maps a meal-type string ("snack" or "snacks" both work) onto a slot.
    pub fn from_meal_type(meal_type: &str) -> Option<Self> {
        match meal_type.trim().to_ascii_lowercase().as_str() {
            "breakfast" => Some(MealSlot::Breakfast),
            "lunch" => Some(MealSlot::Lunch),
            "dinner" => Some(MealSlot::Dinner),
            "snack" | "snacks" => Some(MealSlot::Snacks),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snacks => "snacks",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-slot calorie targets for one day. Totals may drift a few kcal from
/// the daily target because each slot rounds on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotCalories {
    pub breakfast: u32,
    pub lunch: u32,
    pub dinner: u32,
    pub snacks: u32,
}

impl SlotCalories {
    pub fn from_target(daily_target: u32) -> Self {
        SlotCalories {
            breakfast: MealSlot::Breakfast.calories_for(daily_target),
            lunch: MealSlot::Lunch.calories_for(daily_target),
            dinner: MealSlot::Dinner.calories_for(daily_target),
            snacks: MealSlot::Snacks.calories_for(daily_target),
        }
    }

    pub fn get(&self, slot: MealSlot) -> u32 {
        match slot {
            MealSlot::Breakfast => self.breakfast,
            MealSlot::Lunch => self.lunch,
            MealSlot::Dinner => self.dinner,
            MealSlot::Snacks => self.snacks,
        }
    }

    pub fn total(&self) -> u32 {
        self.breakfast + self.lunch + self.dinner + self.snacks
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
    pub snacks: Meal,
}

impl DayPlan {
    pub fn meal(&self, slot: MealSlot) -> &Meal {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snacks => &self.snacks,
        }
    }

    pub fn meals(&self) -> impl Iterator<Item = (MealSlot, &Meal)> {
        MealSlot::ALL.into_iter().map(move |slot| (slot, self.meal(slot)))
    }

    pub fn total_calories(&self) -> u32 {
        self.meals().map(|(_, meal)| meal.calories).sum()
    }
}

/// One plan per weekday. Decoding fails if any day or slot is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyMealPlan {
    pub monday: DayPlan,
    pub tuesday: DayPlan,
    pub wednesday: DayPlan,
    pub thursday: DayPlan,
    pub friday: DayPlan,
    pub saturday: DayPlan,
    pub sunday: DayPlan,
}

impl WeeklyMealPlan {
    pub fn day(&self, day: Weekday) -> &DayPlan {
        match day {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }

    pub fn days(&self) -> impl Iterator<Item = (Weekday, &DayPlan)> {
        Weekday::ALL.into_iter().map(move |day| (day, self.day(day)))
    }

    pub fn daily_calories(&self, day: Weekday) -> u32 {
        self.day(day).total_calories()
    }
}

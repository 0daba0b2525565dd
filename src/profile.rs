use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    Extra,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::Extra => "extra",
        }
    }

    /// Lenient parse used for user input: unknown values are `None`, not an error.
    pub fn parse_lenient(value: &str) -> Option<Self> {
        value.parse().ok()
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown activity level: '{0}'")]
pub struct UnknownActivityLevel(pub String);

impl FromStr for ActivityLevel {
    type Err = UnknownActivityLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "extra" => Ok(ActivityLevel::Extra),
            _ => Err(UnknownActivityLevel(s.to_string())),
        }
    }
}

/// Profile fields exactly as the user typed them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProfile {
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub activity_level: String,
    #[serde(default)]
    pub fitness_goals: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub medical_conditions: Vec<String>,
    #[serde(default)]
    pub cultural_preferences: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub age: Option<u32>,
    #[serde(rename = "height")]
    pub height_cm: Option<f64>,
    #[serde(rename = "weight")]
    pub weight_kg: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    #[serde(default)]
    pub fitness_goals: BTreeSet<String>,
    #[serde(default)]
    pub dietary_restrictions: BTreeSet<String>,
    #[serde(default)]
    pub medical_conditions: BTreeSet<String>,
    #[serde(default)]
    pub cultural_preferences: BTreeSet<String>,
}

impl Profile {
    /// Age, height and weight are all known.
    pub fn is_complete(&self) -> bool {
        self.age.is_some() && self.height_cm.is_some() && self.weight_kg.is_some()
    }

    pub fn body_mass_index(&self) -> Option<f64> {
        match (self.height_cm, self.weight_kg) {
            (Some(h), Some(w)) => body_mass_index(h, w),
            _ => None,
        }
    }
}

/// Converts the raw form into a numeric profile. Anything blank, unparseable
/// or non-positive is dropped to `None`; nothing here is surfaced as an error.
pub fn normalize(raw: &RawProfile) -> Profile {
    Profile {
        age: parse_age(&raw.age),
        height_cm: parse_positive(&raw.height),
        weight_kg: parse_positive(&raw.weight),
        activity_level: ActivityLevel::parse_lenient(&raw.activity_level),
        fitness_goals: normalize_set(&raw.fitness_goals),
        dietary_restrictions: normalize_set(&raw.dietary_restrictions),
        medical_conditions: normalize_set(&raw.medical_conditions),
        cultural_preferences: normalize_set(&raw.cultural_preferences),
    }
}

fn parse_positive(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

// Decimal ages truncate, the way an integer form field does.
fn parse_age(value: &str) -> Option<u32> {
    let age = parse_positive(value)?.trunc();
    if age >= 1.0 && age <= f64::from(u32::MAX) {
        Some(age as u32)
    } else {
        None
    }
}

fn normalize_set(values: &[String]) -> BTreeSet<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

/// `weight / height_m^2`, or `None` for non-positive inputs.
pub fn body_mass_index(height_cm: f64, weight_kg: f64) -> Option<f64> {
    if height_cm <= 0.0 || weight_kg <= 0.0 || !height_cm.is_finite() || !weight_kg.is_finite() {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(weight_kg / (height_m * height_m))
}

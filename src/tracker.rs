use serde::{Deserialize, Serialize};

/// One logged food item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodLogEntry {
    pub food_name: String,
    pub calories: u32,
    #[serde(rename = "proteins")]
    pub protein_g: u32,
    #[serde(rename = "carbs")]
    pub carbs_g: u32,
    #[serde(rename = "fats")]
    pub fats_g: u32,
}

/// What was eaten today against the daily target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DailyTotals {
    pub calories: u32,
    pub target: u32,
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fats_g: u32,
}

impl DailyTotals {
    pub fn from_entries<'a>(
        entries: impl IntoIterator<Item = &'a FoodLogEntry>,
        target: u32,
    ) -> Self {
        let mut totals = DailyTotals {
            target,
            ..Default::default()
        };
        for entry in entries {
            macro_rules! add {
                ($field:ident) => {
                    totals.$field = totals.$field.saturating_add(entry.$field);
                };
            }
            add!(calories);
            add!(protein_g);
            add!(carbs_g);
            add!(fats_g);
        }
        totals
    }

    pub fn remaining(&self) -> u32 {
        self.target.saturating_sub(self.calories)
    }

    /// Share of the target consumed, rounded to a whole percent.
    pub fn progress_percent(&self) -> u32 {
        if self.target == 0 {
            return 0;
        }
        (f64::from(self.calories) * 100.0 / f64::from(self.target)).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, calories: u32, protein: u32, carbs: u32, fats: u32) -> FoodLogEntry {
        FoodLogEntry {
            food_name: name.to_string(),
            calories,
            protein_g: protein,
            carbs_g: carbs,
            fats_g: fats,
        }
    }

    #[test]
    fn test_daily_totals() {
        let log = vec![
            entry("Avocado Toast", 320, 12, 28, 18),
            entry("Chicken Salad", 450, 35, 15, 25),
        ];
        let totals = DailyTotals::from_entries(&log, 2000);
        assert_eq!(totals.calories, 770);
        assert_eq!(totals.protein_g, 47);
        assert_eq!(totals.carbs_g, 43);
        assert_eq!(totals.fats_g, 43);
        assert_eq!(totals.remaining(), 1230);
        assert_eq!(totals.progress_percent(), 39); // 38.5
    }

    #[test]
    fn test_over_target_and_zero_target() {
        let log = vec![entry("Feast", 2500, 0, 0, 0)];
        let totals = DailyTotals::from_entries(&log, 2000);
        assert_eq!(totals.remaining(), 0);
        assert_eq!(totals.progress_percent(), 125);

        let empty = DailyTotals::from_entries(&[], 0);
        assert_eq!(empty.progress_percent(), 0);
        assert_eq!(empty.calories, 0);
    }

    #[test]
    fn test_entry_wire_names() {
        let json = serde_json::json!({
            "food_name": "Yogurt", "calories": 150, "proteins": 10, "carbs": 12, "fats": 5
        });
        let parsed: FoodLogEntry = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.protein_g, 10);
    }
}

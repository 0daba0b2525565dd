use crate::meal::{DayPlan, MacroSplit, Meal, MealSlot, SlotCalories, WeeklyMealPlan, Weekday};

/// Calories used for suggestions when the meal type is not a known slot.
pub const UNKNOWN_MEAL_TYPE_KCAL: u32 = 400;

/// A canned recipe: everything except the calories, which come from the slot.
#[derive(Debug, Clone, Copy)]
pub struct RecipeTemplate {
    pub name: &'static str,
    pub split: MacroSplit,
    pub ingredients: &'static [&'static str],
    pub instructions: &'static [&'static str],
}

impl RecipeTemplate {
    pub fn to_meal(&self, calories: u32) -> Meal {
        Meal::from_split(self.name, calories, self.split, self.ingredients, self.instructions)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DayTemplates {
    pub breakfast: RecipeTemplate,
    pub lunch: RecipeTemplate,
    pub dinner: RecipeTemplate,
    pub snacks: RecipeTemplate,
}

impl DayTemplates {
    pub fn for_slot(&self, slot: MealSlot) -> &RecipeTemplate {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snacks => &self.snacks,
        }
    }

    fn to_day_plan(&self, slots: &SlotCalories) -> DayPlan {
        DayPlan {
            breakfast: self.breakfast.to_meal(slots.breakfast),
            lunch: self.lunch.to_meal(slots.lunch),
            dinner: self.dinner.to_meal(slots.dinner),
            snacks: self.snacks.to_meal(slots.snacks),
        }
    }
}

/// The canned week, Monday first.
pub const WEEKLY_TEMPLATES: [DayTemplates; 7] = [
    // Monday
    DayTemplates {
        breakfast: RecipeTemplate {
            name: "Oatmeal with Berries and Nuts",
            split: MacroSplit::new(0.15, 0.60, 0.25),
            ingredients: &["Rolled oats", "Mixed berries", "Almonds", "Greek yogurt"],
            instructions: &["Cook oats with water", "Top with berries and nuts", "Add yogurt"],
        },
        lunch: RecipeTemplate {
            name: "Grilled Chicken Salad",
            split: MacroSplit::new(0.30, 0.40, 0.30),
            ingredients: &["Chicken breast", "Mixed greens", "Cherry tomatoes", "Olive oil"],
            instructions: &["Grill chicken", "Toss salad with dressing", "Combine and serve"],
        },
        dinner: RecipeTemplate {
            name: "Salmon with Quinoa and Vegetables",
            split: MacroSplit::new(0.25, 0.45, 0.30),
            ingredients: &["Salmon fillet", "Quinoa", "Broccoli", "Carrots"],
            instructions: &["Bake salmon", "Cook quinoa", "Steam vegetables", "Serve together"],
        },
        snacks: RecipeTemplate {
            name: "Greek Yogurt with Honey",
            split: MacroSplit::new(0.20, 0.50, 0.30),
            ingredients: &["Greek yogurt", "Honey", "Walnuts"],
            instructions: &["Mix yogurt with honey", "Top with nuts"],
        },
    },
    // Tuesday
    DayTemplates {
        breakfast: RecipeTemplate {
            name: "Avocado Toast with Eggs",
            split: MacroSplit::new(0.20, 0.45, 0.35),
            ingredients: &["Whole grain bread", "Avocado", "Eggs", "Tomato"],
            instructions: &["Toast bread", "Mash avocado", "Cook eggs", "Assemble"],
        },
        lunch: RecipeTemplate {
            name: "Turkey and Hummus Wrap",
            split: MacroSplit::new(0.25, 0.50, 0.25),
            ingredients: &["Whole wheat tortilla", "Turkey breast", "Hummus", "Vegetables"],
            instructions: &["Spread hummus", "Add turkey and vegetables", "Roll wrap"],
        },
        dinner: RecipeTemplate {
            name: "Lean Beef Stir-fry",
            split: MacroSplit::new(0.30, 0.40, 0.30),
            ingredients: &["Lean beef", "Mixed vegetables", "Brown rice", "Soy sauce"],
            instructions: &["Stir-fry beef", "Add vegetables", "Serve over rice"],
        },
        snacks: RecipeTemplate {
            name: "Apple with Almond Butter",
            split: MacroSplit::new(0.15, 0.55, 0.30),
            ingredients: &["Apple", "Almond butter"],
            instructions: &["Slice apple", "Serve with almond butter"],
        },
    },
    // Wednesday
    DayTemplates {
        breakfast: RecipeTemplate {
            name: "Smoothie Bowl",
            split: MacroSplit::new(0.18, 0.62, 0.20),
            ingredients: &["Banana", "Berries", "Protein powder", "Granola"],
            instructions: &[
                "Blend fruits with protein powder",
                "Pour into bowl",
                "Top with granola",
            ],
        },
        lunch: RecipeTemplate {
            name: "Mediterranean Bowl",
            split: MacroSplit::new(0.22, 0.48, 0.30),
            ingredients: &["Chickpeas", "Cucumber", "Feta cheese", "Olive oil"],
            instructions: &[
                "Combine chickpeas and vegetables",
                "Add feta",
                "Drizzle with olive oil",
            ],
        },
        dinner: RecipeTemplate {
            name: "Baked Cod with Sweet Potato",
            split: MacroSplit::new(0.28, 0.42, 0.30),
            ingredients: &["Cod fillet", "Sweet potato", "Green beans", "Herbs"],
            instructions: &["Bake cod with herbs", "Roast sweet potato", "Steam green beans"],
        },
        snacks: RecipeTemplate {
            name: "Trail Mix",
            split: MacroSplit::new(0.16, 0.44, 0.40),
            ingredients: &["Mixed nuts", "Dried fruits", "Dark chocolate chips"],
            instructions: &["Mix all ingredients", "Store in container"],
        },
    },
    // Thursday
    DayTemplates {
        breakfast: RecipeTemplate {
            name: "Protein Pancakes",
            split: MacroSplit::new(0.25, 0.55, 0.20),
            ingredients: &["Protein powder", "Banana", "Eggs", "Berries"],
            instructions: &[
                "Mix protein powder with eggs and banana",
                "Cook like pancakes",
                "Top with berries",
            ],
        },
        lunch: RecipeTemplate {
            name: "Asian Lettuce Wraps",
            split: MacroSplit::new(0.28, 0.32, 0.40),
            ingredients: &["Ground turkey", "Lettuce cups", "Water chestnuts", "Sesame oil"],
            instructions: &[
                "Cook turkey with seasonings",
                "Add water chestnuts",
                "Serve in lettuce cups",
            ],
        },
        dinner: RecipeTemplate {
            name: "Vegetarian Chili",
            split: MacroSplit::new(0.20, 0.55, 0.25),
            ingredients: &["Black beans", "Kidney beans", "Tomatoes", "Bell peppers"],
            instructions: &["Sauté vegetables", "Add beans and tomatoes", "Simmer until thick"],
        },
        snacks: RecipeTemplate {
            name: "Cottage Cheese with Fruit",
            split: MacroSplit::new(0.35, 0.45, 0.20),
            ingredients: &["Cottage cheese", "Pineapple", "Cinnamon"],
            instructions: &["Mix cottage cheese with fruit", "Sprinkle with cinnamon"],
        },
    },
    // Friday
    DayTemplates {
        breakfast: RecipeTemplate {
            name: "Chia Pudding",
            split: MacroSplit::new(0.16, 0.44, 0.40),
            ingredients: &["Chia seeds", "Almond milk", "Vanilla", "Fresh berries"],
            instructions: &[
                "Mix chia seeds with almond milk",
                "Let sit overnight",
                "Top with berries",
            ],
        },
        lunch: RecipeTemplate {
            name: "Tuna Salad Sandwich",
            split: MacroSplit::new(0.32, 0.38, 0.30),
            ingredients: &["Tuna", "Whole grain bread", "Avocado", "Spinach"],
            instructions: &["Mix tuna with avocado", "Add spinach to bread", "Assemble sandwich"],
        },
        dinner: RecipeTemplate {
            name: "Chicken Curry with Rice",
            split: MacroSplit::new(0.26, 0.44, 0.30),
            ingredients: &["Chicken breast", "Coconut milk", "Curry spices", "Brown rice"],
            instructions: &[
                "Cook chicken with curry spices",
                "Add coconut milk",
                "Serve over rice",
            ],
        },
        snacks: RecipeTemplate {
            name: "Hummus with Vegetables",
            split: MacroSplit::new(0.18, 0.52, 0.30),
            ingredients: &["Hummus", "Carrots", "Celery", "Bell peppers"],
            instructions: &["Cut vegetables into sticks", "Serve with hummus"],
        },
    },
    // Saturday
    DayTemplates {
        breakfast: RecipeTemplate {
            name: "Weekend Breakfast Bowl",
            split: MacroSplit::new(0.22, 0.48, 0.30),
            ingredients: &["Quinoa", "Scrambled eggs", "Avocado", "Salsa"],
            instructions: &["Cook quinoa", "Scramble eggs", "Top with avocado and salsa"],
        },
        lunch: RecipeTemplate {
            name: "Grilled Vegetable Wrap",
            split: MacroSplit::new(0.18, 0.52, 0.30),
            ingredients: &["Zucchini", "Bell peppers", "Whole wheat tortilla", "Goat cheese"],
            instructions: &[
                "Grill vegetables",
                "Spread goat cheese on tortilla",
                "Roll with vegetables",
            ],
        },
        dinner: RecipeTemplate {
            name: "Pork Tenderloin with Roasted Vegetables",
            split: MacroSplit::new(0.30, 0.35, 0.35),
            ingredients: &["Pork tenderloin", "Brussels sprouts", "Carrots", "Olive oil"],
            instructions: &[
                "Season and roast pork",
                "Roast vegetables with olive oil",
                "Serve together",
            ],
        },
        snacks: RecipeTemplate {
            name: "Energy Balls",
            split: MacroSplit::new(0.14, 0.46, 0.40),
            ingredients: &["Dates", "Almonds", "Coconut", "Cocoa powder"],
            instructions: &["Blend dates and almonds", "Form into balls", "Roll in coconut"],
        },
    },
    // Sunday
    DayTemplates {
        breakfast: RecipeTemplate {
            name: "Sunday Brunch Plate",
            split: MacroSplit::new(0.24, 0.46, 0.30),
            ingredients: &["Smoked salmon", "Whole grain bagel", "Cream cheese", "Capers"],
            instructions: &["Toast bagel", "Spread cream cheese", "Top with salmon and capers"],
        },
        lunch: RecipeTemplate {
            name: "Buddha Bowl",
            split: MacroSplit::new(0.20, 0.50, 0.30),
            ingredients: &["Quinoa", "Roasted chickpeas", "Kale", "Tahini dressing"],
            instructions: &[
                "Cook quinoa",
                "Roast chickpeas",
                "Massage kale",
                "Combine with dressing",
            ],
        },
        dinner: RecipeTemplate {
            name: "Sunday Roast Chicken",
            split: MacroSplit::new(0.32, 0.38, 0.30),
            ingredients: &["Whole chicken", "Potatoes", "Green beans", "Herbs"],
            instructions: &["Roast chicken with herbs", "Roast potatoes", "Steam green beans"],
        },
        snacks: RecipeTemplate {
            name: "Dark Chocolate and Nuts",
            split: MacroSplit::new(0.12, 0.38, 0.50),
            ingredients: &["Dark chocolate", "Mixed nuts"],
            instructions: &["Break chocolate into pieces", "Serve with nuts"],
        },
    },
];

pub fn templates_for(day: Weekday) -> &'static DayTemplates {
    &WEEKLY_TEMPLATES[day as usize]
}

/// Fills the canned week with the calories of `daily_target`.
pub fn build_template_week(daily_target: u32) -> WeeklyMealPlan {
    let slots = SlotCalories::from_target(daily_target);
    let day = |d: Weekday| templates_for(d).to_day_plan(&slots);
    WeeklyMealPlan {
        monday: day(Weekday::Monday),
        tuesday: day(Weekday::Tuesday),
        wednesday: day(Weekday::Wednesday),
        thursday: day(Weekday::Thursday),
        friday: day(Weekday::Friday),
        saturday: day(Weekday::Saturday),
        sunday: day(Weekday::Sunday),
    }
}

/// Calories for a suggestion of `meal_type` under `daily_target`.
pub fn suggestion_calories(daily_target: u32, meal_type: &str) -> u32 {
    MealSlot::from_meal_type(meal_type)
        .map(|slot| slot.calories_for(daily_target))
        .unwrap_or(UNKNOWN_MEAL_TYPE_KCAL)
}

/// "snack" -> "Snack"
pub fn display_meal_type(meal_type: &str) -> String {
    let trimmed = meal_type.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

struct SuggestionTemplate {
    label: &'static str,
    calorie_offset: i64,
    split: MacroSplit,
    ingredients: &'static [&'static str],
    instructions: &'static [&'static str],
}

const SUGGESTION_TEMPLATES: [SuggestionTemplate; 3] = [
    SuggestionTemplate {
        label: "Healthy {} Option 1",
        calorie_offset: 0,
        split: MacroSplit::new(0.20, 0.50, 0.30),
        ingredients: &["Fresh ingredients", "Balanced nutrition", "Quality proteins"],
        instructions: &["Prepare with care", "Cook thoroughly", "Enjoy mindfully"],
    },
    SuggestionTemplate {
        label: "Nutritious {} Option 2",
        calorie_offset: 50,
        split: MacroSplit::new(0.25, 0.45, 0.30),
        ingredients: &["Organic produce", "Lean proteins", "Healthy fats"],
        instructions: &["Season well", "Cook to perfection", "Serve fresh"],
    },
    SuggestionTemplate {
        label: "Balanced {} Option 3",
        calorie_offset: -30,
        split: MacroSplit::new(0.18, 0.52, 0.30),
        ingredients: &["Whole grains", "Fresh vegetables", "Natural flavors"],
        instructions: &["Combine ingredients", "Mix well", "Serve immediately"],
    },
];

/// The three generic suggestions for a meal type.
pub fn template_suggestions(daily_target: u32, meal_type: &str) -> Vec<Meal> {
    let base = suggestion_calories(daily_target, meal_type);
    let type_name = display_meal_type(meal_type);
    SUGGESTION_TEMPLATES
        .iter()
        .map(|t| {
            let calories =
                (i64::from(base) + t.calorie_offset).clamp(0, i64::from(u32::MAX)) as u32;
            Meal::from_split(
                t.label.replace("{}", &type_name),
                calories,
                t.split,
                t.ingredients,
                t.instructions,
            )
        })
        .collect()
}

/// Single generic meal returned when remote suggestions fail.
pub fn fallback_suggestion(daily_target: u32, meal_type: &str) -> Meal {
    let calories = suggestion_calories(daily_target, meal_type);
    Meal::from_split(
        format!("Healthy {}", display_meal_type(meal_type)),
        calories,
        MacroSplit::new(0.20, 0.50, 0.30),
        &["Lean protein", "Whole grains", "Seasonal vegetables"],
        &["Prepare the ingredients", "Cook to preference", "Serve"],
    )
}

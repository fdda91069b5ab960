// ABOUTME: Meal suggestion engine dividing remaining macro budget across remaining slots
// ABOUTME: Pure function over ledger totals, daily target, diet preference, and meal slot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Macrolens Contributors

//! Suggestion engine
//!
//! Given the ledger's running totals and a daily macro budget, computes a
//! per-slot target (remaining budget divided across the slots still ahead,
//! inclusive of the chosen one) and pairs it with example foods matching the
//! dietary preference. Stateless and pure: no clock, no prior-suggestion
//! memory, same inputs always produce the same result.

use crate::models::{Macros, MealSlot};
use serde::{Deserialize, Serialize};

/// Default full-day macro budget
pub const DEFAULT_DAILY_TARGET: Macros = Macros::new(2000.0, 120.0, 250.0, 70.0);

/// Dietary preference filter for example foods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietPreference {
    /// No restriction
    None,
    /// No meat or fish
    Vegetarian,
    /// No animal products
    Vegan,
    /// Protein-forward picks
    HighProtein,
    /// Carb-light picks
    LowCarb,
}

impl DietPreference {
    /// Parse a preference name, defaulting unknown values to no restriction
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "vegetarian" => Self::Vegetarian,
            "vegan" => Self::Vegan,
            "high_protein" => Self::HighProtein,
            "low_carb" => Self::LowCarb,
            _ => Self::None,
        }
    }
}

/// Suggestion output for the rendering surface; ephemeral, never persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionResult {
    /// Slot the suggestion targets
    pub meal_slot: MealSlot,
    /// Preference used for the example lookup
    pub diet_preference: DietPreference,
    /// Rounded macro target for this one slot
    pub target_macros: Macros,
    /// Example foods matching the preference
    pub example_foods: Vec<String>,
}

/// Example foods keyed by slot and preference
///
/// Lookups fall back to the `DietPreference::None` entry for the same slot
/// when a preference has no dedicated row, so every slot needs at least the
/// unrestricted entry.
const EXAMPLE_FOODS: &[(MealSlot, DietPreference, &[&str])] = &[
    (MealSlot::Breakfast, DietPreference::None, &["Greek yogurt with berries", "Oatmeal with banana", "Scrambled eggs on toast"]),
    (MealSlot::Breakfast, DietPreference::Vegetarian, &["Greek yogurt with berries", "Oatmeal with banana", "Veggie omelette"]),
    (MealSlot::Breakfast, DietPreference::Vegan, &["Oatmeal with almond milk", "Tofu scramble", "Peanut butter toast"]),
    (MealSlot::Breakfast, DietPreference::HighProtein, &["Egg white omelette", "Cottage cheese bowl", "Protein smoothie"]),
    (MealSlot::Breakfast, DietPreference::LowCarb, &["Bacon and eggs", "Avocado omelette", "Greek yogurt plain"]),
    (MealSlot::Lunch, DietPreference::None, &["Grilled chicken salad", "Turkey sandwich", "Rice bowl with vegetables"]),
    (MealSlot::Lunch, DietPreference::Vegetarian, &["Caprese sandwich", "Lentil soup with bread", "Falafel wrap"]),
    (MealSlot::Lunch, DietPreference::Vegan, &["Chickpea salad wrap", "Buddha bowl", "Lentil soup"]),
    (MealSlot::Lunch, DietPreference::HighProtein, &["Grilled chicken breast with quinoa", "Tuna salad", "Turkey and cottage cheese plate"]),
    (MealSlot::Dinner, DietPreference::None, &["Salmon with rice", "Pasta with chicken", "Steak and potatoes"]),
    (MealSlot::Dinner, DietPreference::Vegetarian, &["Vegetable stir-fry with tofu", "Margherita pizza", "Eggplant parmesan"]),
    (MealSlot::Dinner, DietPreference::Vegan, &["Vegetable curry with rice", "Bean chili", "Roast vegetable pasta"]),
    (MealSlot::Dinner, DietPreference::HighProtein, &["Salmon with broccoli", "Lean steak with greens", "Chicken and lentil stew"]),
    (MealSlot::Dinner, DietPreference::LowCarb, &["Baked salmon with asparagus", "Cauliflower-rice stir-fry", "Grilled chicken with salad"]),
    (MealSlot::Snacks, DietPreference::None, &["Apple with peanut butter", "Trail mix", "Cheese and crackers"]),
    (MealSlot::Snacks, DietPreference::Vegetarian, &["Apple with peanut butter", "Trail mix", "Hummus with carrots"]),
    (MealSlot::Snacks, DietPreference::Vegan, &["Hummus with carrots", "Mixed nuts", "Fruit salad"]),
    (MealSlot::Snacks, DietPreference::HighProtein, &["Protein bar", "Hard-boiled eggs", "Beef jerky"]),
];

/// Compute the suggestion for a slot given the current ledger totals
///
/// Remaining budget is clamped at zero per macro (an over-budget day yields
/// a zero target, never a negative one), divided evenly across the slots
/// from `slot` onward, and rounded half-up to whole numbers.
#[must_use]
pub fn suggest(
    ledger_totals: Macros,
    daily_target: Macros,
    preference: DietPreference,
    slot: MealSlot,
) -> SuggestionResult {
    let remaining = daily_target.saturating_sub(ledger_totals);
    let divisor = f64::from(slot.remaining_slots());
    let target_macros = Macros {
        calories: (remaining.calories / divisor).round(),
        protein: (remaining.protein / divisor).round(),
        carbs: (remaining.carbs / divisor).round(),
        fat: (remaining.fat / divisor).round(),
    };
    SuggestionResult {
        meal_slot: slot,
        diet_preference: preference,
        target_macros,
        example_foods: example_foods(slot, preference),
    }
}

/// Example foods for `(slot, preference)`, falling back to the unrestricted
/// entry for the slot
fn example_foods(slot: MealSlot, preference: DietPreference) -> Vec<String> {
    lookup_examples(slot, preference)
        .or_else(|| lookup_examples(slot, DietPreference::None))
        .unwrap_or_default()
        .iter()
        .map(|s| (*s).to_owned())
        .collect()
}

fn lookup_examples(slot: MealSlot, preference: DietPreference) -> Option<&'static [&'static str]> {
    EXAMPLE_FOODS
        .iter()
        .find(|(s, p, _)| *s == slot && *p == preference)
        .map(|(_, _, foods)| *foods)
}

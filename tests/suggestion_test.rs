// ABOUTME: Integration tests for the remaining-budget suggestion engine
// ABOUTME: Slot division, non-negativity clamping, rounding, and example-food fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Macrolens Contributors

//! Suggestion engine tests

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use macrolens::models::{Macros, MealSlot};
use macrolens::suggestion::{suggest, DietPreference, DEFAULT_DAILY_TARGET};

// ============================================================================
// SLOT DIVISION AND ROUNDING
// ============================================================================

#[test]
fn empty_ledger_breakfast_divides_full_budget_by_four() {
    let result = suggest(
        Macros::ZERO,
        Macros::new(2000.0, 120.0, 250.0, 70.0),
        DietPreference::None,
        MealSlot::Breakfast,
    );

    // 250 / 4 = 62.5 rounds half-up to 63; 70 / 4 = 17.5 rounds to 18
    assert_eq!(result.target_macros, Macros::new(500.0, 30.0, 63.0, 18.0));
}

#[test]
fn snacks_division_by_one_yields_remaining_unchanged() {
    let eaten = Macros::new(1500.0, 80.0, 170.0, 50.0);
    let result = suggest(eaten, DEFAULT_DAILY_TARGET, DietPreference::None, MealSlot::Snacks);

    let remaining = DEFAULT_DAILY_TARGET.saturating_sub(eaten);
    assert_eq!(result.target_macros, remaining);
}

#[test]
fn later_slots_divide_by_fewer_remaining_meals() {
    let target = Macros::new(1200.0, 60.0, 120.0, 36.0);
    let lunch = suggest(Macros::ZERO, target, DietPreference::None, MealSlot::Lunch);
    let dinner = suggest(Macros::ZERO, target, DietPreference::None, MealSlot::Dinner);

    assert_eq!(lunch.target_macros.calories, 400.0);
    assert_eq!(dinner.target_macros.calories, 600.0);
}

// ============================================================================
// NON-NEGATIVITY
// ============================================================================

#[test]
fn exceeded_budget_clamps_to_zero_never_negative() {
    let eaten = Macros::new(2600.0, 150.0, 300.0, 90.0);
    for slot in MealSlot::ALL {
        let result = suggest(eaten, DEFAULT_DAILY_TARGET, DietPreference::None, slot);
        assert_eq!(result.target_macros, Macros::ZERO, "{}", slot.display_name());
    }
}

#[test]
fn per_macro_clamping_is_independent() {
    // Protein under budget, everything else over
    let eaten = Macros::new(2600.0, 60.0, 300.0, 90.0);
    let result = suggest(eaten, DEFAULT_DAILY_TARGET, DietPreference::None, MealSlot::Snacks);

    assert_eq!(result.target_macros.calories, 0.0);
    assert_eq!(result.target_macros.protein, 60.0);
    assert_eq!(result.target_macros.carbs, 0.0);
    assert_eq!(result.target_macros.fat, 0.0);
}

// ============================================================================
// EXAMPLE FOODS
// ============================================================================

#[test]
fn example_foods_respect_the_preference() {
    let vegan = suggest(Macros::ZERO, DEFAULT_DAILY_TARGET, DietPreference::Vegan, MealSlot::Dinner);
    assert!(!vegan.example_foods.is_empty());
    for food in &vegan.example_foods {
        let lowered = food.to_lowercase();
        assert!(!lowered.contains("chicken") && !lowered.contains("salmon"), "{food}");
    }
}

#[test]
fn missing_preference_entry_falls_back_to_unrestricted() {
    // Lunch has no dedicated low-carb row; it must reuse the unrestricted one
    let low_carb = suggest(Macros::ZERO, DEFAULT_DAILY_TARGET, DietPreference::LowCarb, MealSlot::Lunch);
    let unrestricted = suggest(Macros::ZERO, DEFAULT_DAILY_TARGET, DietPreference::None, MealSlot::Lunch);

    assert_eq!(low_carb.example_foods, unrestricted.example_foods);
    // The preference the caller asked for is still echoed back
    assert_eq!(low_carb.diet_preference, DietPreference::LowCarb);
}

#[test]
fn every_slot_yields_examples_for_every_preference() {
    let preferences = [
        DietPreference::None,
        DietPreference::Vegetarian,
        DietPreference::Vegan,
        DietPreference::HighProtein,
        DietPreference::LowCarb,
    ];
    for slot in MealSlot::ALL {
        for preference in preferences {
            let result = suggest(Macros::ZERO, DEFAULT_DAILY_TARGET, preference, slot);
            assert!(!result.example_foods.is_empty());
        }
    }
}

// ABOUTME: Local per-100g nutrition table, label canonicalization, and summary text
// ABOUTME: Holds the compound-food fallback breakdowns as static data, not logic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Macrolens Contributors

//! Local food database
//!
//! A static per-100g macro table for common foods, a keyword map that folds
//! label variants onto canonical table entries ("pepperoni" -> "pizza"), and
//! the free-text summary generator used when no structured macros exist.
//!
//! The compound-food breakdowns at the bottom are a known special-case
//! fallback: a handful of labels the backend historically returned as flat
//! objects get a fixed component decomposition here. They are data on
//! purpose - a backend that starts returning real component lists replaces
//! them without touching the normalizer.

use crate::models::Macros;

/// One canonical food entry with per-100g macro values
#[derive(Debug, Clone, Copy)]
pub struct FoodEntry {
    /// Canonical label
    pub label: &'static str,
    /// Macro values per 100g
    pub macros: Macros,
}

/// Per-100g macro values for common foods
pub const FOOD_TABLE: &[FoodEntry] = &[
    FoodEntry { label: "food", macros: Macros::new(200.0, 10.0, 25.0, 8.0) },
    FoodEntry { label: "pizza", macros: Macros::new(266.0, 11.0, 33.0, 10.0) },
    FoodEntry { label: "apple", macros: Macros::new(52.0, 0.3, 14.0, 0.2) },
    FoodEntry { label: "banana", macros: Macros::new(89.0, 1.1, 23.0, 0.3) },
    FoodEntry { label: "orange", macros: Macros::new(47.0, 0.9, 12.0, 0.1) },
    FoodEntry { label: "avocado", macros: Macros::new(160.0, 2.0, 8.5, 15.0) },
    FoodEntry { label: "broccoli", macros: Macros::new(34.0, 2.8, 7.0, 0.4) },
    FoodEntry { label: "potato", macros: Macros::new(77.0, 2.0, 17.0, 0.1) },
    FoodEntry { label: "rice", macros: Macros::new(130.0, 2.7, 28.0, 0.3) },
    FoodEntry { label: "bread", macros: Macros::new(265.0, 9.0, 49.0, 3.2) },
    FoodEntry { label: "pasta", macros: Macros::new(158.0, 5.8, 31.0, 1.1) },
    FoodEntry { label: "oats", macros: Macros::new(389.0, 16.9, 66.0, 6.9) },
    FoodEntry { label: "chicken", macros: Macros::new(239.0, 27.0, 0.0, 14.0) },
    FoodEntry { label: "steak", macros: Macros::new(271.0, 26.0, 0.0, 19.0) },
    FoodEntry { label: "fish", macros: Macros::new(206.0, 22.0, 0.0, 12.0) },
    FoodEntry { label: "salmon", macros: Macros::new(208.0, 20.0, 0.0, 13.0) },
    FoodEntry { label: "tuna", macros: Macros::new(144.0, 30.0, 0.0, 1.0) },
    FoodEntry { label: "shrimp", macros: Macros::new(99.0, 24.0, 0.0, 0.3) },
    FoodEntry { label: "egg", macros: Macros::new(155.0, 13.0, 1.1, 11.0) },
    FoodEntry { label: "cheese", macros: Macros::new(402.0, 25.0, 1.3, 33.0) },
    FoodEntry { label: "yogurt", macros: Macros::new(59.0, 3.5, 5.0, 3.3) },
    FoodEntry { label: "hamburger", macros: Macros::new(295.0, 17.0, 30.0, 14.0) },
    FoodEntry { label: "french fries", macros: Macros::new(312.0, 3.4, 41.0, 15.0) },
    FoodEntry { label: "salad", macros: Macros::new(152.0, 1.2, 3.3, 15.0) },
    FoodEntry { label: "sandwich", macros: Macros::new(290.0, 15.0, 38.0, 9.0) },
    FoodEntry { label: "sushi", macros: Macros::new(150.0, 6.0, 30.0, 0.5) },
    FoodEntry { label: "taco", macros: Macros::new(210.0, 9.0, 21.0, 10.0) },
    FoodEntry { label: "burrito", macros: Macros::new(329.0, 14.0, 50.0, 9.0) },
    FoodEntry { label: "soup", macros: Macros::new(75.0, 4.0, 9.0, 2.5) },
    FoodEntry { label: "ice cream", macros: Macros::new(207.0, 3.5, 24.0, 11.0) },
    FoodEntry { label: "cake", macros: Macros::new(367.0, 5.0, 50.0, 16.0) },
    FoodEntry { label: "cookie", macros: Macros::new(502.0, 6.4, 61.0, 25.0) },
    FoodEntry { label: "chocolate", macros: Macros::new(546.0, 7.8, 61.0, 31.0) },
];

/// Keyword variants that fold onto a canonical table entry
///
/// First matching keyword wins, matching by substring on the lowercased
/// label, mirroring how the identification stage phrases labels.
const KEYWORD_MAP: &[(&str, &[&str])] = &[
    ("pizza", &["pizza", "pepperoni", "cheese pizza", "slice"]),
    ("hamburger", &["burger", "cheeseburger", "hamburger", "beef burger"]),
    ("salad", &["salad", "garden salad", "caesar salad", "greek salad"]),
    ("pasta", &["pasta", "spaghetti", "noodle", "macaroni", "fettuccine", "linguine"]),
    ("rice", &["rice", "fried rice", "white rice", "brown rice"]),
    ("bread", &["bread", "toast", "baguette", "sourdough", "roll"]),
    ("chicken", &["chicken", "fried chicken", "grilled chicken", "roast chicken"]),
    ("steak", &["steak", "beef", "beef steak", "meat"]),
    ("soup", &["soup", "broth", "chowder", "stew"]),
    ("sandwich", &["sandwich", "sub", "wrap", "hoagie"]),
    ("cake", &["cake", "birthday cake", "chocolate cake", "cheesecake"]),
    ("cookie", &["cookie", "biscuit", "chocolate chip"]),
    ("ice cream", &["ice cream", "gelato", "frozen yogurt"]),
    ("fish", &["fish", "salmon", "tuna", "tilapia", "cod"]),
    ("french fries", &["fries", "french fries", "chips", "potato wedges"]),
    ("taco", &["taco", "burrito", "enchilada", "quesadilla"]),
    ("sushi", &["sushi", "maki", "nigiri", "sashimi"]),
];

/// Fixed component decompositions for labels the backend returns flat
///
/// Special-case fallback data (see module docs). Component values come from
/// the per-100g table above.
pub const COMPOUND_BREAKDOWNS: &[(&[&str], &[(&str, Macros)])] = &[(
    &["hamburger", "cheeseburger", "burger"],
    &[
        ("Hamburger", Macros::new(295.0, 17.0, 30.0, 14.0)),
        ("French Fries", Macros::new(312.0, 3.4, 41.0, 15.0)),
    ],
)];

/// Fold a label variant onto its canonical table entry, if any keyword matches
#[must_use]
pub fn canonical_label(label: &str) -> Option<&'static str> {
    let lowered = label.to_lowercase();
    for (canonical, keywords) in KEYWORD_MAP {
        if keywords.iter().any(|kw| lowered.contains(kw)) {
            return Some(canonical);
        }
    }
    None
}

/// Strip a leading count from a label: "3 tacos" -> (Some(3), "taco")
///
/// Only the exact "<digits> <word>" form is recognized; anything else passes
/// through unchanged with no quantity.
#[must_use]
pub fn strip_quantity(label: &str) -> (Option<u32>, String) {
    let trimmed = label.trim();
    let mut parts = trimmed.split_whitespace();
    if let (Some(first), Some(second), None) = (parts.next(), parts.next(), parts.next()) {
        if let Ok(count) = first.parse::<u32>() {
            let base = second.strip_suffix('s').unwrap_or(second);
            return (Some(count), base.to_lowercase());
        }
    }
    (None, trimmed.to_lowercase())
}

/// Look up per-100g macros for a label, via the keyword map then the table
#[must_use]
pub fn lookup(label: &str) -> Option<Macros> {
    let (_, base) = strip_quantity(label);
    let key = canonical_label(&base).unwrap_or(&base);
    FOOD_TABLE
        .iter()
        .find(|entry| entry.label == key)
        .map(|entry| entry.macros)
}

/// Fixed component breakdown for a compound-food label, if one is on file
#[must_use]
pub fn compound_breakdown(label: &str) -> Option<&'static [(&'static str, Macros)]> {
    let lowered = label.to_lowercase();
    COMPOUND_BREAKDOWNS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(_, components)| *components)
}

/// Title-case the first character of a label for display
#[must_use]
pub fn title_case(label: &str) -> String {
    let mut chars = label.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

/// Generate the free-text macro summary for a label
///
/// With no macros available this is the "could not find" degrade message;
/// otherwise a per-100g breakdown with kcal percentages when calories are
/// positive.
#[must_use]
pub fn macro_summary(label: &str, macros: Option<&Macros>) -> String {
    let Some(m) = macros else {
        return format!("Could not find nutritional information for {label}.");
    };

    let mut lines = vec![
        format!("Identified food: {}", title_case(label)),
        "Nutritional information (per 100g):".to_owned(),
        format!("• Calories: {} kcal", m.calories),
        format!("• Protein: {}g", m.protein),
        format!("• Carbohydrates: {}g", m.carbs),
        format!("• Fat: {}g", m.fat),
    ];

    if m.calories > 0.0 {
        let protein_pct = m.protein * 4.0 / m.calories * 100.0;
        let carbs_pct = m.carbs * 4.0 / m.calories * 100.0;
        let fat_pct = m.fat * 9.0 / m.calories * 100.0;
        lines.push(format!("• Protein: {protein_pct:.1}% of calories"));
        lines.push(format!("• Carbs: {carbs_pct:.1}% of calories"));
        lines.push(format!("• Fat: {fat_pct:.1}% of calories"));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_variants_fold_onto_canonical_entries() {
        assert_eq!(canonical_label("pepperoni pizza slice"), Some("pizza"));
        assert_eq!(canonical_label("Cheeseburger"), Some("hamburger"));
        assert_eq!(canonical_label("mystery dish"), None);
    }

    #[test]
    fn quantity_prefix_is_stripped() {
        assert_eq!(strip_quantity("3 tacos"), (Some(3), "taco".to_owned()));
        assert_eq!(strip_quantity("taco"), (None, "taco".to_owned()));
        assert_eq!(strip_quantity("chicken curry rice"), (None, "chicken curry rice".to_owned()));
    }

    #[test]
    fn lookup_resolves_variants_and_counts() {
        let pizza = lookup("pizza").unwrap();
        assert_eq!(pizza.calories, 266.0);
        let taco = lookup("3 tacos").unwrap();
        assert_eq!(taco.calories, 210.0);
        assert!(lookup("unobtainium").is_none());
    }

    #[test]
    fn summary_includes_percentages_only_with_calories() {
        let m = Macros::new(200.0, 10.0, 25.0, 8.0);
        let text = macro_summary("food", Some(&m));
        assert!(text.contains("per 100g"));
        assert!(text.contains("• Calories: 200 kcal"));
        assert!(text.contains("• Protein: 20.0% of calories"));

        let zero = Macros::ZERO;
        let text = macro_summary("water", Some(&zero));
        assert!(!text.contains("% of calories"));

        let text = macro_summary("mystery", None);
        assert!(text.contains("Could not find"));
    }

    #[test]
    fn burger_labels_have_a_two_component_breakdown() {
        let components = compound_breakdown("cheeseburger meal").unwrap();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].0, "Hamburger");
        assert_eq!(components[1].0, "French Fries");
        assert!(compound_breakdown("apple").is_none());
    }
}

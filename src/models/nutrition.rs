// ABOUTME: Canonical nutrition models produced by the normalizer and consumed downstream
// ABOUTME: Macros, NutritionComponent, NutritionRecord, SourceKind, MealSlot, LoggedItem
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Macrolens Contributors

//! Canonical nutrition models
//!
//! Everything downstream of the normalizer works with these types only. A
//! [`NutritionRecord`] always carries numeric totals (missing wire fields
//! default to zero, never to an omitted field), so renderers and the ledger
//! never handle partial data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The four tracked macro-nutrients
///
/// Calories in kcal, the rest in grams. Element-wise arithmetic is provided
/// for ledger aggregation and budget math.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    /// Calories in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fat: f64,
}

impl Macros {
    /// All-zero macros
    pub const ZERO: Self = Self {
        calories: 0.0,
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
    };

    /// Construct from explicit values
    #[must_use]
    pub const fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
        }
    }

    /// Element-wise sum
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
        }
    }

    /// Element-wise difference clamped at zero
    ///
    /// Used for remaining-budget math: exceeding the budget in a macro yields
    /// a zero target for it, never a negative one.
    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        Self {
            calories: (self.calories - other.calories).max(0.0),
            protein: (self.protein - other.protein).max(0.0),
            carbs: (self.carbs - other.carbs).max(0.0),
            fat: (self.fat - other.fat).max(0.0),
        }
    }

    /// True when every field is finite (no NaN/infinity leaked in)
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.calories.is_finite()
            && self.protein.is_finite()
            && self.carbs.is_finite()
            && self.fat.is_finite()
    }
}

/// One constituent of a compound food (e.g. "French Fries" within a
/// cheeseburger meal)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionComponent {
    /// Component name
    pub name: String,
    /// Macro values for this component
    #[serde(flatten)]
    pub macros: Macros,
}

impl NutritionComponent {
    /// Construct a component from a name and macro values
    #[must_use]
    pub fn new(name: impl Into<String>, macros: Macros) -> Self {
        Self {
            name: name.into(),
            macros,
        }
    }
}

/// How a record's macro values were produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Looked up in a nutrition database
    Database,
    /// Estimated by the AI pipeline (component lists, backend-flagged results)
    AiEstimated,
    /// Free-text summary only; totals are zero and not meaningful
    FreeText,
    /// Shape not recognized; display-only "could not process" state
    Unparseable,
}

impl SourceKind {
    /// Whether a record of this kind may be logged into the meal ledger
    ///
    /// Free-text and unparseable records have no meaningful totals, so
    /// logging them would silently corrupt the daily aggregate.
    #[must_use]
    pub fn is_loggable(&self) -> bool {
        matches!(self, Self::Database | Self::AiEstimated)
    }
}

/// Canonical nutrition record, the sole normalizer output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionRecord {
    /// Human-readable label; compound meals compose the first component's
    /// name "with" the remaining component names
    pub display_name: String,
    /// Macro totals; always numeric, zero-defaulted, authoritative over any
    /// per-component breakdown
    pub totals: Macros,
    /// Constituents, possibly empty; display-only approximations for
    /// quantity-derived records
    pub components: Vec<NutritionComponent>,
    /// How the values were produced
    pub source_kind: SourceKind,
    /// Free-text summary for display (AI blurb or degrade message)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl NutritionRecord {
    /// Whether this record may be inserted into the meal ledger
    #[must_use]
    pub fn is_loggable(&self) -> bool {
        self.source_kind.is_loggable()
    }
}

/// Fixed daily meal categories, in day order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    /// First meal of the day
    Breakfast,
    /// Midday meal
    Lunch,
    /// Evening meal
    Dinner,
    /// Anything between or after meals
    Snacks,
}

impl MealSlot {
    /// All slots in fixed day order
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snacks];

    /// Number of slots from this one onward, inclusive
    ///
    /// Breakfast counts 4, Snacks counts 1. Drives the per-slot division of
    /// the remaining daily budget.
    #[must_use]
    pub fn remaining_slots(&self) -> u32 {
        match self {
            Self::Breakfast => 4,
            Self::Lunch => 3,
            Self::Dinner => 2,
            Self::Snacks => 1,
        }
    }

    /// Display label for the slot
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Snacks => "Snacks",
        }
    }

    /// Parse a slot name, tolerating case and the singular "snack"
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "breakfast" => Some(Self::Breakfast),
            "lunch" => Some(Self::Lunch),
            "dinner" => Some(Self::Dinner),
            "snack" | "snacks" => Some(Self::Snacks),
            _ => None,
        }
    }
}

/// A nutrition record snapshot logged into a specific meal slot
///
/// Immutable once logged except for deletion. The record is a copy, never a
/// reference back into analysis state, so re-running an analysis cannot
/// retroactively change logged history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedItem {
    /// Unique id for this logged entry
    pub id: Uuid,
    /// Snapshot of the normalized record at log time
    pub record: NutritionRecord,
    /// When the item was logged
    pub logged_at: DateTime<Utc>,
}

impl LoggedItem {
    /// Snapshot a record into a new logged item
    #[must_use]
    pub fn snapshot(record: &NutritionRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            record: record.clone(),
            logged_at: Utc::now(),
        }
    }
}

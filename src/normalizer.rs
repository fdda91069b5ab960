// ABOUTME: Normalizes heterogeneous backend macro payloads into canonical NutritionRecords
// ABOUTME: Classifies the four wire shapes once; downstream code never re-inspects raw payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Macrolens Contributors

//! Result normalization
//!
//! The backend's `macros` field is an untagged union with four shapes. This
//! module classifies each raw result into an internal tagged shape exactly
//! once, then lowers it to a [`NutritionRecord`]:
//!
//! 1. string payload -> free-text record, zero totals, display-only
//! 2. missing/unrecognized payload -> unparseable record, display-only
//! 3. non-empty component list -> components verbatim, totals from the
//!    precomputed total or the element-wise component sum
//! 4. `quantity > 1` with `base_item` -> synthetic per-unit components,
//!    totals kept as the original undivided values
//! 5. flat object -> totals read directly, zero-defaulted
//!
//! Normalization never returns an error. An analysis attempt always yields a
//! renderable record; shapes we cannot read degrade to
//! [`SourceKind::Unparseable`].

use crate::errors::{AppError, AppResult};
use crate::food_db;
use crate::models::{
    Macros, NutritionComponent, NutritionRecord, RawAnalysisResult, RawMacroObject, RawMacros,
    SourceKind,
};
use tracing::debug;

/// Internal tagged macro shape, decided once per raw result
enum MacroShape {
    FreeText(String),
    ComponentList {
        components: Vec<NutritionComponent>,
        total: Option<Macros>,
    },
    QuantityAggregate {
        quantity: f64,
        base_item: String,
        totals: Macros,
    },
    Flat(Macros),
    Unrecognized,
}

/// Normalize one raw analysis result into a canonical record
///
/// Infallible by design: unrecognized shapes degrade to an unparseable,
/// display-only record rather than propagating an error, because the UI must
/// always render something for a user-facing analysis attempt.
#[must_use]
pub fn normalize(raw: &RawAnalysisResult) -> NutritionRecord {
    let source_kind = source_kind_hint(raw.source.as_deref());
    match classify(raw) {
        MacroShape::FreeText(summary) => NutritionRecord {
            display_name: food_db::title_case(&raw.label),
            totals: Macros::ZERO,
            components: Vec::new(),
            source_kind: SourceKind::FreeText,
            summary: Some(summary),
        },
        MacroShape::ComponentList { components, total } => {
            let totals = total.unwrap_or_else(|| sum_components(&components));
            NutritionRecord {
                display_name: compound_display_name(&raw.label, &components),
                totals,
                components,
                source_kind: SourceKind::AiEstimated,
                summary: None,
            }
        }
        MacroShape::QuantityAggregate {
            quantity,
            base_item,
            totals,
        } => NutritionRecord {
            display_name: food_db::title_case(&raw.label),
            components: per_unit_components(quantity, &base_item, totals),
            totals,
            source_kind,
            summary: None,
        },
        MacroShape::Flat(totals) => NutritionRecord {
            display_name: food_db::title_case(&raw.label),
            summary: Some(format!(
                "{} contains approximately {} calories per 100g serving.",
                food_db::title_case(&raw.label),
                totals.calories
            )),
            totals,
            components: Vec::new(),
            source_kind,
        },
        MacroShape::Unrecognized => {
            debug!(label = %raw.label, "macro payload missing or unrecognized, degrading to unparseable");
            NutritionRecord {
                display_name: food_db::title_case(&raw.label),
                totals: Macros::ZERO,
                components: Vec::new(),
                source_kind: SourceKind::Unparseable,
                summary: Some(format!(
                    "Could not process nutritional information for {}.",
                    raw.label
                )),
            }
        }
    }
}

/// Normalize every result in a ranked candidate list, preserving order
#[must_use]
pub fn normalize_all(results: &[RawAnalysisResult]) -> Vec<NutritionRecord> {
    results.iter().map(normalize).collect()
}

/// Pick the raw result at `index` from a ranked candidate list
///
/// Callers re-run [`normalize`] on the returned result - a different
/// candidate can carry an entirely different macro shape, so normalization
/// is never cached across selection changes.
///
/// # Errors
///
/// An index outside `[0, len)` is a caller programming error: it fails fast
/// with [`crate::errors::ErrorCode::SelectionOutOfRange`] rather than
/// silently clamping.
pub fn select_candidate(
    results: &[RawAnalysisResult],
    index: usize,
) -> AppResult<&RawAnalysisResult> {
    results
        .get(index)
        .ok_or_else(|| AppError::selection_out_of_range(index, results.len()))
}

/// Decide the tagged shape for a raw result
///
/// The compound-food fallback runs between the aggregate and flat branches:
/// a flat payload whose label has a fixed breakdown on file is rewritten
/// into a component list, with the flat values kept as the authoritative
/// total.
fn classify(raw: &RawAnalysisResult) -> MacroShape {
    match &raw.macros {
        None | Some(RawMacros::Other(_)) => MacroShape::Unrecognized,
        Some(RawMacros::Summary(text)) => MacroShape::FreeText(text.clone()),
        Some(RawMacros::Object(obj)) => classify_object(&raw.label, obj),
    }
}

fn classify_object(label: &str, obj: &RawMacroObject) -> MacroShape {
    if !obj.components.is_empty() {
        let components = obj
            .components
            .iter()
            .map(|c| {
                NutritionComponent::new(
                    c.name.clone(),
                    Macros::new(c.calories, c.protein, c.carbs, c.fat),
                )
            })
            .collect();
        let total = obj
            .total
            .as_ref()
            .map(|t| Macros::new(t.calories, t.protein, t.carbs, t.fat));
        return MacroShape::ComponentList { components, total };
    }

    let totals = Macros::new(
        obj.calories.unwrap_or(0.0),
        obj.protein.unwrap_or(0.0),
        obj.carbs.unwrap_or(0.0),
        obj.fat.unwrap_or(0.0),
    );

    if let (Some(quantity), Some(base_item)) = (obj.quantity, &obj.base_item) {
        if quantity > 1.0 {
            return MacroShape::QuantityAggregate {
                quantity,
                base_item: base_item.clone(),
                totals,
            };
        }
    }

    if let Some(breakdown) = food_db::compound_breakdown(label) {
        let components = breakdown
            .iter()
            .map(|(name, macros)| NutritionComponent::new(*name, *macros))
            .collect();
        // Flat values stay authoritative when the backend sent any
        let total = (totals != Macros::ZERO).then_some(totals);
        return MacroShape::ComponentList { components, total };
    }

    MacroShape::Flat(totals)
}

/// Derive one synthetic per-unit component per item in the aggregate
///
/// Per-unit calories round to the nearest integer, the other macros to one
/// decimal place. The undivided totals stay authoritative; summing the
/// rounded per-unit values can drift, so the components are display-only
/// approximations.
fn per_unit_components(quantity: f64, base_item: &str, totals: Macros) -> Vec<NutritionComponent> {
    let count = quantity.round() as u32;
    let per_unit = Macros {
        calories: (totals.calories / quantity).round(),
        protein: round_tenth(totals.protein / quantity),
        carbs: round_tenth(totals.carbs / quantity),
        fat: round_tenth(totals.fat / quantity),
    };
    (1..=count)
        .map(|i| NutritionComponent::new(format!("{base_item} {i}"), per_unit))
        .collect()
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn sum_components(components: &[NutritionComponent]) -> Macros {
    components
        .iter()
        .fold(Macros::ZERO, |acc, c| acc.add(c.macros))
}

/// Compose a display name for a decomposed meal
///
/// More than one component: first component's name "with" the remaining
/// names. Otherwise the raw label carries through.
fn compound_display_name(label: &str, components: &[NutritionComponent]) -> String {
    match components {
        [] | [_] => food_db::title_case(label),
        [first, rest @ ..] => {
            let rest_names: Vec<&str> = rest.iter().map(|c| c.name.as_str()).collect();
            format!("{} with {}", first.name, rest_names.join(", "))
        }
    }
}

fn source_kind_hint(source: Option<&str>) -> SourceKind {
    match source {
        Some("ai_estimated") => SourceKind::AiEstimated,
        _ => SourceKind::Database,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparseable_records_keep_the_label_visible() {
        let raw = RawAnalysisResult {
            label: "mystery dish".to_owned(),
            macros: None,
            source: None,
        };
        let record = normalize(&raw);
        assert_eq!(record.source_kind, SourceKind::Unparseable);
        assert!(record.summary.as_deref().is_some_and(|s| s.contains("mystery dish")));
    }

    #[test]
    fn select_candidate_fails_fast_out_of_range() {
        let results = vec![RawAnalysisResult {
            label: "pizza".to_owned(),
            macros: None,
            source: None,
        }];
        assert!(select_candidate(&results, 0).is_ok());
        assert!(select_candidate(&results, 1).is_err());
        assert!(select_candidate(&[], 0).is_err());
    }

    #[test]
    fn per_unit_rounding_matches_display_rules() {
        let totals = Macros::new(450.0, 30.0, 45.0, 20.0);
        let components = per_unit_components(3.0, "taco", totals);
        assert_eq!(components.len(), 3);
        for c in &components {
            assert_eq!(c.macros.calories, 150.0);
            assert_eq!(c.macros.protein, 10.0);
            assert_eq!(c.macros.carbs, 15.0);
            assert_eq!(c.macros.fat, 6.7);
        }
        assert_eq!(components[0].name, "taco 1");
        assert_eq!(components[2].name, "taco 3");
    }
}

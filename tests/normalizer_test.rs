// ABOUTME: Integration tests for heterogeneous macro payload normalization
// ABOUTME: Covers all four wire shapes, the compound fallback, and candidate selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Macrolens Contributors

//! Normalizer tests
//!
//! Exercises the full normalization contract over payloads deserialized from
//! wire-shaped JSON: flat objects, AI free-text summaries, legacy quantity
//! aggregates, component lists with and without precomputed totals, and the
//! degrade-to-unparseable path.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use macrolens::models::{AnalysisResponse, Macros, RawAnalysisResult, SourceKind};
use macrolens::normalizer::{normalize, normalize_all, select_candidate};
use serde_json::json;

fn raw(value: serde_json::Value) -> RawAnalysisResult {
    serde_json::from_value(value).expect("test payload must deserialize")
}

// ============================================================================
// FLAT OBJECT SHAPE
// ============================================================================

#[test]
fn flat_pizza_becomes_database_record() {
    let record = normalize(&raw(json!({
        "label": "pizza",
        "macros": {"calories": 266, "protein": 11, "carbs": 33, "fat": 10}
    })));

    assert_eq!(record.display_name, "Pizza");
    assert_eq!(record.totals, Macros::new(266.0, 11.0, 33.0, 10.0));
    assert!(record.components.is_empty());
    assert_eq!(record.source_kind, SourceKind::Database);
}

#[test]
fn flat_missing_fields_default_to_zero_not_absent() {
    let record = normalize(&raw(json!({
        "label": "tuna",
        "macros": {"calories": 144, "protein": 30}
    })));

    assert_eq!(record.totals.carbs, 0.0);
    assert_eq!(record.totals.fat, 0.0);
    assert_eq!(record.totals.calories, 144.0);
}

#[test]
fn explicit_ai_source_overrides_database_kind() {
    let record = normalize(&raw(json!({
        "label": "casserole",
        "macros": {"calories": 310, "protein": 18, "carbs": 22, "fat": 16},
        "source": "ai_estimated"
    })));

    assert_eq!(record.source_kind, SourceKind::AiEstimated);
}

// ============================================================================
// FREE-TEXT SHAPE
// ============================================================================

#[test]
fn string_macros_become_display_only_free_text() {
    let record = normalize(&raw(json!({
        "label": "unidentified food",
        "macros": "Identified food: Unidentified Food\nCould not find nutritional information.",
        "source": "ai_estimated"
    })));

    assert_eq!(record.source_kind, SourceKind::FreeText);
    assert_eq!(record.totals, Macros::ZERO);
    assert!(record.components.is_empty());
    assert!(record.summary.as_deref().unwrap().contains("Identified food"));
    assert!(!record.is_loggable());
}

// ============================================================================
// UNPARSEABLE SHAPE
// ============================================================================

#[test]
fn missing_macros_degrade_to_unparseable_without_error() {
    let record = normalize(&raw(json!({"label": "mystery dish"})));

    assert_eq!(record.source_kind, SourceKind::Unparseable);
    assert_eq!(record.totals, Macros::ZERO);
    assert!(!record.is_loggable());
    assert!(record.summary.as_deref().unwrap().contains("mystery dish"));
}

#[test]
fn non_object_macros_degrade_instead_of_failing_deserialization() {
    let record = normalize(&raw(json!({"label": "glitch", "macros": 42})));
    assert_eq!(record.source_kind, SourceKind::Unparseable);
    assert_eq!(record.totals, Macros::ZERO);
}

// ============================================================================
// COMPONENT LIST SHAPE
// ============================================================================

#[test]
fn component_list_keeps_components_and_precomputed_total() {
    let record = normalize(&raw(json!({
        "label": "cheeseburger meal",
        "macros": {
            "components": [
                {"name": "Cheeseburger", "calories": 550, "protein": 25, "carbs": 40, "fat": 29},
                {"name": "French Fries", "calories": 312, "protein": 3.4, "carbs": 41, "fat": 15}
            ],
            "total": {"calories": 862, "protein": 28.4, "carbs": 81, "fat": 44}
        }
    })));

    assert_eq!(record.source_kind, SourceKind::AiEstimated);
    assert_eq!(record.components.len(), 2);
    assert_eq!(record.totals, Macros::new(862.0, 28.4, 81.0, 44.0));
    assert_eq!(record.display_name, "Cheeseburger with French Fries");
}

#[test]
fn component_list_without_total_sums_elementwise() {
    let record = normalize(&raw(json!({
        "label": "breakfast plate",
        "macros": {
            "components": [
                {"name": "Scrambled Eggs", "calories": 155, "protein": 13, "carbs": 1.1, "fat": 11},
                {"name": "Toast", "calories": 265, "protein": 9, "carbs": 49, "fat": 3.2},
                {"name": "Bacon", "calories": 541, "protein": 37, "carbs": 1.4, "fat": 42}
            ]
        }
    })));

    assert_eq!(record.totals.calories, 155.0 + 265.0 + 541.0);
    assert_eq!(record.totals.protein, 13.0 + 9.0 + 37.0);
    assert_eq!(record.totals.carbs, 1.1 + 49.0 + 1.4);
    assert_eq!(record.totals.fat, 11.0 + 3.2 + 42.0);
    assert_eq!(record.display_name, "Scrambled Eggs with Toast, Bacon");
}

// ============================================================================
// QUANTITY AGGREGATE SHAPE
// ============================================================================

#[test]
fn three_tacos_keep_undivided_totals_with_per_unit_components() {
    let record = normalize(&raw(json!({
        "label": "3 tacos",
        "macros": {
            "quantity": 3, "base_item": "taco",
            "calories": 450, "protein": 30, "carbs": 45, "fat": 20
        }
    })));

    // Totals are the original undivided values, never the re-summed rounding
    assert_eq!(record.totals, Macros::new(450.0, 30.0, 45.0, 20.0));
    assert_eq!(record.components.len(), 3);
    for (i, component) in record.components.iter().enumerate() {
        assert_eq!(component.name, format!("taco {}", i + 1));
        assert_eq!(component.macros.calories, 150.0);
        assert_eq!(component.macros.protein, 10.0);
        assert_eq!(component.macros.carbs, 15.0);
        assert_eq!(component.macros.fat, 6.7);
    }
}

#[test]
fn aggregate_totals_are_quantity_independent() {
    for quantity in [2, 3, 10] {
        let record = normalize(&raw(json!({
            "label": format!("{quantity} dumplings"),
            "macros": {
                "quantity": quantity, "base_item": "dumpling",
                "calories": 420, "protein": 18, "carbs": 55, "fat": 12
            }
        })));

        assert_eq!(
            record.totals,
            Macros::new(420.0, 18.0, 55.0, 12.0),
            "totals must not depend on quantity {quantity}"
        );
        assert_eq!(record.components.len(), quantity as usize);
    }
}

#[test]
fn quantity_of_one_is_not_an_aggregate() {
    let record = normalize(&raw(json!({
        "label": "taco",
        "macros": {"quantity": 1, "base_item": "taco", "calories": 210, "protein": 9, "carbs": 21, "fat": 10}
    })));

    assert!(record.components.is_empty());
    assert_eq!(record.totals.calories, 210.0);
}

// ============================================================================
// COMPOUND-FOOD FALLBACK
// ============================================================================

#[test]
fn burger_label_with_flat_macros_gets_fixed_breakdown() {
    let record = normalize(&raw(json!({
        "label": "cheeseburger",
        "macros": {"calories": 295, "protein": 17, "carbs": 30, "fat": 14}
    })));

    // Breakdown comes from the fallback table; flat values stay authoritative
    assert_eq!(record.components.len(), 2);
    assert_eq!(record.display_name, "Hamburger with French Fries");
    assert_eq!(record.totals, Macros::new(295.0, 17.0, 30.0, 14.0));
}

// ============================================================================
// INVARIANTS ACROSS ALL SHAPES
// ============================================================================

#[test]
fn all_shapes_yield_finite_non_negative_totals() {
    let payloads = vec![
        json!({"label": "pizza", "macros": {"calories": 266, "protein": 11, "carbs": 33, "fat": 10}}),
        json!({"label": "soup", "macros": "A light broth, roughly 75 kcal per 100g."}),
        json!({"label": "2 eggs", "macros": {"quantity": 2, "base_item": "egg", "calories": 310, "protein": 26, "carbs": 2.2, "fat": 22}}),
        json!({"label": "combo plate", "macros": {"components": [
            {"name": "Rice", "calories": 130, "protein": 2.7, "carbs": 28, "fat": 0.3}
        ]}}),
        json!({"label": "glitch"}),
    ];

    for payload in payloads {
        let record = normalize(&raw(payload.clone()));
        assert!(record.totals.is_finite(), "non-finite totals for {payload}");
        assert!(record.totals.calories >= 0.0);
        assert!(record.totals.protein >= 0.0);
        assert!(record.totals.carbs >= 0.0);
        assert!(record.totals.fat >= 0.0);
    }
}

// ============================================================================
// CANDIDATE SELECTION
// ============================================================================

#[test]
fn selection_is_bound_checked_and_renormalizes_per_shape() {
    let envelope: AnalysisResponse = serde_json::from_value(json!({
        "success": true,
        "results": [
            {"label": "pizza", "macros": {"calories": 266, "protein": 11, "carbs": 33, "fat": 10}},
            {"label": "flatbread", "macros": "Thin flatbread, macros unknown."}
        ],
        "candidates": [
            {"label": "pizza", "confidence": 92.3},
            {"label": "flatbread", "confidence": 41.0}
        ]
    }))
    .unwrap();

    let first = normalize(select_candidate(&envelope.results, 0).unwrap());
    assert_eq!(first.source_kind, SourceKind::Database);

    // The second candidate has an entirely different macro shape
    let second = normalize(select_candidate(&envelope.results, 1).unwrap());
    assert_eq!(second.source_kind, SourceKind::FreeText);

    let err = select_candidate(&envelope.results, 2).unwrap_err();
    assert_eq!(
        err.code,
        macrolens::errors::ErrorCode::SelectionOutOfRange
    );
}

#[test]
fn normalize_all_preserves_ranking_order() {
    let results: Vec<RawAnalysisResult> = vec![
        raw(json!({"label": "pizza", "macros": {"calories": 266}})),
        raw(json!({"label": "salad", "macros": {"calories": 152}})),
    ];
    let records = normalize_all(&results);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].display_name, "Pizza");
    assert_eq!(records[1].display_name, "Salad");
}

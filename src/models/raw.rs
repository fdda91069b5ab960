// ABOUTME: Wire-format models for the image analysis backend response
// ABOUTME: AnalysisResponse envelope, RawAnalysisResult, and the untagged macro payload union
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Macrolens Contributors

//! Raw analysis payload models
//!
//! The backend returns food identifications in at least four structurally
//! different `macros` shapes: a free-text AI summary (string), a flat macro
//! object, a legacy "quantity x base item" aggregate, and a component list
//! with an optional precomputed total. All four deserialize through
//! [`RawMacros`]; classification into a tagged shape happens exactly once, at
//! the normalizer boundary. Downstream code never inspects these types.

use serde::{Deserialize, Serialize};

/// Response envelope from the analysis endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Whether the backend processed the image successfully
    pub success: bool,

    /// Error message, surfaced verbatim to the user when `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Ranked food identifications, index 0 = best match
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<RawAnalysisResult>,

    /// Identification confidence scores, separate from `results`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<IdentificationCandidate>,
}

/// One identification confidence entry from the vision stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentificationCandidate {
    /// Label the vision stage assigned
    pub label: String,
    /// Confidence as a percentage (0-100)
    pub confidence: f64,
}

/// One ranked food identification with its macro payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAnalysisResult {
    /// Human-oriented food label (e.g. "pizza", "3 tacos")
    pub label: String,

    /// Macro payload in one of the four wire shapes; absent payloads
    /// degrade to an unparseable record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macros: Option<RawMacros>,

    /// Backend hint for how the macros were produced (e.g. "ai_estimated")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl RawAnalysisResult {
    /// Build a result with a structured macro object (test and fallback helper)
    #[must_use]
    pub fn structured(label: impl Into<String>, macros: RawMacroObject) -> Self {
        Self {
            label: label.into(),
            macros: Some(RawMacros::Object(Box::new(macros))),
            source: None,
        }
    }
}

/// Untagged union over the macro payload wire shapes
///
/// A string payload is an AI-generated summary; everything else arrives as an
/// object whose optional fields decide the shape (components, quantity
/// aggregate, or flat).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawMacros {
    /// Free-text AI summary, not a structured record
    Summary(String),
    /// Structured macro object (flat, aggregate, or component list)
    Object(Box<RawMacroObject>),
    /// Anything else the backend might send; degrades to unparseable
    /// instead of failing envelope deserialization
    Other(serde_json::Value),
}

/// Structured macro object as it appears on the wire
///
/// All fields optional: the normalizer decides which shape this is and
/// defaults missing numerics to zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMacroObject {
    /// Calories in kcal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    /// Protein in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    /// Carbohydrates in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    /// Fat in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,

    /// Number of identical units in the legacy aggregate encoding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    /// Base item name for the aggregate encoding (e.g. "taco")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_item: Option<String>,

    /// Constituents of a compound meal, when already decomposed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<RawComponent>,
    /// Precomputed total across `components`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<RawTotal>,
}

/// One constituent of a compound meal on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawComponent {
    /// Component name (e.g. "French Fries")
    pub name: String,
    /// Calories in kcal
    #[serde(default)]
    pub calories: f64,
    /// Protein in grams
    #[serde(default)]
    pub protein: f64,
    /// Carbohydrates in grams
    #[serde(default)]
    pub carbs: f64,
    /// Fat in grams
    #[serde(default)]
    pub fat: f64,
}

/// Precomputed compound-meal total on the wire
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTotal {
    /// Calories in kcal
    #[serde(default)]
    pub calories: f64,
    /// Protein in grams
    #[serde(default)]
    pub protein: f64,
    /// Carbohydrates in grams
    #[serde(default)]
    pub carbs: f64,
    /// Fat in grams
    #[serde(default)]
    pub fat: f64,
}

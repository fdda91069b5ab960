// ABOUTME: Data model modules for wire payloads and canonical nutrition records
// ABOUTME: Re-exports the types the rest of the engine works with
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Macrolens Contributors

//! Data models
//!
//! Split along the normalizer boundary: [`raw`] holds the backend wire
//! shapes, [`nutrition`] the canonical records everything downstream uses.

/// Wire-format models for the analysis backend response
pub mod raw;

/// Canonical nutrition records, meal slots, and logged items
pub mod nutrition;

pub use nutrition::{
    LoggedItem, Macros, MealSlot, NutritionComponent, NutritionRecord, SourceKind,
};
pub use raw::{
    AnalysisResponse, IdentificationCandidate, RawAnalysisResult, RawComponent, RawMacroObject,
    RawMacros, RawTotal,
};

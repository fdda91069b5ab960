// ABOUTME: Library entry point for the macrolens photo-to-macros nutrition engine
// ABOUTME: Normalizer, meal ledger, suggestion engine, session state, and backend client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Macrolens Contributors

#![deny(unsafe_code)]

//! # Macrolens
//!
//! Photograph a meal, get estimated macro-nutrients, accumulate them into a
//! running daily food log, and ask what to eat next given the remaining
//! budget.
//!
//! The interesting part is not the HTTP call - it is reconciling the
//! analysis backend's four structurally different result shapes into one
//! canonical [`models::NutritionRecord`], keeping a mutable per-meal ledger
//! alive across repeated analyses, and deriving a constrained meal
//! suggestion from its totals.
//!
//! ## Architecture
//!
//! - [`normalizer`]: classifies each raw result's macro payload once and
//!   lowers it to a canonical record; never fails, degrades to display-only
//! - [`ledger`]: meal slot -> ordered logged items, O(n) on-demand totals
//! - [`suggestion`]: pure remaining-budget division plus example foods
//! - [`session`]: owns the above per session, guards in-flight requests,
//!   and discards stale responses via a monotonic request token
//! - [`external`]: the async analysis backend client (the sole async
//!   boundary)
//! - [`food_db`]: static local nutrition data, including the compound-food
//!   fallback breakdowns
//!
//! ## Example
//!
//! ```rust
//! use macrolens::models::{AnalysisResponse, MealSlot, RawAnalysisResult, RawMacroObject};
//! use macrolens::session::AnalysisSession;
//! use macrolens::suggestion::DietPreference;
//!
//! let mut session = AnalysisSession::default();
//! let token = session.begin_analysis()?;
//!
//! // A flat "database" result, as the backend would return it
//! let response = AnalysisResponse {
//!     success: true,
//!     error: None,
//!     results: vec![RawAnalysisResult::structured(
//!         "pizza",
//!         RawMacroObject {
//!             calories: Some(266.0),
//!             protein: Some(11.0),
//!             carbs: Some(33.0),
//!             fat: Some(10.0),
//!             ..RawMacroObject::default()
//!         },
//!     )],
//!     candidates: vec![],
//! };
//!
//! session.complete_analysis(token, response)?;
//! session.log_selected(MealSlot::Lunch)?;
//!
//! let suggestion = session.suggest(MealSlot::Dinner, DietPreference::None);
//! assert!(suggestion.target_macros.calories > 0.0);
//! # Ok::<(), macrolens::errors::AppError>(())
//! ```

/// Unified error handling with standard error codes
pub mod errors;

/// Wire payload and canonical nutrition models
pub mod models;

/// Heterogeneous-result normalization
pub mod normalizer;

/// Per-meal ledger with running totals
pub mod ledger;

/// Remaining-budget meal suggestions
pub mod suggestion;

/// Per-session state: ledger, candidates, selection, request tokens
pub mod session;

/// External API clients (analysis backend)
pub mod external;

/// Static local nutrition data and summary text
pub mod food_db;

/// Structured logging setup
pub mod logging;

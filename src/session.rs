// ABOUTME: Per-session analysis state: ledger, current candidates, selection, request token
// ABOUTME: Guards against concurrent submissions and discards stale analysis responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Macrolens Contributors

//! Analysis session
//!
//! Owns the mutable per-session state: the [`MealLedger`], the current
//! analysis (ranked candidates plus a selected index), and the monotonic
//! request token used to discard stale responses. Explicitly constructed and
//! explicitly owned - no ambient globals - so the ledger stays testable in
//! isolation and teardown is the owner dropping the session.
//!
//! Concurrency model: single-threaded and event-driven. The only async
//! boundary is the analysis call itself; while one is in flight the session
//! refuses re-submission for the same upload but keeps accepting ledger
//! edits, which belong to previously completed analyses. Selecting a new
//! photo supersedes the in-flight request: its token goes stale and its
//! eventual response is discarded at arrival, never merged or displayed.

use crate::errors::{AppError, AppResult};
use crate::ledger::{LedgerSnapshot, MealLedger};
use crate::models::{
    AnalysisResponse, IdentificationCandidate, Macros, MealSlot, NutritionRecord,
    RawAnalysisResult,
};
use crate::normalizer;
use crate::suggestion::{self, DietPreference, SuggestionResult, DEFAULT_DAILY_TARGET};
use tracing::{debug, info};

/// Opaque token identifying one analysis request generation
///
/// Compared at response arrival: a token older than the session's current
/// generation marks the response as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Outcome of delivering an analysis response to the session
#[derive(Debug, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// Results normalized and stored; best match selected
    Ready {
        /// Number of ranked candidates now available
        candidate_count: usize,
    },
    /// Backend found no food; neutral state, previous analysis cleared
    NothingDetected,
    /// Response belonged to a superseded request and was discarded
    Stale,
}

/// Current analysis state: raw results plus the selected normalized record
#[derive(Debug)]
struct CurrentAnalysis {
    raw_results: Vec<RawAnalysisResult>,
    candidates: Vec<IdentificationCandidate>,
    selected_index: usize,
    selected_record: NutritionRecord,
}

/// Per-session engine state
#[derive(Debug)]
pub struct AnalysisSession {
    ledger: MealLedger,
    daily_target: Macros,
    generation: u64,
    in_flight: bool,
    current: Option<CurrentAnalysis>,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new(DEFAULT_DAILY_TARGET)
    }
}

impl AnalysisSession {
    /// Create a session with an empty ledger and the given daily budget
    #[must_use]
    pub fn new(daily_target: Macros) -> Self {
        Self {
            ledger: MealLedger::new(),
            daily_target,
            generation: 0,
            in_flight: false,
            current: None,
        }
    }

    /// Start an analysis request for the current upload
    ///
    /// Every request must be resolved by [`Self::complete_analysis`] or
    /// [`Self::fail_analysis`] (or superseded via
    /// [`Self::begin_new_photo`]); otherwise the session stays busy.
    ///
    /// # Errors
    ///
    /// Refuses with `AnalysisInFlight` while a request for the same upload
    /// is pending; ledger edits remain allowed in the meantime.
    pub fn begin_analysis(&mut self) -> AppResult<RequestToken> {
        if self.in_flight {
            return Err(AppError::analysis_in_flight());
        }
        self.in_flight = true;
        self.generation += 1;
        debug!(generation = self.generation, "analysis request started");
        Ok(RequestToken(self.generation))
    }

    /// Start an analysis for a newly selected photo, superseding any
    /// in-flight request
    ///
    /// The superseded request's token goes stale; its eventual response is
    /// discarded at arrival.
    pub fn begin_new_photo(&mut self) -> RequestToken {
        if self.in_flight {
            debug!(generation = self.generation, "superseding in-flight analysis");
        }
        self.in_flight = true;
        self.generation += 1;
        RequestToken(self.generation)
    }

    /// Whether an analysis request is currently pending
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Record that the analysis call for `token` died without a response
    ///
    /// Clears the in-flight flag so the next [`Self::begin_analysis`] retry
    /// is accepted; analysis and ledger state are untouched. A stale token
    /// is ignored - the failure of a superseded request must not cancel the
    /// one that replaced it.
    pub fn fail_analysis(&mut self, token: RequestToken) {
        if token.0 != self.generation {
            debug!(
                stale = token.0,
                current = self.generation,
                "ignoring failure of superseded analysis"
            );
            return;
        }
        debug!(generation = self.generation, "analysis request failed");
        self.in_flight = false;
    }

    /// Deliver a completed analysis response
    ///
    /// Stale tokens are discarded without touching any state. Previously
    /// logged ledger items always survive, whatever the outcome.
    ///
    /// # Errors
    ///
    /// `AnalysisFailed` with the backend's message verbatim when the backend
    /// reports `success = false`; analysis state is left unchanged.
    pub fn complete_analysis(
        &mut self,
        token: RequestToken,
        response: AnalysisResponse,
    ) -> AppResult<AnalysisOutcome> {
        if token.0 != self.generation {
            debug!(
                stale = token.0,
                current = self.generation,
                "discarding stale analysis response"
            );
            return Ok(AnalysisOutcome::Stale);
        }
        self.in_flight = false;

        if !response.success {
            let message = response
                .error
                .unwrap_or_else(|| "analysis failed with no error message".to_owned());
            return Err(AppError::analysis_failed(message));
        }

        let Some(best) = response.results.first() else {
            self.current = None;
            return Ok(AnalysisOutcome::NothingDetected);
        };

        let selected_record = normalizer::normalize(best);
        let candidate_count = response.results.len();
        info!(
            candidates = candidate_count,
            best = %selected_record.display_name,
            "analysis ready"
        );
        self.current = Some(CurrentAnalysis {
            raw_results: response.results,
            candidates: response.candidates,
            selected_index: 0,
            selected_record,
        });
        Ok(AnalysisOutcome::Ready { candidate_count })
    }

    /// Change the selected candidate and re-normalize it
    ///
    /// Normalization is never cached across selection changes: a different
    /// candidate can carry an entirely different macro shape.
    ///
    /// # Errors
    ///
    /// `InvalidInput` with no analysis present; `SelectionOutOfRange` for an
    /// index outside the candidate list.
    pub fn select_candidate(&mut self, index: usize) -> AppResult<&NutritionRecord> {
        let current = self
            .current
            .as_mut()
            .ok_or_else(|| AppError::invalid_input("no analysis results to select from"))?;
        let raw = normalizer::select_candidate(&current.raw_results, index)?;
        current.selected_record = normalizer::normalize(raw);
        current.selected_index = index;
        Ok(&current.selected_record)
    }

    /// The currently selected normalized record, if an analysis is present
    #[must_use]
    pub fn selected_record(&self) -> Option<&NutritionRecord> {
        self.current.as_ref().map(|c| &c.selected_record)
    }

    /// Index of the selected candidate
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.current.as_ref().map(|c| c.selected_index)
    }

    /// All normalized candidates for display, best match first
    #[must_use]
    pub fn normalized_candidates(&self) -> Vec<NutritionRecord> {
        self.current
            .as_ref()
            .map(|c| normalizer::normalize_all(&c.raw_results))
            .unwrap_or_default()
    }

    /// Identification confidence entries from the vision stage
    #[must_use]
    pub fn identification_candidates(&self) -> &[IdentificationCandidate] {
        self.current.as_ref().map_or(&[], |c| c.candidates.as_slice())
    }

    /// Log the currently selected record into a meal slot
    ///
    /// # Errors
    ///
    /// `InvalidInput` when no analysis is present or the selected record has
    /// no meaningful totals (free-text or unparseable).
    pub fn log_selected(&mut self, slot: MealSlot) -> AppResult<()> {
        let record = self
            .selected_record()
            .ok_or_else(|| AppError::invalid_input("no analysis result selected"))?;
        if !record.is_loggable() {
            return Err(AppError::invalid_input(format!(
                "'{}' has no structured macros and cannot be logged",
                record.display_name
            )));
        }
        let record = record.clone();
        self.ledger.add_item(slot, &record);
        Ok(())
    }

    /// Remove a logged item by slot and display position
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an out-of-range position; nothing is mutated.
    pub fn remove_logged(&mut self, slot: MealSlot, position: usize) -> AppResult<()> {
        self.ledger.remove_item(slot, position).map(|_| ())
    }

    /// Running macro totals over everything logged this session
    #[must_use]
    pub fn totals(&self) -> Macros {
        self.ledger.totals()
    }

    /// Read-only ledger view for the rendering surface
    #[must_use]
    pub fn ledger_snapshot(&self) -> LedgerSnapshot {
        self.ledger.snapshot()
    }

    /// Direct ledger access for display iteration
    #[must_use]
    pub fn ledger(&self) -> &MealLedger {
        &self.ledger
    }

    /// Suggest what to eat next for a slot under the session's daily budget
    #[must_use]
    pub fn suggest(&self, slot: MealSlot, preference: DietPreference) -> SuggestionResult {
        suggestion::suggest(self.ledger.totals(), self.daily_target, preference, slot)
    }

    /// The configured full-day macro budget
    #[must_use]
    pub fn daily_target(&self) -> Macros {
        self.daily_target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawMacroObject, RawMacros};

    fn pizza_response() -> AnalysisResponse {
        AnalysisResponse {
            success: true,
            error: None,
            results: vec![RawAnalysisResult {
                label: "pizza".to_owned(),
                macros: Some(RawMacros::Object(Box::new(RawMacroObject {
                    calories: Some(266.0),
                    protein: Some(11.0),
                    carbs: Some(33.0),
                    fat: Some(10.0),
                    ..RawMacroObject::default()
                }))),
                source: None,
            }],
            candidates: Vec::new(),
        }
    }

    #[test]
    fn resubmission_refused_while_in_flight() {
        let mut session = AnalysisSession::default();
        let _token = session.begin_analysis().unwrap();
        assert!(session.begin_analysis().is_err());
    }

    #[test]
    fn new_photo_supersedes_and_stales_old_token() {
        let mut session = AnalysisSession::default();
        let old = session.begin_analysis().unwrap();
        let fresh = session.begin_new_photo();

        let outcome = session.complete_analysis(old, pizza_response()).unwrap();
        assert_eq!(outcome, AnalysisOutcome::Stale);
        assert!(session.selected_record().is_none());

        let outcome = session.complete_analysis(fresh, pizza_response()).unwrap();
        assert!(matches!(outcome, AnalysisOutcome::Ready { candidate_count: 1 }));
        assert!(session.selected_record().is_some());
    }

    #[test]
    fn backend_failure_surfaces_message_verbatim() {
        let mut session = AnalysisSession::default();
        let token = session.begin_analysis().unwrap();
        let response = AnalysisResponse {
            success: false,
            error: Some("Google Vision API is not configured properly.".to_owned()),
            results: Vec::new(),
            candidates: Vec::new(),
        };
        let err = session.complete_analysis(token, response).unwrap_err();
        assert_eq!(err.message, "Google Vision API is not configured properly.");
    }
}

// ABOUTME: Unified error handling for the macrolens engine
// ABOUTME: ErrorCode taxonomy, AppError type, and the AppResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Macrolens Contributors

//! # Unified Error Handling
//!
//! One error type for the whole engine. Every failure carries an [`ErrorCode`]
//! so callers can map it to a visible state change without string matching.
//!
//! The taxonomy mirrors the user-facing failure modes:
//! - [`ErrorCode::NetworkFailure`] is the only error that reaches the user as
//!   an actionable retry prompt; it never mutates session state.
//! - [`ErrorCode::SelectionOutOfRange`] marks a caller programming error
//!   (fail fast, never clamp).
//!
//! A backend response with no results is not an error either: the session
//! reports it as a neutral "nothing detected" outcome.
//!
//! Note that an unparseable macro payload is *not* an error: normalization
//! degrades it to a display-only record (see `SourceKind::Unparseable`)
//! because the UI must always render something for an analysis attempt.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Analysis call failed or timed out; retryable, no state mutation
    #[serde(rename = "NETWORK_FAILURE")]
    NetworkFailure,
    /// Backend processed the call but reported a failure; its message is
    /// surfaced verbatim
    #[serde(rename = "ANALYSIS_FAILED")]
    AnalysisFailed,
    /// Candidate index outside `[0, len)`; caller programming error
    #[serde(rename = "SELECTION_OUT_OF_RANGE")]
    SelectionOutOfRange,
    /// An analysis request is already in flight for this session
    #[serde(rename = "ANALYSIS_IN_FLIGHT")]
    AnalysisInFlight,
    /// Caller-supplied value failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// Wire payload could not be serialized or deserialized
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError,
}

impl ErrorCode {
    /// Human-readable description of the error code
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::NetworkFailure => "The analysis service could not be reached",
            Self::AnalysisFailed => "The analysis service reported an error",
            Self::SelectionOutOfRange => "Candidate selection index is out of range",
            Self::AnalysisInFlight => "An analysis request is already in progress",
            Self::InvalidInput => "The provided input is invalid",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether the user should be offered a retry for this error
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkFailure | Self::AnalysisInFlight)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Unified error type for the engine
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new error with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach a source error for chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Analysis call failed or timed out
    #[must_use]
    pub fn network_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NetworkFailure, message)
    }

    /// Backend reported a failure; `message` is its error string, verbatim
    #[must_use]
    pub fn analysis_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AnalysisFailed, message)
    }

    /// Candidate index outside the valid range
    #[must_use]
    pub fn selection_out_of_range(index: usize, len: usize) -> Self {
        Self::new(
            ErrorCode::SelectionOutOfRange,
            format!("candidate index {index} out of range for {len} results"),
        )
    }

    /// A request is already in flight
    #[must_use]
    pub fn analysis_in_flight() -> Self {
        Self::new(
            ErrorCode::AnalysisInFlight,
            "an analysis request is already in progress; wait or select a new photo",
        )
    }

    /// Caller-supplied value failed validation
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Wire payload could not be (de)serialized
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias using [`AppError`]
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_failure_is_retryable() {
        let err = AppError::network_failure("connection refused");
        assert!(err.code.is_retryable());
    }

    #[test]
    fn selection_error_reports_index_and_len() {
        let err = AppError::selection_out_of_range(5, 3);
        assert_eq!(err.code, ErrorCode::SelectionOutOfRange);
        assert!(err.message.contains('5'));
        assert!(err.message.contains('3'));
    }

    #[test]
    fn display_includes_description_and_message() {
        let err = AppError::invalid_input("bad slot");
        let rendered = err.to_string();
        assert!(rendered.contains("invalid"));
        assert!(rendered.contains("bad slot"));
    }
}

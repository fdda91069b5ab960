// ABOUTME: HTTP client for the image analysis backend (multipart POST of a meal photo)
// ABOUTME: Maps transport and decode failures onto the engine's error taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Macrolens Contributors

//! Analysis backend client
//!
//! Thin boundary adapter around the analysis endpoint: POST one image as
//! multipart form data, get back the [`AnalysisResponse`] envelope. This is
//! the engine's sole asynchronous boundary - everything downstream of the
//! returned envelope is synchronous.
//!
//! Transport failures, timeouts, and non-2xx statuses all map to
//! `NetworkFailure`; a malformed body maps to `SerializationError`. Neither
//! mutates session state - the caller reports the failure back to the
//! session with `fail_analysis` so a retry can start.

use crate::errors::{AppError, AppResult};
use crate::models::AnalysisResponse;
use std::env;
use std::time::Duration;
use tracing::{debug, warn};

/// Environment variable overriding the backend base URL
const API_URL_ENV: &str = "MACROLENS_API_URL";

/// Default backend base URL for local development
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Analysis endpoint path, relative to the base URL
const ANALYZE_PATH: &str = "/analyze";

/// Analysis client configuration
#[derive(Debug, Clone)]
pub struct AnalysisClientConfig {
    /// Base URL of the analysis backend
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AnalysisClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: 30,
        }
    }
}

impl AnalysisClientConfig {
    /// Build a config from the environment, falling back to defaults
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        Self {
            base_url,
            ..Self::default()
        }
    }
}

/// Client for the image analysis backend
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    config: AnalysisClientConfig,
    http: reqwest::Client,
}

impl AnalysisClient {
    /// Create a client with the given configuration
    ///
    /// # Errors
    ///
    /// `NetworkFailure` if the underlying HTTP client cannot be constructed.
    pub fn new(config: AnalysisClientConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                AppError::network_failure("failed to construct HTTP client").with_source(e)
            })?;
        Ok(Self { config, http })
    }

    /// Analyze a meal photo
    ///
    /// Sends the image bytes as a multipart `file` field and deserializes
    /// the response envelope. A `success = false` envelope is returned as-is;
    /// interpreting it is the session's job.
    ///
    /// # Errors
    ///
    /// `NetworkFailure` for transport errors, timeouts, and non-2xx
    /// statuses; `SerializationError` for undecodable bodies.
    pub async fn analyze(
        &self,
        image_bytes: Vec<u8>,
        filename: impl Into<String>,
    ) -> AppResult<AnalysisResponse> {
        let url = format!("{}{ANALYZE_PATH}", self.config.base_url);
        let filename = filename.into();
        debug!(%url, bytes = image_bytes.len(), "sending image for analysis");

        let part = reqwest::multipart::Part::bytes(image_bytes).file_name(filename);
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                let reason = if e.is_timeout() {
                    "analysis request timed out"
                } else {
                    "analysis request failed"
                };
                warn!(error = %e, "analysis call failed");
                AppError::network_failure(reason).with_source(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::network_failure(format!(
                "analysis service returned HTTP {status}"
            )));
        }

        response.json::<AnalysisResponse>().await.map_err(|e| {
            AppError::serialization("could not decode analysis response").with_source(e)
        })
    }
}

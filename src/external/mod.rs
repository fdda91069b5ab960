// ABOUTME: External service clients consumed at the engine boundary
// ABOUTME: Currently the image analysis backend client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Macrolens Contributors

//! External API clients

/// Image analysis backend client
pub mod analysis_client;

pub use analysis_client::{AnalysisClient, AnalysisClientConfig};

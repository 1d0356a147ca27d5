// ABOUTME: Loads session, exercise, module, and log fixtures from a directory of JSON files
// ABOUTME: Feeds the in-memory store for the CLI and integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use coach_core::errors::{AppError, AppResult};
use coach_core::models::{ExerciseRecord, LegacyModule, PerformanceLog, SessionDefinition};
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Sessions file inside a fixture directory
pub const SESSIONS_FILE: &str = "sessions.json";
/// Exercise library file inside a fixture directory
pub const EXERCISES_FILE: &str = "exercises.json";
/// Legacy modules file inside a fixture directory
pub const MODULES_FILE: &str = "modules.json";
/// Performance logs file inside a fixture directory
pub const LOGS_FILE: &str = "logs.json";

/// Every collection a fixture directory can hold
#[derive(Debug, Clone, Default)]
pub struct FixtureSet {
    /// Session definitions
    pub sessions: Vec<SessionDefinition>,
    /// Exercise library
    pub exercises: Vec<ExerciseRecord>,
    /// Legacy modules collection
    pub modules: Vec<LegacyModule>,
    /// Performance logs
    pub logs: Vec<PerformanceLog>,
}

impl FixtureSet {
    /// Load every collection from `dir`; absent files yield empty collections
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be read or is not a JSON array
    /// of the expected records
    pub async fn load(dir: &Path) -> AppResult<Self> {
        Ok(Self {
            sessions: read_optional_list(&dir.join(SESSIONS_FILE)).await?,
            exercises: read_optional_list(&dir.join(EXERCISES_FILE)).await?,
            modules: read_optional_list(&dir.join(MODULES_FILE)).await?,
            logs: read_optional_list(&dir.join(LOGS_FILE)).await?,
        })
    }
}

/// Read and decode one JSON file
///
/// # Errors
///
/// Returns a storage error if the file cannot be read, or an invalid-format
/// error if its content does not decode as `T`
pub async fn read_json_file<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::storage(format!("Failed to read {}: {e}", path.display())).with_source(e)
    })?;
    serde_json::from_str(&content).map_err(|e| {
        AppError::invalid_format(format!("Failed to parse {}: {e}", path.display())).with_source(e)
    })
}

async fn read_optional_list<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<T>> {
    match tokio::fs::metadata(path).await {
        Ok(_) => read_json_file(path).await,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "Fixture file absent; using empty collection");
            Ok(Vec::new())
        }
        Err(e) => Err(AppError::from(e)),
    }
}

// ABOUTME: Read-only collaborator contracts consumed by the pipeline
// ABOUTME: Session store, exercise library, legacy modules, and performance logs behind async traits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// JSON fixture loading for the in-memory store
pub mod json_file;
/// In-memory implementation of every store trait
pub mod memory;

pub use json_file::FixtureSet;
pub use memory::InMemoryStore;

use async_trait::async_trait;
use coach_core::errors::AppResult;
use coach_core::models::{ExerciseRecord, LegacyModule, PerformanceLog, SessionDefinition};

/// Source of stored session definitions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load one session; `Ok(None)` when it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the read
    async fn get_by_id(&self, session_id: &str) -> AppResult<Option<SessionDefinition>>;
}

/// The canonical exercise library
#[async_trait]
pub trait ExerciseLibrary: Send + Sync {
    /// Every library record, in library order
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the read
    async fn get_all_exercises(&self) -> AppResult<Vec<ExerciseRecord>>;
}

/// Stored modules referenced by legacy sessions
#[async_trait]
pub trait LegacyModuleStore: Send + Sync {
    /// Every stored module
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the read
    async fn get_all_modules(&self) -> AppResult<Vec<LegacyModule>>;
}

/// Results recorded by the session runner
#[async_trait]
pub trait PerformanceLogStore: Send + Sync {
    /// Most recent non-pending log of an athlete on a module
    ///
    /// When `stable_id` is given it takes precedence over `module_id` for
    /// matching. Implementations may return a pending log; callers filter it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the read
    async fn get_last_log(
        &self,
        athlete_id: &str,
        module_id: &str,
        stable_id: Option<&str>,
    ) -> AppResult<Option<PerformanceLog>>;
}

/// Latest non-pending log among candidates, by recording time
///
/// Logs without a timestamp sort before timestamped ones; among equals the
/// last candidate wins.
pub fn latest_completed<'a>(
    logs: impl IntoIterator<Item = &'a PerformanceLog>,
) -> Option<&'a PerformanceLog> {
    logs.into_iter()
        .filter(|log| !log.is_pending())
        .max_by_key(|log| log.recorded_at)
}

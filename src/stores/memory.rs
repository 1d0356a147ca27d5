// ABOUTME: In-memory store backing every collaborator trait
// ABOUTME: Shared via Arc<RwLock> so clones observe the same data; used by the CLI and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    latest_completed, ExerciseLibrary, FixtureSet, LegacyModuleStore, PerformanceLogStore,
    SessionStore,
};
use async_trait::async_trait;
use coach_core::errors::{AppError, AppResult};
use coach_core::models::{ExerciseRecord, LegacyModule, PerformanceLog, SessionDefinition};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct StoreData {
    sessions: HashMap<String, SessionDefinition>,
    exercises: Vec<ExerciseRecord>,
    modules: Vec<LegacyModule>,
    logs: Vec<PerformanceLog>,
}

/// In-memory implementation of the session, library, module, and log stores
///
/// Clones share state, so a test can keep a handle for seeding while the
/// hydrator holds another behind `Arc<dyn ...>`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    data: Arc<RwLock<StoreData>>,
}

impl InMemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded from fixtures
    ///
    /// # Errors
    ///
    /// Returns an error if a fixture session has no identifier
    pub async fn from_fixtures(fixtures: FixtureSet) -> AppResult<Self> {
        let store = Self::new();
        for session in fixtures.sessions {
            store.insert_session(session).await?;
        }
        store.set_exercises(fixtures.exercises).await;
        store.set_modules(fixtures.modules).await;
        for log in fixtures.logs {
            store.record_log(log).await;
        }
        Ok(store)
    }

    /// Insert or replace a session, keyed by its identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the session has no identifier
    pub async fn insert_session(&self, session: SessionDefinition) -> AppResult<()> {
        let id = session
            .id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::invalid_input("Session definition has no id"))?;
        self.data.write().await.sessions.insert(id, session);
        Ok(())
    }

    /// Replace the exercise library
    pub async fn set_exercises(&self, exercises: Vec<ExerciseRecord>) {
        self.data.write().await.exercises = exercises;
    }

    /// Replace the legacy modules collection
    pub async fn set_modules(&self, modules: Vec<LegacyModule>) {
        self.data.write().await.modules = modules;
    }

    /// Append a performance log
    pub async fn record_log(&self, log: PerformanceLog) {
        self.data.write().await.logs.push(log);
    }

    /// Number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.data.read().await.sessions.len()
    }
}

#[async_trait]
impl SessionStore for InMemoryStore {
    async fn get_by_id(&self, session_id: &str) -> AppResult<Option<SessionDefinition>> {
        Ok(self.data.read().await.sessions.get(session_id).cloned())
    }
}

#[async_trait]
impl ExerciseLibrary for InMemoryStore {
    async fn get_all_exercises(&self) -> AppResult<Vec<ExerciseRecord>> {
        Ok(self.data.read().await.exercises.clone())
    }
}

#[async_trait]
impl LegacyModuleStore for InMemoryStore {
    async fn get_all_modules(&self) -> AppResult<Vec<LegacyModule>> {
        Ok(self.data.read().await.modules.clone())
    }
}

#[async_trait]
impl PerformanceLogStore for InMemoryStore {
    async fn get_last_log(
        &self,
        athlete_id: &str,
        module_id: &str,
        stable_id: Option<&str>,
    ) -> AppResult<Option<PerformanceLog>> {
        let data = self.data.read().await;
        let candidates = data
            .logs
            .iter()
            .filter(|log| log.athlete_id == athlete_id && log.matches(module_id, stable_id));
        Ok(latest_completed(candidates).cloned())
    }
}

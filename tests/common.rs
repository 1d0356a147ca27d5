// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides sample library/session documents and instrumented collaborator stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `coach_session_pipeline`

use async_trait::async_trait;
use coach_session_pipeline::errors::{AppError, AppResult};
use coach_session_pipeline::models::{
    ExerciseRecord, LegacyModule, PerformanceLog, SessionDefinition,
};
use coach_session_pipeline::stores::{
    ExerciseLibrary, InMemoryStore, LegacyModuleStore, PerformanceLogStore, SessionStore,
};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging once per test binary
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Library documents as stored, mixing field-name generations
pub fn library_json() -> Value {
    json!([
        {
            "id": "lib-bench",
            "name": "Bench Press",
            "nameEs": "Press Banca",
            "descriptionEs": "Empuje horizontal con barra",
            "gifUrl": "https://cdn.example.com/bench.gif",
            "equipment": "Barra",
            "quality": "fuerza",
            "pattern": "empuje horizontal",
            "loadable": true
        },
        {
            "_id": "lib-squat",
            "name": "Back Squat",
            "nombre": "Sentadilla trasera",
            "instructions": ["Pies al ancho de hombros", "Baja controlado"],
            "youtubeUrl": "https://www.youtube.com/watch?v=abcDEF12345",
            "equipment": "Barra",
            "quality": "fuerza",
            "movementPattern": "sentadilla"
        },
        {
            "id": "lib-burpee",
            "name": "Burpee",
            "nameEs": "Burpees",
            "description": "Full body",
            "image": "https://cdn.example.com/burpee.png",
            "equipment": "Peso corporal",
            "quality": "resistencia"
        },
        {
            "id": "lib-row",
            "name": "Row",
            "nameEs": "Remo ergómetro",
            "videoUrl": "https://cdn.example.com/row.mp4",
            "equipment": "Remo",
            "quality": "resistencia"
        },
        {
            "id": "lib-plank",
            "name": "Plank",
            "nameEs": "Plancha",
            "equipment": "Sin equipo",
            "quality": "core"
        }
    ])
}

/// Decoded sample library
pub fn library() -> Vec<ExerciseRecord> {
    serde_json::from_value(library_json()).unwrap_or_default()
}

/// Session-embedded exercise reference with a regenerated id
pub fn exercise_ref(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "config": {"sets": [{"reps": 10, "rir": 2}, {"reps": 10, "rir": 2}, {"reps": 10, "rir": 2}]},
        "notes": format!("notas {id}")
    })
}

/// Modern session with the given blocks
pub fn modern_session(id: &str, session_type: &str, blocks: Value) -> SessionDefinition {
    serde_json::from_value(json!({
        "id": id,
        "name": "Sesión de prueba",
        "type": session_type,
        "blocks": blocks
    }))
    .unwrap_or_default()
}

/// Three-block modern session whose BURN block holds five exercises
pub fn sample_modern_session(id: &str) -> SessionDefinition {
    modern_session(
        id,
        "PDP-R",
        json!([
            {
                "id": "warmup-1",
                "stableId": "warmup-stable",
                "name": "Calentamiento",
                "type": "warmup",
                "exercises": [exercise_ref("x-1", "plank")]
            },
            {
                "id": "base-1",
                "stableId": "base-stable",
                "name": "Fuerza",
                "params": {"rounds": 4},
                "exercises": [exercise_ref("x-2", "press banca"), exercise_ref("x-3", "Sentadilla trasera")]
            },
            {
                "id": "burn-1",
                "name": "BURN FINISHER",
                "params": {"timeCap": 600},
                "exercises": [
                    exercise_ref("x-4", "burpee"),
                    exercise_ref("x-5", "row"),
                    exercise_ref("x-6", "Plank"),
                    exercise_ref("x-7", "Bench Press"),
                    exercise_ref("x-8", "Back Squat")
                ]
            }
        ]),
    )
}

/// In-memory store seeded with the sample library and one modern session
pub async fn seeded_store(session_id: &str) -> InMemoryStore {
    init_test_logging();
    let store = InMemoryStore::new();
    store.set_exercises(library()).await;
    let _ = store.insert_session(sample_modern_session(session_id)).await;
    store
}

/// Performance log store that counts lookups and fails for chosen modules
#[derive(Clone, Default)]
pub struct InstrumentedLogStore {
    inner: InMemoryStore,
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<(String, Option<String>)>>>,
    failing: Arc<HashSet<String>>,
}

impl InstrumentedLogStore {
    pub fn new(inner: InMemoryStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub fn failing_for(inner: InMemoryStore, module_ids: &[&str]) -> Self {
        Self {
            inner,
            failing: Arc::new(module_ids.iter().map(|id| (*id).to_owned()).collect()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<(String, Option<String>)> {
        self.seen.lock().map(|seen| seen.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PerformanceLogStore for InstrumentedLogStore {
    async fn get_last_log(
        &self,
        athlete_id: &str,
        module_id: &str,
        stable_id: Option<&str>,
    ) -> AppResult<Option<PerformanceLog>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.seen.lock() {
            seen.push((module_id.to_owned(), stable_id.map(str::to_owned)));
        }
        if self.failing.contains(module_id) {
            return Err(AppError::storage(format!("log lookup failed for {module_id}")));
        }
        self.inner.get_last_log(athlete_id, module_id, stable_id).await
    }
}

/// Modules store that counts how often the collection is read
#[derive(Clone, Default)]
pub struct CountingModuleStore {
    inner: InMemoryStore,
    calls: Arc<AtomicUsize>,
}

impl CountingModuleStore {
    pub fn new(inner: InMemoryStore) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LegacyModuleStore for CountingModuleStore {
    async fn get_all_modules(&self) -> AppResult<Vec<LegacyModule>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_all_modules().await
    }
}

/// Store whose every read is rejected
#[derive(Clone, Copy, Default)]
pub struct UnavailableStore;

#[async_trait]
impl SessionStore for UnavailableStore {
    async fn get_by_id(&self, _session_id: &str) -> AppResult<Option<SessionDefinition>> {
        Err(AppError::storage("session store unavailable"))
    }
}

#[async_trait]
impl ExerciseLibrary for UnavailableStore {
    async fn get_all_exercises(&self) -> AppResult<Vec<ExerciseRecord>> {
        Err(AppError::external_service("exercise library", "timed out"))
    }
}

#[async_trait]
impl LegacyModuleStore for UnavailableStore {
    async fn get_all_modules(&self) -> AppResult<Vec<LegacyModule>> {
        Err(AppError::storage("modules store unavailable"))
    }
}

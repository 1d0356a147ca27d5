// ABOUTME: Loads and compiles a session, then attaches each module's last recorded performance
// ABOUTME: Concurrent, deduplicated history fan-out with failures folded into an inspectable state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # History Hydrator
//!
//! Hydration has two suspension points: the initial parallel fetch of the
//! session and the exercise library (plus the modules collection for legacy
//! sessions), and the history fan-out where every distinct module is looked
//! up concurrently.
//!
//! [`HistoryHydrator::try_hydrate`] reports collaborator failures as
//! [`AppError`]; [`HistoryHydrator::hydrate`] folds them into a
//! [`HydrationState`] so callers never see a half-updated result.
//! A failed history lookup only drops that module's history.

use crate::compiler::SessionCompiler;
use crate::config::PipelineConfig;
use crate::logging::PipelineLogger;
use crate::stores::{ExerciseLibrary, LegacyModuleStore, PerformanceLogStore, SessionStore};
use coach_core::errors::{AppError, AppResult, ErrorCode};
use coach_core::models::{
    CompiledSession, LegacyModule, Module, PerformanceLog, Protocol, SessionDefinition,
    TimelineEntry,
};
use futures_util::future::join_all;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info_span, warn, Instrument};

/// Last recorded log per module id
pub type ModuleHistory = BTreeMap<String, PerformanceLog>;

/// A successfully hydrated session
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Hydration {
    /// The stored session, `None` when it does not exist
    pub session: Option<SessionDefinition>,
    /// Compiled modules, timeline, and protocol
    pub compiled: CompiledSession,
    /// Last non-pending log per module id (modules without history are absent)
    pub history: ModuleHistory,
}

/// Caller-facing hydration result
///
/// On error every data field is reset; partial results never accompany an
/// error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HydrationState {
    /// The stored session
    pub session: Option<SessionDefinition>,
    /// Compiled modules
    pub modules: Vec<Module>,
    /// Execution timeline
    pub timeline: Vec<TimelineEntry>,
    /// Session-global protocol
    pub protocol: Protocol,
    /// Last non-pending log per module id
    pub history: ModuleHistory,
    /// Whether a hydration is in flight
    pub loading: bool,
    /// Error message of a failed hydration
    pub error: Option<String>,
    /// Error code of a failed hydration
    pub error_code: Option<ErrorCode>,
}

impl HydrationState {
    /// State while a hydration is in flight
    #[must_use]
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::failed_reset()
        }
    }

    /// State of a failed hydration
    #[must_use]
    pub fn failed(error: &AppError) -> Self {
        Self {
            error: Some(error.message.clone()),
            error_code: Some(error.code),
            ..Self::failed_reset()
        }
    }

    /// Whether the hydration failed
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }

    fn failed_reset() -> Self {
        Self {
            session: None,
            modules: Vec::new(),
            timeline: Vec::new(),
            protocol: Protocol::Mix,
            history: ModuleHistory::new(),
            loading: false,
            error: None,
            error_code: None,
        }
    }
}

impl From<Hydration> for HydrationState {
    fn from(hydration: Hydration) -> Self {
        Self {
            session: hydration.session,
            modules: hydration.compiled.modules,
            timeline: hydration.compiled.timeline,
            protocol: hydration.compiled.protocol,
            history: hydration.history,
            loading: false,
            error: None,
            error_code: None,
        }
    }
}

impl From<AppResult<Hydration>> for HydrationState {
    fn from(result: AppResult<Hydration>) -> Self {
        match result {
            Ok(hydration) => hydration.into(),
            Err(error) => Self::failed(&error),
        }
    }
}

/// Loads, compiles, and attaches history to sessions
#[derive(Clone)]
pub struct HistoryHydrator {
    sessions: Arc<dyn SessionStore>,
    library: Arc<dyn ExerciseLibrary>,
    modules: Arc<dyn LegacyModuleStore>,
    logs: Arc<dyn PerformanceLogStore>,
    compiler: SessionCompiler,
    history_enabled: bool,
}

impl HistoryHydrator {
    /// Create a hydrator over separate collaborators with default configuration
    #[must_use]
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        library: Arc<dyn ExerciseLibrary>,
        modules: Arc<dyn LegacyModuleStore>,
        logs: Arc<dyn PerformanceLogStore>,
    ) -> Self {
        Self {
            sessions,
            library,
            modules,
            logs,
            compiler: SessionCompiler::default(),
            history_enabled: true,
        }
    }

    /// Create a hydrator over one store implementing every collaborator
    #[must_use]
    pub fn from_store<S>(store: S) -> Self
    where
        S: SessionStore + ExerciseLibrary + LegacyModuleStore + PerformanceLogStore + 'static,
    {
        let store = Arc::new(store);
        Self::new(store.clone(), store.clone(), store.clone(), store)
    }

    /// Apply pipeline configuration
    #[must_use]
    pub fn with_config(mut self, config: &PipelineConfig) -> Self {
        self.compiler = SessionCompiler::new(config.compiler.clone());
        self.history_enabled = config.history_enabled;
        self
    }

    /// Hydrate a session, folding any failure into the returned state
    pub async fn hydrate(&self, session_id: &str, athlete_id: Option<&str>) -> HydrationState {
        match self.try_hydrate(session_id, athlete_id).await {
            Ok(hydration) => hydration.into(),
            Err(error) => {
                warn!(session_id, error = %error, "Session hydration failed");
                HydrationState::failed(&error)
            }
        }
    }

    /// Hydrate a session unless a newer request has started in the meantime
    ///
    /// Returns `None` when the result is stale and must not be applied.
    pub async fn hydrate_latest(
        &self,
        guard: &LatestRequest,
        session_id: &str,
        athlete_id: Option<&str>,
    ) -> Option<HydrationState> {
        let ticket = guard.begin();
        let state = self.hydrate(session_id, athlete_id).await;
        let accepted = guard.accept(ticket, state);
        if accepted.is_none() {
            debug!(session_id, "Discarding stale hydration result");
        }
        accepted
    }

    /// Hydrate a session
    ///
    /// An absent session is not an error: it compiles to the empty timeline.
    /// A blank session id is treated the same way without touching any store.
    ///
    /// # Errors
    ///
    /// Returns the first collaborator error raised while loading the session,
    /// the library, or the modules collection
    pub async fn try_hydrate(
        &self,
        session_id: &str,
        athlete_id: Option<&str>,
    ) -> AppResult<Hydration> {
        if session_id.trim().is_empty() {
            warn!("Blank session id; returning empty timeline");
            return Ok(Hydration {
                session: None,
                compiled: CompiledSession::empty(Protocol::Mix),
                history: ModuleHistory::new(),
            });
        }

        let span = info_span!(
            "hydrate_session",
            session_id,
            athlete_id = athlete_id.unwrap_or_default()
        );
        async move {
            let started = Instant::now();
            let (session, library) = tokio::try_join!(
                self.sessions.get_by_id(session_id),
                self.library.get_all_exercises()
            )?;

            if session.is_none() {
                warn!(session_id, "Session not found; compiling empty timeline");
            }

            let legacy_modules: Vec<LegacyModule> = match &session {
                Some(definition) if !definition.blocks.is_array() => {
                    self.modules.get_all_modules().await?
                }
                _ => Vec::new(),
            };

            let compiled = self
                .compiler
                .compile(session.as_ref(), &library, &legacy_modules);
            PipelineLogger::log_compilation(
                session_id,
                compiled.protocol,
                compiled.modules.len(),
                compiled.work_entries().count(),
            );

            let (history, lookups) = match athlete_id.filter(|id| !id.trim().is_empty()) {
                Some(athlete) if self.history_enabled && !compiled.modules.is_empty() => {
                    let lookups = distinct_lookups(&compiled.modules).len();
                    (self.fetch_history(athlete, &compiled.modules).await, lookups)
                }
                _ => (ModuleHistory::new(), 0),
            };

            PipelineLogger::log_hydration(
                session_id,
                athlete_id,
                lookups,
                history.len(),
                u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            );

            Ok(Hydration {
                session,
                compiled,
                history,
            })
        }
        .instrument(span)
        .await
    }

    /// Fetch the last non-pending log of every distinct module concurrently
    ///
    /// Failed lookups are logged and treated as "no history".
    pub async fn fetch_history(&self, athlete_id: &str, modules: &[Module]) -> ModuleHistory {
        let lookups = distinct_lookups(modules);
        let results = join_all(lookups.into_iter().map(|(module_id, stable_id)| async move {
            let outcome = self.logs.get_last_log(athlete_id, module_id, stable_id).await;
            (module_id, outcome)
        }))
        .await;

        results
            .into_iter()
            .filter_map(|(module_id, outcome)| match outcome {
                Ok(Some(log)) if !log.is_pending() => Some((module_id.to_owned(), log)),
                Ok(_) => None,
                Err(error) => {
                    warn!(module_id, error = %error, "History lookup failed; treating as no history");
                    None
                }
            })
            .collect()
    }
}

/// Distinct `(module id, stable id)` lookups in first-seen order
///
/// Split parts share their block's id and collapse into one lookup.
#[must_use]
pub fn distinct_lookups(modules: &[Module]) -> Vec<(&str, Option<&str>)> {
    let mut seen = HashSet::with_capacity(modules.len());
    modules
        .iter()
        .filter(|module| seen.insert(module.id.as_str()))
        .map(|module| (module.id.as_str(), module.stable_id.as_deref()))
        .collect()
}

/// Ticket identifying one hydration request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Last-invocation-wins guard for callers that re-hydrate before a prior
/// request resolves
#[derive(Debug, Default)]
pub struct LatestRequest {
    generation: AtomicU64,
}

impl LatestRequest {
    /// Create a guard with no requests issued
    #[must_use]
    pub const fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
        }
    }

    /// Start a request, superseding every earlier ticket
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether the ticket belongs to the most recent request
    #[must_use]
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.0
    }

    /// Pass the value through only if its request is still the latest
    pub fn accept<T>(&self, ticket: RequestTicket, value: T) -> Option<T> {
        self.is_current(ticket).then_some(value)
    }
}

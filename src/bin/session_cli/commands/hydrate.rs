// ABOUTME: hydrate command: loads fixtures, compiles a session, and attaches athlete history
// ABOUTME: Failures are reported through the hydration state and a non-zero exit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::display::{print_json, print_outline, OutputMode};
use crate::Result;
use coach_session_pipeline::config::PipelineConfig;
use coach_session_pipeline::errors::AppError;
use coach_session_pipeline::history::HistoryHydrator;
use coach_session_pipeline::stores::{FixtureSet, InMemoryStore};
use std::path::Path;
use tracing::info;

/// Hydrate one session from a fixture directory and print the state
pub async fn run(
    config: &PipelineConfig,
    fixtures_dir: &Path,
    session_id: &str,
    athlete_id: Option<&str>,
    output: OutputMode,
) -> Result<()> {
    let fixtures = FixtureSet::load(fixtures_dir).await?;
    info!(
        dir = %fixtures_dir.display(),
        sessions = fixtures.sessions.len(),
        exercises = fixtures.exercises.len(),
        logs = fixtures.logs.len(),
        "Fixtures loaded"
    );

    let store = InMemoryStore::from_fixtures(fixtures).await?;
    let hydrator = HistoryHydrator::from_store(store).with_config(config);
    let state = hydrator.hydrate(session_id, athlete_id).await;

    match output {
        OutputMode::Outline if !state.is_error() => {
            print_outline(state.protocol, &state.timeline, &state.history);
        }
        OutputMode::Outline | OutputMode::PrettyJson => print_json(&state, true)?,
        OutputMode::Json => print_json(&state, false)?,
    }

    match (state.error, state.error_code) {
        (Some(message), Some(code)) => Err(AppError::new(code, message)),
        (Some(message), None) => Err(AppError::internal(message)),
        _ => Ok(()),
    }
}

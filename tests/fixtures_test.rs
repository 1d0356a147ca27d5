// ABOUTME: Integration tests for loading fixture directories into the in-memory store
// ABOUTME: Missing files, malformed files, and end-to-end hydration from disk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use coach_session_pipeline::errors::ErrorCode;
use coach_session_pipeline::history::HistoryHydrator;
use coach_session_pipeline::stores::json_file::{EXERCISES_FILE, LOGS_FILE, MODULES_FILE, SESSIONS_FILE};
use coach_session_pipeline::stores::{FixtureSet, InMemoryStore};
use common::{init_test_logging, library_json, sample_modern_session};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn write(dir: &TempDir, file: &str, value: &serde_json::Value) -> Result<()> {
    fs::write(dir.path().join(file), serde_json::to_string_pretty(value)?)?;
    Ok(())
}

#[tokio::test]
async fn test_empty_directory_loads_empty_collections() -> Result<()> {
    let dir = TempDir::new()?;
    let fixtures = FixtureSet::load(dir.path()).await?;

    assert!(fixtures.sessions.is_empty());
    assert!(fixtures.exercises.is_empty());
    assert!(fixtures.modules.is_empty());
    assert!(fixtures.logs.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_malformed_file_is_invalid_format() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join(EXERCISES_FILE), "{not json")?;

    let error = FixtureSet::load(dir.path()).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidFormat);
    assert!(error.message.contains(EXERCISES_FILE));
    Ok(())
}

#[tokio::test]
async fn test_session_without_id_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    write(&dir, SESSIONS_FILE, &json!([{"type": "PDP-R", "blocks": []}]))?;

    let fixtures = FixtureSet::load(dir.path()).await?;
    let error = InMemoryStore::from_fixtures(fixtures).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    Ok(())
}

#[tokio::test]
async fn test_hydrate_from_fixture_directory() -> Result<()> {
    init_test_logging();
    let dir = TempDir::new()?;
    let legacy = json!({
        "_id": "legacy-1",
        "type": "PDP-T",
        "blocks": {"BURN": ["mod-burn"], "warmup": ["mod-core"]}
    });
    write(
        &dir,
        SESSIONS_FILE,
        &json!([serde_json::to_value(sample_modern_session("modern-1"))?, legacy]),
    )?;
    write(&dir, EXERCISES_FILE, &library_json())?;
    write(
        &dir,
        MODULES_FILE,
        &json!([
            {"id": "mod-core", "name": "Core", "exerciseIds": ["lib-plank"]},
            {"id": "mod-burn", "name": "Burn", "exerciseIds": ["lib-burpee", "lib-row", "lib-plank"]}
        ]),
    )?;
    write(
        &dir,
        LOGS_FILE,
        &json!([
            {"id": "log-1", "athleteId": "ath-9", "moduleId": "mod-burn", "status": "completed",
             "recordedAt": "2025-02-01T07:30:00Z", "results": {"time": 540}},
            {"id": "log-2", "athleteId": "ath-9", "moduleId": "mod-core", "status": "pending"}
        ]),
    )?;

    let store = InMemoryStore::from_fixtures(FixtureSet::load(dir.path()).await?).await?;
    assert_eq!(store.session_count().await, 2);
    let hydrator = HistoryHydrator::from_store(store);

    let legacy_state = hydrator.hydrate("legacy-1", Some("ath-9")).await;
    assert!(!legacy_state.is_error());
    assert_eq!(
        legacy_state.modules.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(),
        ["mod-core", "mod-burn"]
    );
    assert_eq!(
        legacy_state.history.keys().map(String::as_str).collect::<Vec<_>>(),
        ["mod-burn"]
    );

    let modern_state = hydrator.hydrate("modern-1", Some("ath-9")).await;
    assert_eq!(modern_state.modules.len(), 5);
    assert!(modern_state.history.is_empty());
    Ok(())
}

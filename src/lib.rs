// ABOUTME: Main library entry point for the coaching session compilation pipeline
// ABOUTME: Compiles stored sessions into canonical modules and timelines and attaches athlete history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Coach Session Pipeline
//!
//! Turns stored training-session definitions (two schema generations) into a
//! canonical list of modules and an ordered execution timeline, enriching
//! every exercise from the canonical exercise library and attaching each
//! module's last recorded performance for the athlete.
//!
//! ## Architecture
//!
//! - **compiler**: Pure, synchronous compilation of one session
//! - **stores**: Read-only collaborator traits and an in-memory implementation
//! - **history**: Async loading, compilation, and history fan-out
//! - **config**: Environment-driven configuration
//! - **logging**: `tracing` subscriber setup and structured pipeline events
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use coach_session_pipeline::history::HistoryHydrator;
//! use coach_session_pipeline::stores::{FixtureSet, InMemoryStore};
//! use coach_session_pipeline::errors::AppResult;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let fixtures = FixtureSet::load(Path::new("./fixtures")).await?;
//!     let hydrator = HistoryHydrator::from_store(InMemoryStore::from_fixtures(fixtures).await?);
//!
//!     let state = hydrator.hydrate("session-1", Some("athlete-1")).await;
//!     println!("{} work entries", state.timeline.iter().filter(|e| e.is_work()).count());
//!     Ok(())
//! }
//! ```

/// Session compilation: matching, normalization, targeting, block compilation
pub mod compiler;

/// Environment-driven pipeline configuration
pub mod config;

/// Session loading and per-module history hydration
pub mod history;

/// Logging configuration and structured pipeline events
pub mod logging;

/// Read-only collaborator contracts and implementations
pub mod stores;

pub use coach_core::{constants, errors, lenient, models};
pub use compiler::{compile, CompilerConfig, SessionCompiler};
pub use history::{HistoryHydrator, HydrationState, LatestRequest};

// ABOUTME: Session compiler CLI for compiling and hydrating stored session definitions
// ABOUTME: Reads JSON fixtures from disk and prints modules, timelines, and history as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Compile one session against an exercise library
//! session-compiler compile --session session.json --library exercises.json --pretty
//!
//! # Compile a legacy session that references stored modules
//! session-compiler compile --session legacy.json --library exercises.json --modules modules.json
//!
//! # Show which library record a display name resolves to
//! session-compiler match-name "press bancas" --library exercises.json
//!
//! # Hydrate a session with an athlete's history from a fixture directory
//! session-compiler hydrate --fixtures ./fixtures --session-id s-42 --athlete a-7 --outline
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use coach_session_pipeline::config::PipelineConfig;
use coach_session_pipeline::errors::AppResult;
use coach_session_pipeline::logging::LoggingConfig;
use std::path::PathBuf;
use tracing::debug;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "session-compiler",
    about = "Coaching session compiler",
    long_about = "Compiles stored coaching sessions into canonical modules and an execution timeline, optionally attaching athlete history."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Compile a session definition file
    Compile {
        /// Session definition (single JSON object)
        #[arg(long)]
        session: PathBuf,

        /// Exercise library (JSON array)
        #[arg(long)]
        library: PathBuf,

        /// Legacy modules collection (JSON array), for legacy sessions
        #[arg(long)]
        modules: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Print a readable outline instead of JSON
        #[arg(long)]
        outline: bool,
    },

    /// Resolve a display name against the library's normalized names
    MatchName {
        /// Display name to resolve
        name: String,

        /// Exercise library (JSON array)
        #[arg(long)]
        library: PathBuf,
    },

    /// Load, compile, and attach history from a fixture directory
    Hydrate {
        /// Directory holding sessions.json, exercises.json, modules.json, logs.json
        #[arg(long)]
        fixtures: PathBuf,

        /// Session to hydrate
        #[arg(long)]
        session_id: String,

        /// Athlete whose history is attached
        #[arg(long)]
        athlete: Option<String>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Print a readable outline instead of JSON
        #[arg(long)]
        outline: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    if let Err(e) = logging.init() {
        eprintln!("Logging disabled: {e}");
    }

    let config = PipelineConfig::from_env()?;
    debug!(?config, "Session compiler starting");

    match cli.command {
        Command::Compile {
            session,
            library,
            modules,
            pretty,
            outline,
        } => {
            commands::compile::run(
                &config,
                &session,
                &library,
                modules.as_deref(),
                helpers::display::OutputMode::from_flags(pretty, outline),
            )
            .await
        }
        Command::MatchName { name, library } => commands::match_name::run(&name, &library).await,
        Command::Hydrate {
            fixtures,
            session_id,
            athlete,
            pretty,
            outline,
        } => {
            commands::hydrate::run(
                &config,
                &fixtures,
                &session_id,
                athlete.as_deref(),
                helpers::display::OutputMode::from_flags(pretty, outline),
            )
            .await
        }
    }
}

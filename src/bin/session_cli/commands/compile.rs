// ABOUTME: compile command: compiles one session file against a library file
// ABOUTME: Legacy sessions additionally read a modules collection file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::display::{print_json, print_outline, OutputMode};
use crate::Result;
use coach_session_pipeline::compiler::SessionCompiler;
use coach_session_pipeline::config::PipelineConfig;
use coach_session_pipeline::history::ModuleHistory;
use coach_session_pipeline::models::{ExerciseRecord, LegacyModule, SessionDefinition};
use coach_session_pipeline::stores::json_file::read_json_file;
use std::path::Path;
use tracing::info;

/// Compile a session definition file and print the result
pub async fn run(
    config: &PipelineConfig,
    session_path: &Path,
    library_path: &Path,
    modules_path: Option<&Path>,
    output: OutputMode,
) -> Result<()> {
    let session: SessionDefinition = read_json_file(session_path).await?;
    let library: Vec<ExerciseRecord> = read_json_file(library_path).await?;
    let legacy_modules: Vec<LegacyModule> = match modules_path {
        Some(path) => read_json_file(path).await?,
        None => Vec::new(),
    };
    info!(
        session = %session_path.display(),
        library_records = library.len(),
        legacy_modules = legacy_modules.len(),
        "Compiling session file"
    );

    let compiled = SessionCompiler::new(config.compiler.clone()).compile(
        Some(&session),
        &library,
        &legacy_modules,
    );

    match output {
        OutputMode::Outline => {
            print_outline(compiled.protocol, &compiled.timeline, &ModuleHistory::new());
            Ok(())
        }
        OutputMode::PrettyJson => print_json(&compiled, true),
        OutputMode::Json => print_json(&compiled, false),
    }
}

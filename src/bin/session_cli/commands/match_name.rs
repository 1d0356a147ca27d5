// ABOUTME: match-name command: shows how a display name resolves against the library
// ABOUTME: Prints the normalized key and the matching record, if any
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::display::print_json;
use crate::Result;
use coach_session_pipeline::compiler::name_matcher::normalize_key;
use coach_session_pipeline::compiler::normalizer::normalize_record;
use coach_session_pipeline::compiler::LibraryIndex;
use coach_session_pipeline::models::ExerciseRecord;
use coach_session_pipeline::stores::json_file::read_json_file;
use serde_json::json;
use std::path::Path;

/// Resolve a display name and print the outcome
pub async fn run(name: &str, library_path: &Path) -> Result<()> {
    let library: Vec<ExerciseRecord> = read_json_file(library_path).await?;
    let index = LibraryIndex::build(&library);
    let matched = index.by_name(name).map(normalize_record);

    print_json(
        &json!({
            "input": name,
            "key": normalize_key(name),
            "matched": matched,
        }),
        true,
    )
}

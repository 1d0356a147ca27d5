// ABOUTME: Output formatting helpers for session-compiler
// ABOUTME: JSON output for machines and a readable timeline outline for humans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use coach_session_pipeline::errors::AppResult;
use coach_session_pipeline::history::ModuleHistory;
use coach_session_pipeline::models::{Module, Protocol, TimelineEntry};
use serde::Serialize;

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Single-line JSON
    Json,
    /// Indented JSON
    PrettyJson,
    /// Readable outline
    Outline,
}

impl OutputMode {
    /// Select the mode from CLI flags; `--outline` wins over `--pretty`
    pub const fn from_flags(pretty: bool, outline: bool) -> Self {
        if outline {
            Self::Outline
        } else if pretty {
            Self::PrettyJson
        } else {
            Self::Json
        }
    }
}

/// Print any serializable value as JSON on stdout
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> AppResult<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

/// Print a compiled timeline as an indented outline
pub fn print_outline(protocol: Protocol, timeline: &[TimelineEntry], history: &ModuleHistory) {
    println!("Protocol: {protocol}");
    println!("{}", "=".repeat(60));
    for entry in timeline {
        match entry {
            TimelineEntry::Planning(planning) => {
                println!("PLANNING ({} modules)", planning.modules.len());
            }
            TimelineEntry::Work(module) => print_module(module, history),
            TimelineEntry::Summary(_) => println!("SUMMARY"),
        }
    }
}

fn print_module(module: &Module, history: &ModuleHistory) {
    let part = module
        .part_label
        .as_deref()
        .map(|label| format!(" [{label}]"))
        .unwrap_or_default();
    println!(
        "WORK  {} {}{part}  ({}, {})",
        module.block_type, module.name, module.protocol, module.id
    );
    if let Some(targeting) = module.targeting.first() {
        if !targeting.metric.is_empty() {
            println!(
                "      target: cap {}s, volume {} {}",
                targeting.time_cap, targeting.volume, targeting.metric
            );
        }
    }
    if let Some(minutes) = module.emom_params.as_ref().and_then(|e| e.duration_minutes) {
        println!("      EMOM {minutes} min");
    }
    for (index, exercise) in module.exercises.iter().enumerate() {
        let manifestation = if exercise.manifestation.is_empty() {
            String::new()
        } else {
            format!("  {}", exercise.manifestation)
        };
        println!(
            "      {}. {}{manifestation}",
            module.offset + index + 1,
            exercise.display_name()
        );
    }
    if let Some(last) = history.get(&module.id) {
        let when = last
            .recorded_at
            .map_or_else(|| "unknown date".to_owned(), |at| at.format("%Y-%m-%d").to_string());
        println!("      last: {when} {}", last.results);
    }
}

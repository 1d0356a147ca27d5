// ABOUTME: Session compiler turning stored session definitions into modules and a timeline
// ABOUTME: Dispatches once on the schema generation and assembles planning/work/summary entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Session Compiler
//!
//! Compilation is a pure function of the session definition, the exercise
//! library, and (for legacy sessions) the stored modules collection:
//!
//! 1. The session type selects the session-global [`Protocol`].
//! 2. The shape of `blocks` selects the schema: an array is the modern
//!    schema, anything else is read as legacy category-keyed references.
//! 3. Each schema driver produces modules in execution order.
//! 4. The timeline wraps work entries in one planning and one summary entry,
//!    or is a lone summary entry when nothing compiled.
//!
//! Missing or malformed input never fails compilation; it degrades to fewer
//! (or no) modules and is reported through `tracing`.

/// Compiles one modern block, including high-density splitting
pub mod block;
/// Legacy category-keyed schema driver
pub mod legacy;
/// Per-compilation identifier and name indices over the library
pub mod library_index;
/// Modern array-of-blocks schema driver
pub mod modern;
/// Display-name normalization for fuzzy matching
pub mod name_matcher;
/// Exercise record canonicalization
pub mod normalizer;
/// Set-configuration summaries
pub mod set_summary;
/// Targeting inference
pub mod targeting;

pub use library_index::LibraryIndex;

use coach_core::constants::blocks;
use coach_core::models::{
    CompiledSession, ExerciseRecord, LegacyModule, LegacySessionBlocks, Module, PlanningData,
    Protocol, SessionDefinition, SummaryData, TimelineEntry,
};
use serde_json::Value;
use tracing::{debug, info_span, warn};

/// Tunables of the compiler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Substring (case-insensitive) marking a block as high-density
    pub split_marker: String,
    /// Exercises per part when a high-density block is split
    pub split_part_size: usize,
    /// EMOM duration used when an EMOM-flagged config has no sets
    pub default_emom_minutes: u32,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            split_marker: blocks::DEFAULT_SPLIT_MARKER.to_owned(),
            split_part_size: blocks::DEFAULT_SPLIT_PART_SIZE,
            default_emom_minutes: blocks::DEFAULT_EMOM_MINUTES,
        }
    }
}

/// Inputs shared by every block of one compilation
#[derive(Debug)]
pub struct CompileContext<'a> {
    /// Compiler tunables
    pub config: &'a CompilerConfig,
    /// Library indices built for this compilation
    pub index: LibraryIndex<'a>,
    /// Session-global protocol
    pub protocol: Protocol,
}

/// Schema generation of a session's `blocks`
#[derive(Debug)]
pub enum SessionSchema<'a> {
    /// Ordered array of authored blocks
    Modern(&'a [Value]),
    /// Category-keyed references into the modules collection
    Legacy(LegacySessionBlocks),
}

impl<'a> SessionSchema<'a> {
    /// Classify a session's `blocks` by shape
    #[must_use]
    pub fn detect(blocks: &'a Value) -> Self {
        match blocks {
            Value::Array(items) => Self::Modern(items),
            other => {
                if !other.is_object() {
                    warn!(
                        kind = json_kind(other),
                        "Session blocks are neither an array nor an object; treating as empty"
                    );
                }
                Self::Legacy(LegacySessionBlocks::from_value(other))
            }
        }
    }
}

/// Compiles session definitions against an exercise library
#[derive(Debug, Clone, Default)]
pub struct SessionCompiler {
    config: CompilerConfig,
}

impl SessionCompiler {
    /// Create a compiler with the given tunables
    #[must_use]
    pub const fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    /// Compiler tunables
    #[must_use]
    pub const fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile a session into modules and a timeline
    ///
    /// `legacy_modules` is only consulted for legacy-schema sessions.
    #[must_use]
    pub fn compile(
        &self,
        session: Option<&SessionDefinition>,
        library: &[ExerciseRecord],
        legacy_modules: &[LegacyModule],
    ) -> CompiledSession {
        let Some(session) = session else {
            warn!("No session to compile; returning empty timeline");
            return CompiledSession::empty(Protocol::Mix);
        };

        let span = info_span!(
            "compile_session",
            session_id = session.id.as_deref().unwrap_or_default(),
            session_type = session.session_type.as_deref().unwrap_or_default(),
        );
        let _guard = span.enter();

        let protocol = Protocol::from_session_type(session.session_type.as_deref());
        let ctx = CompileContext {
            config: &self.config,
            index: LibraryIndex::build(library),
            protocol,
        };
        if ctx.index.is_empty() {
            debug!("Exercise library is empty; exercises pass through unenriched");
        }

        let modules = match SessionSchema::detect(&session.blocks) {
            SessionSchema::Modern(blocks) => {
                if blocks.is_empty() {
                    warn!("Session has an empty blocks array");
                }
                modern::compile_blocks(blocks, &ctx)
            }
            SessionSchema::Legacy(blocks) => {
                if blocks.is_empty() {
                    warn!("Legacy session references no modules");
                }
                legacy::compile_legacy(&blocks, legacy_modules, &ctx)
            }
        };

        debug!(modules = modules.len(), protocol = %protocol, "Session compiled");
        assemble(modules, protocol)
    }
}

/// Compile with default tunables
#[must_use]
pub fn compile(
    session: Option<&SessionDefinition>,
    library: &[ExerciseRecord],
    legacy_modules: &[LegacyModule],
) -> CompiledSession {
    SessionCompiler::default().compile(session, library, legacy_modules)
}

/// Wrap compiled modules in the timeline envelope
#[must_use]
pub fn assemble(modules: Vec<Module>, protocol: Protocol) -> CompiledSession {
    if modules.is_empty() {
        return CompiledSession::empty(protocol);
    }

    let mut timeline = Vec::with_capacity(modules.len() + 2);
    timeline.push(TimelineEntry::Planning(PlanningData {
        modules: modules.clone(),
    }));
    timeline.extend(
        modules
            .iter()
            .cloned()
            .map(|module| TimelineEntry::Work(Box::new(module))),
    );
    timeline.push(TimelineEntry::Summary(SummaryData::default()));

    CompiledSession {
        modules,
        timeline,
        protocol,
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_detection() {
        let modern = json!([{"name": "A"}]);
        assert!(matches!(SessionSchema::detect(&modern), SessionSchema::Modern(b) if b.len() == 1));

        let legacy = json!({"BASE": ["m1"]});
        assert!(matches!(SessionSchema::detect(&legacy), SessionSchema::Legacy(b) if !b.is_empty()));

        let missing = Value::Null;
        assert!(matches!(SessionSchema::detect(&missing), SessionSchema::Legacy(b) if b.is_empty()));
    }

    #[test]
    fn test_assemble_envelope() {
        let modules = vec![Module {
            id: "a".into(),
            ..Module::default()
        }];
        let compiled = assemble(modules, Protocol::Reps);
        assert_eq!(compiled.timeline.len(), 3);
        assert!(matches!(compiled.timeline[0], TimelineEntry::Planning(_)));
        assert!(compiled.timeline[1].is_work());
        assert!(matches!(compiled.timeline[2], TimelineEntry::Summary(_)));

        assert_eq!(assemble(Vec::new(), Protocol::Mix), CompiledSession::empty(Protocol::Mix));
    }
}

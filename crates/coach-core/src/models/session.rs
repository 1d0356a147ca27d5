// ABOUTME: Session definitions in both stored schema generations
// ABOUTME: Modern array-of-blocks and legacy category-keyed module references
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::session_types;
use crate::lenient::{self, FromToken};
use crate::models::exercise::ExerciseRecord;
use crate::models::timeline::TargetingSpec;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Protocol and categories
// ============================================================================

/// Pacing discipline of a session or module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Protocol {
    /// Timed cap
    #[serde(rename = "T")]
    Timed,
    /// Target reps
    #[serde(rename = "R")]
    Reps,
    /// Every minute on the minute
    #[serde(rename = "E")]
    Emom,
    /// Mixed: each block decides
    #[default]
    #[serde(rename = "mix")]
    Mix,
    /// Free pacing, used for blocks of a mixed session without their own protocol
    #[serde(rename = "LIBRE")]
    Libre,
}

impl Protocol {
    /// Canonical token
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Timed => "T",
            Self::Reps => "R",
            Self::Emom => "E",
            Self::Mix => "mix",
            Self::Libre => "LIBRE",
        }
    }

    /// Session-global protocol selected by the session type
    #[must_use]
    pub fn from_session_type(session_type: Option<&str>) -> Self {
        match session_type {
            Some(session_types::PDP_T) => Self::Timed,
            Some(session_types::PDP_R) => Self::Reps,
            Some(session_types::PDP_E) => Self::Emom,
            _ => Self::Mix,
        }
    }
}

impl FromToken for Protocol {
    fn from_token(token: &str) -> Self {
        match token.trim().to_uppercase().as_str() {
            "T" => Self::Timed,
            "R" => Self::Reps,
            "E" => Self::Emom,
            "MIX" => Self::Mix,
            _ => Self::Libre,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed block categories of a session, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockCategory {
    /// Preparation
    Warmup,
    /// Foundational strength
    Base,
    /// Volume accumulation
    Build,
    /// Power and intensity
    Boost,
    /// High-density finisher
    Burn,
}

impl BlockCategory {
    /// Execution order of categories
    pub const ORDER: [Self; 5] = [Self::Warmup, Self::Base, Self::Build, Self::Boost, Self::Burn];

    /// Canonical uppercase token
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Warmup => "WARMUP",
            Self::Base => "BASE",
            Self::Build => "BUILD",
            Self::Boost => "BOOST",
            Self::Burn => "BURN",
        }
    }

    /// Parse an exact category token (case-insensitive)
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let upper = token.trim().to_uppercase();
        Self::ORDER.into_iter().find(|c| c.as_str() == upper)
    }

    /// First category whose token appears in a free-text label
    #[must_use]
    pub fn detect(label: &str) -> Option<Self> {
        let upper = label.to_uppercase();
        Self::ORDER
            .into_iter()
            .find(|category| upper.contains(category.as_str()))
    }
}

impl fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Modern schema
// ============================================================================

/// Explicit targeting parameters authored on a block or legacy module
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockParams {
    /// Time cap in seconds
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub time_cap: Option<u32>,
    /// Round count
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub rounds: Option<u32>,
    /// EMOM duration in minutes
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub emom_minutes: Option<u32>,
    /// Free-text instruction
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
}

/// EMOM structure of a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmomParams {
    /// Total duration in minutes
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub duration_minutes: Option<u32>,
    /// Work density label
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub density: Option<String>,
}

/// One authored block of the modern schema
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Block identifier
    #[serde(default, alias = "_id", deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    /// Cross-session identity used for history lookups
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub stable_id: Option<String>,
    /// Display name
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    /// Explicit block-category label
    #[serde(default, alias = "type", deserialize_with = "lenient::opt_string")]
    pub category: Option<String>,
    /// Explicit targeting parameters
    #[serde(default, deserialize_with = "lenient::opt_object")]
    pub params: Option<BlockParams>,
    /// Explicit EMOM parameters
    #[serde(default, deserialize_with = "lenient::opt_object")]
    pub emom_params: Option<EmomParams>,
    /// Ordered exercises
    #[serde(default, deserialize_with = "lenient::list")]
    pub exercises: Vec<ExerciseRecord>,
    /// Protocol override used when the session protocol is mixed
    #[serde(default, deserialize_with = "lenient::opt_token")]
    pub protocol: Option<Protocol>,
}

/// A stored session definition
///
/// `blocks` is kept as raw JSON: its shape decides the schema generation and
/// is inspected exactly once by the compiler's dispatcher.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDefinition {
    /// Session identifier
    #[serde(default, alias = "_id", deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    /// Display name
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    /// Session type token selecting the protocol (`PDP-T`, `PDP-R`, `PDP-E`)
    #[serde(default, rename = "type", deserialize_with = "lenient::opt_string")]
    pub session_type: Option<String>,
    /// Array of blocks (modern) or category-keyed module references (legacy)
    #[serde(default)]
    pub blocks: Value,
}

// ============================================================================
// Legacy schema
// ============================================================================

/// A reference from a legacy session category to a stored module
///
/// Decoding is lenient: numeric ids are rendered as text and `overrides`
/// that are null or not an object read as empty. Only an entry without any
/// usable module id fails to decode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LegacyEntry {
    /// Bare module identifier
    Id(String),
    /// Module identifier with per-session field overrides
    WithOverrides {
        /// Referenced module identifier
        #[serde(rename = "moduleId")]
        module_id: String,
        /// Fields merged over the resolved module
        overrides: Map<String, Value>,
    },
}

impl<'de> Deserialize<'de> for LegacyEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value)
            .ok_or_else(|| de::Error::custom("legacy entry carries no module id"))
    }
}

impl LegacyEntry {
    /// Read one entry from its stored JSON shape
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => {
                let module_id = ["moduleId", "id", "_id"]
                    .iter()
                    .find_map(|key| map.get(*key).and_then(id_text))?;
                let overrides = match map.get("overrides") {
                    Some(Value::Object(overrides)) => overrides.clone(),
                    _ => Map::new(),
                };
                Some(Self::WithOverrides {
                    module_id,
                    overrides,
                })
            }
            other => id_text(other).map(Self::Id),
        }
    }

    /// Referenced module identifier
    #[must_use]
    pub fn module_id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::WithOverrides { module_id, .. } => module_id,
        }
    }

    /// Overrides to merge, if any
    #[must_use]
    pub fn overrides(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Id(_) => None,
            Self::WithOverrides { overrides, .. } => Some(overrides),
        }
    }
}

/// Non-blank text or numeric identifier
fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_owned()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Legacy `blocks` object: category name to module references
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LegacySessionBlocks {
    entries: HashMap<BlockCategory, Vec<LegacyEntry>>,
}

impl LegacySessionBlocks {
    /// Read the category-keyed mapping; keys match case-insensitively and
    /// anything that is not an object yields no entries
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let mut entries: HashMap<BlockCategory, Vec<LegacyEntry>> = HashMap::new();
        if let Value::Object(map) = value {
            for (key, list) in map {
                let Some(category) = BlockCategory::parse(key) else {
                    continue;
                };
                if let Value::Array(items) = list {
                    entries.entry(category).or_default().extend(
                        items
                            .iter()
                            .filter_map(LegacyEntry::from_json),
                    );
                }
            }
        }
        Self { entries }
    }

    /// Build from explicit entries
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (BlockCategory, Vec<LegacyEntry>)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Entries of one category (empty when absent)
    #[must_use]
    pub fn entries(&self, category: BlockCategory) -> &[LegacyEntry] {
        self.entries.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Whether no category holds any entry
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }
}

/// A module stored in the legacy modules collection
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyModule {
    /// Module identifier
    #[serde(default, alias = "_id", deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    /// Cross-session identity used for history lookups
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub stable_id: Option<String>,
    /// Display name
    #[serde(default, alias = "title", deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    /// Referenced library exercise identifiers
    #[serde(default, alias = "exercises", deserialize_with = "lenient::list")]
    pub exercise_ids: Vec<String>,
    /// Explicit targeting parameters
    #[serde(default, deserialize_with = "lenient::opt_object")]
    pub params: Option<BlockParams>,
    /// Pre-authored targeting; inferred when empty
    #[serde(default, deserialize_with = "lenient::list")]
    pub targeting: Vec<TargetingSpec>,
    /// Explicit EMOM parameters
    #[serde(default, deserialize_with = "lenient::opt_object")]
    pub emom_params: Option<EmomParams>,
    /// Protocol override used when the session protocol is mixed
    #[serde(default, deserialize_with = "lenient::opt_token")]
    pub protocol: Option<Protocol>,
}

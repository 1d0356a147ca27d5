// ABOUTME: Compiled pipeline outputs: modules, targeting specs, and timeline entries
// ABOUTME: These are the shapes consumed by the session runner and analytics layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::lenient;
use crate::models::exercise::{CanonicalExercise, IntensityType, SetValue};
use crate::models::session::{EmomParams, Protocol};
use serde::{Deserialize, Serialize};

/// Resolved timing, volume, and intensity for one module
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetingSpec {
    /// Time cap in seconds (0 when unset)
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub time_cap: u32,
    /// Volume quantity (0 when unset)
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub volume: f64,
    /// Metric label such as `time`, `reps`, `km`, `rounds`
    #[serde(default)]
    pub metric: String,
    /// Intensity quantity
    #[serde(default)]
    pub intensity_value: Option<SetValue>,
    /// How the intensity quantity is expressed
    #[serde(default)]
    pub intensity_type: Option<IntensityType>,
    /// Free-text instruction
    #[serde(default)]
    pub instruction: String,
}

/// One canonical, fully-resolved unit of work
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Module identifier (block id or legacy module id)
    #[serde(default)]
    pub id: String,
    /// Cross-session identity used for history lookups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stable_id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Resolved protocol
    #[serde(default)]
    pub protocol: Protocol,
    /// Targeting (always exactly one spec for compiled modules)
    #[serde(default)]
    pub targeting: Vec<TargetingSpec>,
    /// Enriched exercises in authored order
    #[serde(default)]
    pub exercises: Vec<CanonicalExercise>,
    /// Display names of `exercises`, same order
    #[serde(default)]
    pub exercise_names: Vec<String>,
    /// Block-category label
    #[serde(default)]
    pub block_type: String,
    /// EMOM structure, when the module is an EMOM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emom_params: Option<EmomParams>,
    /// Part label when split from a larger block (`Parte N`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_label: Option<String>,
    /// Index of this part's first exercise within the source block
    #[serde(default)]
    pub offset: usize,
}

impl Module {
    /// Identity used to look up historical performance
    #[must_use]
    pub fn history_key(&self) -> &str {
        self.stable_id.as_deref().unwrap_or(self.id.as_str())
    }
}

/// Payload of the session-level planning entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanningData {
    /// Every compiled module in timeline order
    pub modules: Vec<Module>,
}

/// Payload of the session-level summary entry (currently empty)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SummaryData {}

/// One step of the execution timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimelineEntry {
    /// Session overview shown before any work
    Planning(PlanningData),
    /// One module of work
    Work(Box<Module>),
    /// Session wrap-up
    Summary(SummaryData),
}

impl TimelineEntry {
    /// The module carried by a work entry
    #[must_use]
    pub fn as_work(&self) -> Option<&Module> {
        match self {
            Self::Work(module) => Some(module.as_ref()),
            _ => None,
        }
    }

    /// Whether this is a work entry
    #[must_use]
    pub const fn is_work(&self) -> bool {
        matches!(self, Self::Work(_))
    }
}

/// Result of compiling one session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompiledSession {
    /// Every compiled module (split parts appear individually)
    pub modules: Vec<Module>,
    /// Planning, work, and summary entries
    pub timeline: Vec<TimelineEntry>,
    /// Session-global protocol
    pub protocol: Protocol,
}

impl CompiledSession {
    /// The result for an absent or empty session: one empty summary entry
    #[must_use]
    pub fn empty(protocol: Protocol) -> Self {
        Self {
            modules: Vec::new(),
            timeline: vec![TimelineEntry::Summary(SummaryData::default())],
            protocol,
        }
    }

    /// Work entries in timeline order
    pub fn work_entries(&self) -> impl Iterator<Item = &Module> {
        self.timeline.iter().filter_map(TimelineEntry::as_work)
    }
}

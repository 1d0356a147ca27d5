// ABOUTME: Data models for session compilation inputs and outputs
// ABOUTME: Re-exports exercise, session, timeline, and performance-log types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Raw inputs (`ExerciseRecord`, `Block`, `SessionDefinition`, `LegacyModule`)
//! mirror what planning tools store, with every field optional and tolerant of
//! wrong types. Outputs (`CanonicalExercise`, `Module`, `TimelineEntry`) are the
//! stable shapes handed to the session runner and analytics layers.

/// Exercise records, set configuration, and canonical exercises
pub mod exercise;

/// Performance logs written by the session runner
pub mod performance;

/// Session definitions in both schema generations
pub mod session;

/// Compiled modules, targeting, and timeline entries
pub mod timeline;

pub use exercise::{
    CanonicalExercise, ExerciseRecord, IntensityType, SetConfig, SetDescriptor, SetValue,
    VolumeType,
};
pub use performance::{LogStatus, PerformanceLog};
pub use session::{
    Block, BlockCategory, BlockParams, EmomParams, LegacyEntry, LegacyModule,
    LegacySessionBlocks, Protocol, SessionDefinition,
};
pub use timeline::{
    CompiledSession, Module, PlanningData, SummaryData, TargetingSpec, TimelineEntry,
};

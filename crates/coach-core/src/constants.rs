// ABOUTME: Constants for session compilation organized by domain
// ABOUTME: Session-type protocol tokens, equipment tokens, placeholders, and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// Session type tokens that select a session-global protocol
pub mod session_types {
    /// Timed-cap session type
    pub const PDP_T: &str = "PDP-T";
    /// Target-reps session type
    pub const PDP_R: &str = "PDP-R";
    /// EMOM session type
    pub const PDP_E: &str = "PDP-E";
}

/// Equipment descriptors
pub mod equipment {
    /// Substrings (matched case-insensitively) that mark an exercise as bodyweight
    pub const BODYWEIGHT_TOKENS: &[&str] = &[
        "corporal",
        "bodyweight",
        "ninguno",
        "body weight",
        "sin equipo",
    ];
}

/// Exercise record defaults
pub mod exercise {
    /// Display name used when a record carries no id and no name
    pub const UNNAMED_PLACEHOLDER: &str = "Ejercicio sin nombre";

    /// Prefix for the generated display name of an unnamed record with an id
    pub const PLACEHOLDER_PREFIX: &str = "Ejercicio";

    /// Quality tag applied when the record has none
    pub const DEFAULT_QUALITY: &str = "general";

    /// Movement pattern tag applied when the record has none
    pub const DEFAULT_PATTERN: &str = "general";

    /// Thumbnail URL template; `{id}` is replaced with the `YouTube` video id
    pub const YOUTUBE_THUMBNAIL_TEMPLATE: &str = "https://img.youtube.com/vi/{id}/hqdefault.jpg";
}

/// Block compilation defaults
pub mod blocks {
    /// Block-name substring that triggers high-density splitting
    pub const DEFAULT_SPLIT_MARKER: &str = "BURN";

    /// Exercises per split part
    pub const DEFAULT_SPLIT_PART_SIZE: usize = 2;

    /// EMOM duration used when an EMOM-flagged config has no sets
    pub const DEFAULT_EMOM_MINUTES: u32 = 4;

    /// EMOM density label used by every inferred EMOM configuration
    pub const DEFAULT_EMOM_DENSITY: &str = "normal";

    /// Label prefix for split parts ("Parte 1", "Parte 2", ...)
    pub const PART_LABEL_PREFIX: &str = "Parte";
}

/// Targeting metric labels
pub mod metrics {
    /// Metric label for time-driven targeting
    pub const TIME: &str = "time";

    /// Metric label for round-driven targeting
    pub const ROUNDS: &str = "rounds";
}

/// Environment variable names read by the pipeline configuration
pub mod env_keys {
    /// Block-name substring that triggers splitting
    pub const SPLIT_MARKER: &str = "COACH_SPLIT_MARKER";

    /// Exercises per split part
    pub const SPLIT_PART_SIZE: &str = "COACH_SPLIT_PART_SIZE";

    /// Fallback EMOM duration in minutes
    pub const DEFAULT_EMOM_MINUTES: &str = "COACH_DEFAULT_EMOM_MINUTES";

    /// Enables per-module history lookups
    pub const HISTORY_ENABLED: &str = "COACH_HISTORY_ENABLED";
}

/// Service names for structured logging
pub mod service_names {
    /// Default service name reported in log records
    pub const SESSION_PIPELINE: &str = "coach-session-pipeline";
}

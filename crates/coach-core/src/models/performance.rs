// ABOUTME: Performance logs recorded by the session runner for each executed module
// ABOUTME: Read-only to the pipeline; used to attach last-performance data per module
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::lenient::{self, FromToken};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle status of a performance log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogStatus {
    /// Results fully recorded
    #[default]
    Completed,
    /// Created by the runner but not yet filled in
    Pending,
    /// Abandoned before completion
    Abandoned,
}

impl LogStatus {
    /// Convert to storage string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Abandoned => "abandoned",
        }
    }
}

impl FromToken for LogStatus {
    fn from_token(token: &str) -> Self {
        match token.trim().to_lowercase().as_str() {
            "pending" => Self::Pending,
            "abandoned" => Self::Abandoned,
            _ => Self::Completed,
        }
    }
}

/// Most recent recorded results of one athlete on one module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceLog {
    /// Log identifier
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    /// Athlete who performed the module
    pub athlete_id: String,
    /// Module identifier at the time of execution
    pub module_id: String,
    /// Cross-session module identity, when the module carried one
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub stable_id: Option<String>,
    /// Lifecycle status
    #[serde(default, deserialize_with = "lenient::token")]
    pub status: LogStatus,
    /// When the results were recorded
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
    /// Recorded results as written by the runner
    #[serde(default)]
    pub results: Value,
}

impl PerformanceLog {
    /// Whether the log is still awaiting results
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == LogStatus::Pending
    }

    /// Whether the log belongs to the given module identity
    #[must_use]
    pub fn matches(&self, module_id: &str, stable_id: Option<&str>) -> bool {
        match stable_id {
            Some(stable) => self.stable_id.as_deref() == Some(stable),
            None => self.module_id == module_id,
        }
    }
}

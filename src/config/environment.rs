// ABOUTME: Environment-driven pipeline configuration with validation
// ABOUTME: Reads split marker, part size, EMOM fallback, and history toggle from COACH_* variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::compiler::CompilerConfig;
use coach_core::constants::{blocks, env_keys};
use coach_core::errors::{AppError, AppResult};
use std::env;
use std::str::FromStr;
use tracing::{debug, info};

/// Top-level pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Compiler tunables
    pub compiler: CompilerConfig,
    /// Whether hydration fetches per-module history
    pub history_enabled: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            compiler: CompilerConfig::default(),
            history_enabled: true,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a variable is set to an unusable value
    pub fn from_env() -> AppResult<Self> {
        info!("Loading pipeline configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a variable is set to an unusable value
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let split_marker = lookup(env_keys::SPLIT_MARKER)
            .map(|marker| marker.trim().to_owned())
            .unwrap_or_else(|| blocks::DEFAULT_SPLIT_MARKER.to_owned());
        if split_marker.is_empty() {
            return Err(AppError::config(format!(
                "{} must not be blank",
                env_keys::SPLIT_MARKER
            )));
        }

        let split_part_size: usize = parse_or(
            &lookup,
            env_keys::SPLIT_PART_SIZE,
            blocks::DEFAULT_SPLIT_PART_SIZE,
        )?;
        if split_part_size == 0 {
            return Err(AppError::config(format!(
                "{} must be at least 1",
                env_keys::SPLIT_PART_SIZE
            )));
        }

        let default_emom_minutes: u32 = parse_or(
            &lookup,
            env_keys::DEFAULT_EMOM_MINUTES,
            blocks::DEFAULT_EMOM_MINUTES,
        )?;
        if default_emom_minutes == 0 {
            return Err(AppError::config(format!(
                "{} must be at least 1",
                env_keys::DEFAULT_EMOM_MINUTES
            )));
        }

        let history_enabled = match lookup(env_keys::HISTORY_ENABLED) {
            Some(raw) => parse_bool(env_keys::HISTORY_ENABLED, &raw)?,
            None => true,
        };

        let config = Self {
            compiler: CompilerConfig {
                split_marker,
                split_part_size,
                default_emom_minutes,
            },
            history_enabled,
        };
        debug!(?config, "Pipeline configuration loaded");
        Ok(config)
    }
}

/// Parse a variable, or use the default when it is unset
fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}")))
    })
}

/// Parse a boolean flag accepting true/false, 1/0, yes/no, on/off
fn parse_bool(key: &str, raw: &str) -> AppResult<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(AppError::config(format!("Invalid {key} value '{raw}'"))),
    }
}

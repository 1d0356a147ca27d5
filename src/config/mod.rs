// ABOUTME: Configuration management for the session pipeline
// ABOUTME: Environment-only configuration, validated once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! All configuration comes from environment variables; there are no
//! configuration files. See [`environment::PipelineConfig`].

/// Environment-driven pipeline configuration
pub mod environment;

pub use environment::PipelineConfig;

// ABOUTME: Core types and constants for the coaching session compilation pipeline
// ABOUTME: Foundation crate with error handling, constants, and the session data model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Coach Core
//!
//! Foundation crate providing shared types and constants for the session
//! compilation pipeline. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Protocol tokens, equipment tokens, and compilation defaults
//! - **models**: Raw session/exercise input shapes and compiled pipeline outputs
//! - **lenient**: Serde helpers that tolerate malformed document-store fields

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Session, exercise, timeline, and performance-log data models
pub mod models;

/// Tolerant serde deserializers for loosely-shaped stored documents
pub mod lenient;

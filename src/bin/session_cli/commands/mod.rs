// ABOUTME: Re-exports command modules for session-compiler
// ABOUTME: Provides access to compile, match-name, and hydrate commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod compile;
pub mod hydrate;
pub mod match_name;

// ABOUTME: Driver for the modern, array-of-blocks session schema
// ABOUTME: Decodes each block leniently and compiles it in input order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::compiler::block::compile_block;
use crate::compiler::CompileContext;
use coach_core::models::{Block, Module};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Compile an array of authored blocks into modules, in block order
///
/// Elements that cannot be decoded as a block are skipped with a warning.
#[must_use]
pub fn compile_blocks(blocks: &[Value], ctx: &CompileContext<'_>) -> Vec<Module> {
    blocks
        .iter()
        .enumerate()
        .filter_map(|(position, raw)| match Block::deserialize(raw) {
            Ok(block) => Some(compile_block(&block, position, ctx)),
            Err(e) => {
                warn!(position, error = %e, "Skipping malformed session block");
                None
            }
        })
        .flatten()
        .collect()
}

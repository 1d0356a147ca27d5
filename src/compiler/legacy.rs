// ABOUTME: Driver for the legacy, category-keyed session schema
// ABOUTME: Resolves module references against the modules collection and applies per-session overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::compiler::block::{resolve_emom, resolve_protocol};
use crate::compiler::normalizer::normalize_record;
use crate::compiler::targeting::infer_targeting;
use crate::compiler::CompileContext;
use coach_core::models::{
    BlockCategory, CanonicalExercise, LegacyEntry, LegacyModule, LegacySessionBlocks, Module,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Compile legacy module references into modules
///
/// Categories are visited in their fixed execution order and entries in
/// authored order within a category. References that do not resolve to a
/// stored module are skipped.
#[must_use]
pub fn compile_legacy(
    blocks: &LegacySessionBlocks,
    modules: &[LegacyModule],
    ctx: &CompileContext<'_>,
) -> Vec<Module> {
    let mut by_id: HashMap<&str, &LegacyModule> = HashMap::with_capacity(modules.len());
    for module in modules {
        if let Some(id) = module.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
            by_id.entry(id).or_insert(module);
        }
    }

    BlockCategory::ORDER
        .into_iter()
        .flat_map(|category| {
            blocks
                .entries(category)
                .iter()
                .map(move |entry| (category, entry))
        })
        .filter_map(|(category, entry)| {
            let Some(stored) = by_id.get(entry.module_id()) else {
                debug!(
                    module_id = entry.module_id(),
                    category = category.as_str(),
                    "Legacy module reference does not resolve; skipping"
                );
                return None;
            };
            Some(compile_entry(stored, entry, category, ctx))
        })
        .collect()
}

fn compile_entry(
    stored: &LegacyModule,
    entry: &LegacyEntry,
    category: BlockCategory,
    ctx: &CompileContext<'_>,
) -> Module {
    let exercises: Vec<CanonicalExercise> = stored
        .exercise_ids
        .iter()
        .filter_map(|exercise_id| {
            let record = ctx.index.by_id(exercise_id);
            if record.is_none() {
                debug!(exercise_id, "Legacy exercise reference not in library");
            }
            record.map(normalize_record)
        })
        .collect();

    let first = exercises.first();
    let targeting = stored
        .targeting
        .first()
        .cloned()
        .unwrap_or_else(|| infer_targeting(stored.params.as_ref(), first));
    let id = stored
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| entry.module_id())
        .to_owned();

    let module = Module {
        name: stored
            .name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| id.clone()),
        stable_id: stored.stable_id.clone(),
        protocol: resolve_protocol(ctx.protocol, stored.protocol),
        targeting: vec![targeting],
        emom_params: resolve_emom(
            stored.emom_params.as_ref(),
            stored.params.as_ref(),
            first,
            ctx.config.default_emom_minutes,
        ),
        exercise_names: exercises
            .iter()
            .map(|exercise| exercise.display_name().to_owned())
            .collect(),
        exercises,
        block_type: String::new(),
        part_label: None,
        offset: 0,
        id,
    };

    let mut merged = match entry.overrides() {
        Some(overrides) if !overrides.is_empty() => apply_overrides(module, overrides),
        _ => module,
    };
    merged.block_type = category.as_str().to_owned();
    merged
}

/// Shallow-merge override fields onto a module
///
/// Overrides that would produce an unreadable module are discarded with a
/// warning and the module is returned unchanged.
#[must_use]
pub fn apply_overrides(module: Module, overrides: &Map<String, Value>) -> Module {
    let mut value = match serde_json::to_value(&module) {
        Ok(Value::Object(map)) => map,
        Ok(_) => return module,
        Err(e) => {
            warn!(module_id = %module.id, error = %e, "Could not serialize module for overrides");
            return module;
        }
    };
    for (key, override_value) in overrides {
        value.insert(key.clone(), override_value.clone());
    }
    match serde_json::from_value(Value::Object(value)) {
        Ok(merged) => merged,
        Err(e) => {
            warn!(module_id = %module.id, error = %e, "Ignoring unreadable module overrides");
            module
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn module() -> Module {
        Module {
            id: "mod-1".into(),
            name: "Fuerza base".into(),
            ..Module::default()
        }
    }

    #[test]
    fn test_overrides_replace_top_level_fields() {
        let overrides = json!({"name": "Fuerza base (variante)", "partLabel": "A"});
        let Value::Object(map) = overrides else {
            unreachable!()
        };
        let merged = apply_overrides(module(), &map);
        assert_eq!(merged.name, "Fuerza base (variante)");
        assert_eq!(merged.part_label.as_deref(), Some("A"));
        assert_eq!(merged.id, "mod-1");
    }

    #[test]
    fn test_unreadable_overrides_are_ignored() {
        let overrides = json!({"offset": "not a number"});
        let Value::Object(map) = overrides else {
            unreachable!()
        };
        assert_eq!(apply_overrides(module(), &map), module());
    }
}

// ABOUTME: Compiles one modern-schema block into one or more canonical modules
// ABOUTME: Enrichment, EMOM/protocol resolution, targeting inference, and high-density splitting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::compiler::normalizer::enrich;
use crate::compiler::targeting::infer_targeting;
use crate::compiler::{CompileContext, CompilerConfig};
use coach_core::constants::blocks;
use coach_core::models::{
    Block, BlockCategory, BlockParams, CanonicalExercise, EmomParams, Module, Protocol,
};
use tracing::debug;

/// Compile one block into its module parts, in exercise order
///
/// `position` is the block's index in the session and only feeds the
/// generated id/name of blocks authored without them.
#[must_use]
pub fn compile_block(block: &Block, position: usize, ctx: &CompileContext<'_>) -> Vec<Module> {
    let exercises: Vec<CanonicalExercise> = block
        .exercises
        .iter()
        .map(|reference| {
            let matched = ctx.index.resolve(reference);
            if matched.is_none() {
                debug!(
                    exercise_id = reference.id.as_deref().unwrap_or_default(),
                    exercise_name = reference.name.as_deref().unwrap_or_default(),
                    "No library match for session exercise; passing through unenriched"
                );
            }
            enrich(reference, matched)
        })
        .collect();

    let first = exercises.first();
    let name = block
        .name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| format!("Bloque {}", position + 1));

    let module = Module {
        id: block
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("block-{}", position + 1)),
        stable_id: block.stable_id.clone(),
        protocol: resolve_protocol(ctx.protocol, block.protocol),
        targeting: vec![infer_targeting(block.params.as_ref(), first)],
        emom_params: resolve_emom(
            block.emom_params.as_ref(),
            block.params.as_ref(),
            first,
            ctx.config.default_emom_minutes,
        ),
        exercise_names: exercises
            .iter()
            .map(|exercise| exercise.display_name().to_owned())
            .collect(),
        block_type: block_label(block.category.as_deref(), &name),
        exercises,
        name,
        part_label: None,
        offset: 0,
    };

    split_parts(module, ctx.config)
}

/// Module protocol: the session protocol unless it is mixed, in which case
/// the block's own override or `LIBRE`
#[must_use]
pub fn resolve_protocol(session: Protocol, block_override: Option<Protocol>) -> Protocol {
    if session == Protocol::Mix {
        block_override.unwrap_or(Protocol::Libre)
    } else {
        session
    }
}

/// EMOM parameter chain: explicit params, then `params.emomMinutes`, then an
/// EMOM-flagged config on the first exercise (one minute per set)
#[must_use]
pub fn resolve_emom(
    explicit: Option<&EmomParams>,
    params: Option<&BlockParams>,
    first_exercise: Option<&CanonicalExercise>,
    default_minutes: u32,
) -> Option<EmomParams> {
    if let Some(explicit) = explicit {
        return Some(explicit.clone());
    }
    if let Some(minutes) = params.and_then(|p| p.emom_minutes).filter(|&m| m > 0) {
        return Some(emom(minutes));
    }
    let config = first_exercise
        .and_then(|exercise| exercise.config.as_ref())
        .filter(|config| config.is_emom)?;
    let minutes = u32::try_from(config.sets.len())
        .ok()
        .filter(|&count| count > 0)
        .unwrap_or(default_minutes);
    Some(emom(minutes))
}

fn emom(minutes: u32) -> EmomParams {
    EmomParams {
        duration_minutes: Some(minutes),
        density: Some(blocks::DEFAULT_EMOM_DENSITY.to_owned()),
    }
}

/// Block-category label: explicit category, a category keyword in the name,
/// or the name itself
fn block_label(category: Option<&str>, name: &str) -> String {
    if let Some(explicit) = category.filter(|c| !c.trim().is_empty()) {
        return BlockCategory::parse(explicit)
            .map_or_else(|| explicit.to_owned(), |c| c.as_str().to_owned());
    }
    BlockCategory::detect(name).map_or_else(|| name.to_owned(), |c| c.as_str().to_owned())
}

/// Split a high-density block into consecutive parts of `split_part_size` exercises
///
/// Only blocks whose name contains the split marker (case-insensitive) and
/// that hold more exercises than one part are split; everything else yields
/// the module unchanged as a single part with offset 0.
#[must_use]
pub fn split_parts(module: Module, config: &CompilerConfig) -> Vec<Module> {
    let part_size = config.split_part_size.max(1);
    let marker = config.split_marker.to_uppercase();
    let is_dense = !marker.is_empty() && module.name.to_uppercase().contains(&marker);

    if !is_dense || module.exercises.len() <= part_size {
        return vec![module];
    }

    debug!(
        module_id = %module.id,
        exercises = module.exercises.len(),
        part_size,
        "Splitting high-density block into parts"
    );

    module
        .exercises
        .chunks(part_size)
        .zip(module.exercise_names.chunks(part_size))
        .enumerate()
        .map(|(index, (exercises, names))| Module {
            exercises: exercises.to_vec(),
            exercise_names: names.to_vec(),
            part_label: Some(format!("{} {}", blocks::PART_LABEL_PREFIX, index + 1)),
            offset: index * part_size,
            ..module.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_core::models::SetConfig;

    #[test]
    fn test_protocol_resolution() {
        assert_eq!(resolve_protocol(Protocol::Timed, Some(Protocol::Reps)), Protocol::Timed);
        assert_eq!(resolve_protocol(Protocol::Mix, Some(Protocol::Emom)), Protocol::Emom);
        assert_eq!(resolve_protocol(Protocol::Mix, None), Protocol::Libre);
    }

    #[test]
    fn test_emom_chain_order() {
        let explicit = EmomParams {
            duration_minutes: Some(12),
            density: Some("alta".into()),
        };
        let params = BlockParams {
            emom_minutes: Some(8),
            ..BlockParams::default()
        };
        assert_eq!(
            resolve_emom(Some(&explicit), Some(&params), None, 4),
            Some(explicit)
        );
        assert_eq!(
            resolve_emom(None, Some(&params), None, 4).and_then(|e| e.duration_minutes),
            Some(8)
        );
    }

    #[test]
    fn test_emom_from_flagged_config() {
        let flagged = CanonicalExercise {
            config: Some(SetConfig {
                sets: Vec::new(),
                is_emom: true,
            }),
            ..CanonicalExercise::default()
        };
        let emom = resolve_emom(None, None, Some(&flagged), 4).unwrap();
        assert_eq!(emom.duration_minutes, Some(4));
        assert_eq!(emom.density.as_deref(), Some("normal"));
        assert!(resolve_emom(None, None, Some(&CanonicalExercise::default()), 4).is_none());
    }

    #[test]
    fn test_block_label_resolution() {
        assert_eq!(block_label(Some("boost"), "Anything"), "BOOST");
        assert_eq!(block_label(Some("Core"), "Anything"), "Core");
        assert_eq!(block_label(None, "Burn Finisher"), "BURN");
        assert_eq!(block_label(None, "Circuito"), "Circuito");
    }
}

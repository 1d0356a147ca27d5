// ABOUTME: Benchmark fixtures generating exercise libraries and sessions of both schema generations
// ABOUTME: Provides deterministic data generation for reproducible performance measurements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Benchmark fixtures for session compilation.
//!
//! Provides deterministic data generation for reproducible performance measurements.

use coach_session_pipeline::models::{ExerciseRecord, LegacyModule, SessionDefinition};
use serde_json::{json, Value};

/// Predefined library sizes for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum LibrarySize {
    /// Small library (50 exercises) - new coach
    Small,
    /// Large library (1000 exercises) - mature catalog
    Large,
}

impl LibrarySize {
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Small => 50,
            Self::Large => 1000,
        }
    }
}

const EQUIPMENT: [&str; 4] = ["Barra", "Mancuernas", "Peso corporal", "Kettlebell"];

/// Generate a library with a mix of field-name generations
#[must_use]
pub fn generate_library(size: LibrarySize) -> Vec<ExerciseRecord> {
    (0..size.count())
        .map(|index| {
            let record = if index % 3 == 0 {
                json!({
                    "_id": format!("lib-{index}"),
                    "name": format!("Exercise {index}"),
                    "nombre": format!("Ejercicio {index}"),
                    "instructions": ["Paso uno", "Paso dos"],
                    "youtubeUrl": format!("https://youtu.be/vid{index:08}"),
                    "equipment": EQUIPMENT[index % EQUIPMENT.len()]
                })
            } else {
                json!({
                    "id": format!("lib-{index}"),
                    "name": format!("Exercise {index}"),
                    "nameEs": format!("Ejercicio {index}"),
                    "descriptionEs": "Descripción",
                    "gifUrl": format!("https://cdn.example.com/{index}.gif"),
                    "equipment": EQUIPMENT[index % EQUIPMENT.len()],
                    "quality": "fuerza"
                })
            };
            serde_json::from_value(record).unwrap()
        })
        .collect()
}

fn exercise_ref(index: usize) -> Value {
    json!({
        "id": format!("ref-{index}"),
        "name": format!("exercise {index}"),
        "config": {"sets": [{"reps": 10, "rir": 2}, {"reps": 10, "rir": 2}, {"reps": 8, "rir": 1}]}
    })
}

/// Generate a modern session with `block_count` blocks of `per_block` exercises
///
/// Every fourth block is a BURN block so splitting is exercised.
#[must_use]
pub fn generate_modern_session(block_count: usize, per_block: usize) -> SessionDefinition {
    let blocks: Vec<Value> = (0..block_count)
        .map(|block| {
            let name = if block % 4 == 3 { "BURN" } else { "Fuerza" };
            json!({
                "id": format!("block-{block}"),
                "name": format!("{name} {block}"),
                "params": {"rounds": 3},
                "exercises": (0..per_block).map(|i| exercise_ref(block * per_block + i)).collect::<Vec<_>>()
            })
        })
        .collect();
    serde_json::from_value(json!({"id": "bench-modern", "type": "PDP-R", "blocks": blocks})).unwrap()
}

/// Generate a legacy session plus the modules collection it references
#[must_use]
pub fn generate_legacy_session(module_count: usize) -> (SessionDefinition, Vec<LegacyModule>) {
    let categories = ["WARMUP", "BASE", "BOOST", "BURN"];
    let modules: Vec<LegacyModule> = (0..module_count)
        .map(|index| {
            serde_json::from_value(json!({
                "id": format!("mod-{index}"),
                "name": format!("Módulo {index}"),
                "exerciseIds": [format!("lib-{index}"), format!("lib-{}", index + 1)]
            }))
            .unwrap()
        })
        .collect();

    let mut blocks = serde_json::Map::new();
    for (index, module) in modules.iter().enumerate() {
        let category = categories[index % categories.len()];
        let entry = blocks
            .entry(category)
            .or_insert_with(|| Value::Array(Vec::new()));
        if let (Value::Array(entries), Some(id)) = (entry, module.id.clone()) {
            entries.push(Value::String(id));
        }
    }

    let session = serde_json::from_value(json!({
        "id": "bench-legacy",
        "type": "PDP-T",
        "blocks": blocks
    }))
    .unwrap();
    (session, modules)
}

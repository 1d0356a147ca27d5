// ABOUTME: Infers timing, volume, and intensity targeting for a block of work
// ABOUTME: Explicit block params win; otherwise the first exercise's first set is inspected
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use coach_core::constants::metrics;
use coach_core::models::{BlockParams, CanonicalExercise, TargetingSpec, VolumeType};

/// Derive one targeting spec from explicit params and the first enriched exercise
///
/// Never fails: fields that cannot be inferred stay at their zero/empty defaults.
#[must_use]
pub fn infer_targeting(
    params: Option<&BlockParams>,
    first_exercise: Option<&CanonicalExercise>,
) -> TargetingSpec {
    let mut spec = TargetingSpec::default();

    let time_cap = params.and_then(|p| p.time_cap).filter(|&cap| cap > 0);
    let rounds = params.and_then(|p| p.rounds).filter(|&rounds| rounds > 0);

    if let Some(cap) = time_cap {
        spec.time_cap = cap;
        spec.metric = metrics::TIME.to_owned();
    }
    if let Some(rounds) = rounds {
        spec.volume = f64::from(rounds);
        spec.metric = metrics::ROUNDS.to_owned();
    }

    let first_set = first_exercise
        .and_then(|exercise| exercise.config.as_ref())
        .and_then(|config| config.sets.first());

    if let Some(set) = first_set {
        if time_cap.is_none() && rounds.is_none() {
            // Ranges such as "8-12" read as their lower bound
            let amount = set
                .volume
                .as_ref()
                .map_or(0.0, |v| v.as_f64().unwrap_or_else(|| v.as_integer() as f64));
            match set.volume_type {
                VolumeType::Time => {
                    spec.time_cap = clamp_seconds(amount);
                    spec.metric = metrics::TIME.to_owned();
                }
                VolumeType::Km | VolumeType::Metros | VolumeType::Kcal | VolumeType::Reps => {
                    spec.volume = amount.max(0.0);
                    spec.metric = set.volume_type.metric_label();
                }
            }
        }

        if let Some(intensity) = set.intensity.as_ref().filter(|i| i.is_truthy()) {
            spec.intensity_value = Some(intensity.clone());
            spec.intensity_type = Some(set.intensity_type);
        }
    }

    if let Some(description) = params
        .and_then(|p| p.description.as_deref())
        .filter(|text| !text.trim().is_empty())
    {
        spec.instruction = description.to_owned();
    }
    if spec.instruction.is_empty() {
        if let Some(notes) = first_exercise.and_then(|exercise| exercise.notes.as_deref()) {
            spec.instruction = notes.to_owned();
        }
    }

    spec
}

fn clamp_seconds(amount: f64) -> u32 {
    if amount.is_finite() {
        amount.clamp(0.0, f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

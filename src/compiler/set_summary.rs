// ABOUTME: Compact textual summary of a per-set prescription
// ABOUTME: Produces "3 x 10 @ 2 RIR" style manifestations and the target rep count
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use coach_core::models::{SetConfig, SetDescriptor, VolumeType};
use serde::{Deserialize, Serialize};

/// Marker used when sets prescribe different volumes
pub const VARIABLE_VOLUME_MARKER: &str = "(VAR)";

/// Rendered in place of a uniform volume that was never authored
const MISSING_VOLUME: &str = "?";

/// Summary of a set configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SetSummary {
    /// Compact manifestation such as `3 x 10 @ 2 RIR` (empty when there are no sets)
    pub text: String,
    /// First set's volume coerced to an integer (0 when absent)
    pub reps: u32,
}

/// Summarize a set configuration
///
/// Missing configuration or an empty set list yields an empty summary.
#[must_use]
pub fn summarize(config: Option<&SetConfig>) -> SetSummary {
    let Some(sets) = config.map(|c| c.sets.as_slice()).filter(|s| !s.is_empty()) else {
        return SetSummary::default();
    };
    let first = &sets[0];

    let reps = first
        .volume
        .as_ref()
        .map_or(0, |v| v.as_integer().clamp(0, i64::from(u32::MAX)) as u32);

    let mut text = format!("{} x ", sets.len());
    if all_equal(sets, |s| &s.volume) {
        match &first.volume {
            Some(volume) => {
                text.push_str(&volume.to_string());
                if first.volume_type == VolumeType::Time {
                    text.push('s');
                }
            }
            None => text.push_str(MISSING_VOLUME),
        }
    } else {
        text.push_str(VARIABLE_VOLUME_MARKER);
    }

    if all_equal(sets, |s| &s.intensity) {
        if let Some(intensity) = first.intensity.as_ref().filter(|i| i.is_truthy()) {
            text.push_str(&format!(" @ {intensity} {}", first.intensity_type));
        }
    }

    SetSummary { text, reps }
}

fn all_equal<T: PartialEq>(sets: &[SetDescriptor], field: impl Fn(&SetDescriptor) -> &T) -> bool {
    let first = field(&sets[0]);
    sets.iter().all(|set| field(set) == first)
}

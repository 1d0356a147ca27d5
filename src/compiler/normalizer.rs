// ABOUTME: Canonicalizes heterogeneous exercise records into one stable shape
// ABOUTME: Ordered fallback chains per concept (name, description, media) plus library enrichment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Exercise Normalizer
//!
//! Exercise documents come from several generations of authoring tools and
//! spell the same concept under different field names. Each concept is
//! resolved by exactly one fallback-chain function below; every caller goes
//! through [`normalize_record`] so the chains are applied uniformly.
//!
//! | Concept     | Chain                                                                 |
//! |-------------|-----------------------------------------------------------------------|
//! | name        | `nameEs` → `name` → `Ejercicio <id>` → `Ejercicio sin nombre`          |
//! | description | `descriptionEs` → `description` → `instructions` joined by newlines → `""` |
//! | media       | `gifUrl` → `mediaUrl` → `videoUrl` → `imageUrl` → `imageStart` → `YouTube` thumbnail → `""` |
//!
//! Normalization is idempotent: feeding a canonical record back through
//! [`normalize_record`] (via `ExerciseRecord::from`) reproduces it unchanged.

use crate::compiler::set_summary::summarize;
use coach_core::constants::{equipment, exercise};
use coach_core::models::{CanonicalExercise, ExerciseRecord};
use regex::Regex;
use std::sync::OnceLock;

static YOUTUBE_ID: OnceLock<Option<Regex>> = OnceLock::new();

/// Normalize an optional record; `None` stays `None` and callers filter it out
#[must_use]
pub fn normalize(raw: Option<&ExerciseRecord>) -> Option<CanonicalExercise> {
    raw.map(normalize_record)
}

/// Normalize one record into its canonical shape
#[must_use]
pub fn normalize_record(raw: &ExerciseRecord) -> CanonicalExercise {
    let name_es = resolve_name(raw);
    let is_bodyweight = raw.equipment.as_deref().is_some_and(is_bodyweight);
    let summary = summarize(raw.config.as_ref());
    let target_reps = if summary.reps > 0 {
        summary.reps
    } else {
        raw.target_reps.unwrap_or(0)
    };

    CanonicalExercise {
        id: raw.id.clone(),
        library_id: raw.library_id.clone(),
        name: present(raw.name.as_deref()).map_or_else(|| name_es.clone(), str::to_owned),
        name_es,
        description_es: resolve_description(raw),
        media_url: resolve_media_url(raw),
        equipment: raw.equipment.clone(),
        is_bodyweight,
        loadable: raw.loadable.unwrap_or(!is_bodyweight),
        quality: present(raw.quality.as_deref())
            .unwrap_or(exercise::DEFAULT_QUALITY)
            .to_owned(),
        pattern: present(raw.pattern.as_deref())
            .unwrap_or(exercise::DEFAULT_PATTERN)
            .to_owned(),
        config: raw.config.clone(),
        notes: raw.notes.clone(),
        target_reps,
        manifestation: summary.text,
    }
}

/// Enrich a session-embedded reference with its matched library record
///
/// On a hit, descriptive fields (names, description, media, loadable,
/// quality, pattern) come from the library while the session keeps its own
/// id, set configuration, notes, and target reps. On a miss the reference is
/// normalized unchanged.
#[must_use]
pub fn enrich(reference: &ExerciseRecord, matched: Option<&ExerciseRecord>) -> CanonicalExercise {
    let Some(library) = matched else {
        return normalize_record(reference);
    };

    let merged = ExerciseRecord {
        id: reference.id.clone().or_else(|| library.id.clone()),
        library_id: library.id.clone().or_else(|| reference.library_id.clone()),
        config: reference.config.clone(),
        notes: reference.notes.clone(),
        target_reps: reference.target_reps,
        ..library.clone()
    };
    normalize_record(&merged)
}

/// Whether an equipment descriptor denotes bodyweight work
#[must_use]
pub fn is_bodyweight(equipment_descriptor: &str) -> bool {
    let lowered = equipment_descriptor.to_lowercase();
    equipment::BODYWEIGHT_TOKENS
        .iter()
        .any(|token| lowered.contains(token))
}

/// Localized display name chain
#[must_use]
pub fn resolve_name(raw: &ExerciseRecord) -> String {
    first_present([raw.name_es.as_deref(), raw.name.as_deref()]).map_or_else(
        || match present(raw.id.as_deref()) {
            Some(id) => format!("{} {id}", exercise::PLACEHOLDER_PREFIX),
            None => exercise::UNNAMED_PLACEHOLDER.to_owned(),
        },
        str::to_owned,
    )
}

/// Localized description chain
#[must_use]
pub fn resolve_description(raw: &ExerciseRecord) -> String {
    if let Some(text) = first_present([raw.description_es.as_deref(), raw.description.as_deref()]) {
        return text.to_owned();
    }
    raw.instructions.join("\n")
}

/// Media URL chain
#[must_use]
pub fn resolve_media_url(raw: &ExerciseRecord) -> String {
    first_present([
        raw.gif_url.as_deref(),
        raw.media_url.as_deref(),
        raw.video_url.as_deref(),
        raw.image_url.as_deref(),
        raw.image_start.as_deref(),
    ])
    .map(str::to_owned)
    .or_else(|| raw.youtube_url.as_deref().and_then(youtube_thumbnail))
    .unwrap_or_default()
}

/// Thumbnail URL for a `YouTube` watch, short-link, embed, or shorts URL
#[must_use]
pub fn youtube_thumbnail(url: &str) -> Option<String> {
    let pattern = YOUTUBE_ID
        .get_or_init(|| {
            Regex::new(r"(?:youtube\.com/(?:watch\?(?:.*&)?v=|embed/|shorts/)|youtu\.be/)([A-Za-z0-9_-]{6,})")
                .ok()
        })
        .as_ref()?;
    let video_id = pattern.captures(url)?.get(1)?.as_str();
    Some(exercise::YOUTUBE_THUMBNAIL_TEMPLATE.replace("{id}", video_id))
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

fn first_present<'a, const N: usize>(candidates: [Option<&'a str>; N]) -> Option<&'a str> {
    candidates.into_iter().find_map(present)
}

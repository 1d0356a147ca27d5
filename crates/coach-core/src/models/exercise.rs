// ABOUTME: Exercise records, per-set configuration, and the canonical exercise shape
// ABOUTME: Raw records accept many field spellings; canonical records have one stable shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::lenient::{self, FromToken};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

// ============================================================================
// Set configuration
// ============================================================================

/// A set quantity as authored: either a number (`10`) or free text (`"8-12"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SetValue {
    /// Numeric quantity
    Number(f64),
    /// Free-text quantity such as a range
    Text(String),
}

impl SetValue {
    /// Whether the value counts as present (non-zero number, non-empty text)
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(text) => !text.is_empty(),
        }
    }

    /// Integer coercion: numbers truncate, text yields its leading integer (0 if none)
    #[must_use]
    pub fn as_integer(&self) -> i64 {
        match self {
            Self::Number(n) if n.is_finite() => n.trunc() as i64,
            Self::Number(_) => 0,
            Self::Text(text) => leading_integer(text).unwrap_or(0),
        }
    }

    /// Numeric reading of the value, if it has one
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
        }
    }
}

impl fmt::Display for SetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) if n.fract() == 0.0 && n.is_finite() => write!(f, "{n:.0}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Leading optionally-signed integer of a string, ignoring leading whitespace
fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(digits.len(), |(i, _)| i);
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

fn opt_set_value<'de, D>(deserializer: D) -> Result<Option<SetValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(number) => number.as_f64().map(SetValue::Number),
        Value::String(text) => Some(SetValue::Text(text)),
        _ => None,
    })
}

/// Unit of a set's volume quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolumeType {
    /// Repetitions
    #[default]
    Reps,
    /// Seconds of work
    Time,
    /// Kilometres
    Km,
    /// Metres
    Metros,
    /// Kilocalories
    Kcal,
}

impl VolumeType {
    /// Canonical uppercase token
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reps => "REPS",
            Self::Time => "TIME",
            Self::Km => "KM",
            Self::Metros => "METROS",
            Self::Kcal => "KCAL",
        }
    }

    /// Lowercase metric label used in targeting specs
    #[must_use]
    pub fn metric_label(&self) -> String {
        self.as_str().to_lowercase()
    }
}

impl FromToken for VolumeType {
    fn from_token(token: &str) -> Self {
        match token.trim().to_uppercase().as_str() {
            "TIME" => Self::Time,
            "KM" => Self::Km,
            "METROS" => Self::Metros,
            "KCAL" => Self::Kcal,
            // Default to Reps for unrecognized values
            _ => Self::Reps,
        }
    }
}

/// How a set's intensity quantity is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IntensityType {
    /// Reps in reserve
    #[default]
    #[serde(rename = "RIR")]
    Rir,
    /// Rate of perceived exertion
    #[serde(rename = "RPE")]
    Rpe,
    /// Percentage of one-rep max
    #[serde(rename = "%RM")]
    PercentRm,
}

impl IntensityType {
    /// Canonical token
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rir => "RIR",
            Self::Rpe => "RPE",
            Self::PercentRm => "%RM",
        }
    }
}

impl FromToken for IntensityType {
    fn from_token(token: &str) -> Self {
        match token.trim().to_uppercase().as_str() {
            "RPE" => Self::Rpe,
            "%RM" | "RM" | "%" => Self::PercentRm,
            _ => Self::Rir,
        }
    }
}

impl fmt::Display for IntensityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One prescribed set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetDescriptor {
    /// Volume quantity (reps, seconds, distance, calories)
    #[serde(
        default,
        rename = "reps",
        alias = "volume",
        deserialize_with = "opt_set_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub volume: Option<SetValue>,
    /// Unit of the volume quantity
    #[serde(
        default,
        rename = "volType",
        alias = "volumeType",
        deserialize_with = "lenient::token"
    )]
    pub volume_type: VolumeType,
    /// Intensity quantity
    #[serde(
        default,
        rename = "rir",
        alias = "intensity",
        deserialize_with = "opt_set_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub intensity: Option<SetValue>,
    /// How the intensity quantity is expressed
    #[serde(
        default,
        rename = "intType",
        alias = "intensityType",
        deserialize_with = "lenient::token"
    )]
    pub intensity_type: IntensityType,
}

/// Per-exercise set prescription
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetConfig {
    /// Ordered sets; empty when missing or not a list
    #[serde(default, deserialize_with = "lenient::list")]
    pub sets: Vec<SetDescriptor>,
    /// Whether the exercise is prescribed as an EMOM
    #[serde(
        default,
        rename = "isEMOM",
        alias = "isEmom",
        deserialize_with = "lenient::flag"
    )]
    pub is_emom: bool,
}

// ============================================================================
// Exercise records
// ============================================================================

/// An exercise as stored by the library or embedded in a session block
///
/// Library records and session-embedded references share this shape; the
/// library side fills the descriptive fields while the session side fills
/// `config`, `notes`, and `target_reps`. Several historical spellings are
/// kept as distinct fields because the normalizer walks them in priority order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRecord {
    /// Record identifier (session-embedded ids are often regenerated)
    #[serde(default, alias = "_id", deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    /// Library identifier when the record was enriched from the library
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub library_id: Option<String>,
    /// Primary name
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    /// Localized name
    #[serde(default, alias = "nombre", deserialize_with = "lenient::opt_string")]
    pub name_es: Option<String>,
    /// Localized description
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description_es: Option<String>,
    /// Untranslated description
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    /// Step-by-step instructions
    #[serde(default, deserialize_with = "lenient::list")]
    pub instructions: Vec<String>,
    /// Animated demonstration
    #[serde(default, alias = "gif", deserialize_with = "lenient::opt_string")]
    pub gif_url: Option<String>,
    /// Generic media reference
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub media_url: Option<String>,
    /// Hosted video
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub video_url: Option<String>,
    /// Static image
    #[serde(default, alias = "image", deserialize_with = "lenient::opt_string")]
    pub image_url: Option<String>,
    /// First frame of a start/end image pair
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub image_start: Option<String>,
    /// `YouTube` watch URL
    #[serde(default, alias = "youtube", deserialize_with = "lenient::opt_string")]
    pub youtube_url: Option<String>,
    /// Equipment descriptor
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub equipment: Option<String>,
    /// Movement pattern tag
    #[serde(default, alias = "movementPattern", deserialize_with = "lenient::opt_string")]
    pub pattern: Option<String>,
    /// Quality tag
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub quality: Option<String>,
    /// Whether external load applies
    #[serde(default, alias = "isLoadable", deserialize_with = "lenient::opt_bool")]
    pub loadable: Option<bool>,
    /// Per-set prescription
    #[serde(default, deserialize_with = "lenient::opt_object")]
    pub config: Option<SetConfig>,
    /// Coach notes
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub notes: Option<String>,
    /// Authored target reps
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub target_reps: Option<u32>,
}

/// An exercise after normalization: every consumer-facing field is resolved
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalExercise {
    /// Identifier carried by the source record
    #[serde(default)]
    pub id: Option<String>,
    /// Library identifier when enriched from the library
    #[serde(default)]
    pub library_id: Option<String>,
    /// Primary name
    #[serde(default)]
    pub name: String,
    /// Localized display name
    #[serde(default)]
    pub name_es: String,
    /// Localized description
    #[serde(default)]
    pub description_es: String,
    /// Best available media URL (empty when none)
    #[serde(default)]
    pub media_url: String,
    /// Equipment descriptor
    #[serde(default)]
    pub equipment: Option<String>,
    /// Whether the equipment descriptor denotes bodyweight work
    #[serde(default)]
    pub is_bodyweight: bool,
    /// Whether external load applies
    #[serde(default)]
    pub loadable: bool,
    /// Quality tag
    #[serde(default)]
    pub quality: String,
    /// Movement pattern tag
    #[serde(default)]
    pub pattern: String,
    /// Per-set prescription
    #[serde(default)]
    pub config: Option<SetConfig>,
    /// Coach notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Target reps derived from the first set
    #[serde(default)]
    pub target_reps: u32,
    /// Compact prescription such as `3 x 10 @ 2 RIR`
    #[serde(default)]
    pub manifestation: String,
}

impl CanonicalExercise {
    /// Display name used in module exercise-name lists
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.name_es
    }
}

impl From<&CanonicalExercise> for ExerciseRecord {
    fn from(exercise: &CanonicalExercise) -> Self {
        let non_empty = |text: &str| (!text.is_empty()).then(|| text.to_owned());
        Self {
            id: exercise.id.clone(),
            library_id: exercise.library_id.clone(),
            name: non_empty(&exercise.name),
            name_es: non_empty(&exercise.name_es),
            description_es: non_empty(&exercise.description_es),
            media_url: non_empty(&exercise.media_url),
            equipment: exercise.equipment.clone(),
            pattern: non_empty(&exercise.pattern),
            quality: non_empty(&exercise.quality),
            loadable: Some(exercise.loadable),
            config: exercise.config.clone(),
            notes: exercise.notes.clone(),
            target_reps: (exercise.target_reps > 0).then_some(exercise.target_reps),
            ..Self::default()
        }
    }
}

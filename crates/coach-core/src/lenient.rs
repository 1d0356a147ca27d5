// ABOUTME: Tolerant serde deserializers for loosely-shaped stored documents
// ABOUTME: Wrongly-typed fields degrade to empty/absent values instead of failing the record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Session and exercise documents are authored by several generations of
//! planning tools. A single wrongly-typed field must not make the whole record
//! unreadable, so the models route their fields through these helpers.
//!
//! Every helper is meant to be paired with `#[serde(default)]` so that a
//! missing field behaves like a malformed one.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Enum-like types that can be parsed from a free-form token
pub trait FromToken: Default {
    /// Parse a token, falling back to the default for unknown tokens
    fn from_token(token: &str) -> Self;
}

/// List field: non-lists become empty, unparseable elements are dropped
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Optional list field: `None` unless the stored value is a list
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value
pub fn opt_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

/// Optional nested object: unparseable values become `None`
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value
pub fn opt_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// Optional text field: numbers are rendered, other non-strings become `None`
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

/// Optional number: numeric strings are parsed, everything else is `None`
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Optional unsigned integer: negative or fractional values are truncated into range
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value
pub fn opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_f64(deserializer)?
        .filter(|n| n.is_finite())
        .map(|n| n.max(0.0).min(f64::from(u32::MAX)) as u32))
}

/// Unsigned integer defaulting to zero
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value
pub fn u32_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_u32(deserializer)?.unwrap_or(0))
}

/// Non-negative number defaulting to zero
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value
pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_f64(deserializer)?
        .filter(|n| n.is_finite())
        .map_or(0.0, |n| n.max(0.0)))
}

/// Optional flag: accepts booleans, `"true"`/`"false"`, and numbers (non-zero is true)
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value
pub fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(flag) => Some(flag),
        Value::String(text) => match text.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        Value::Number(number) => number.as_f64().map(|n| n != 0.0),
        _ => None,
    })
}

/// Flag field defaulting to `false`
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_bool(deserializer)?.unwrap_or(false))
}

/// Enum token field: unknown or non-string tokens become the default
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value
pub fn token<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromToken,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => T::from_token(&text),
        _ => T::default(),
    })
}

/// Optional enum token field: absent or non-string values become `None`
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value
pub fn opt_token<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromToken,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) if !text.trim().is_empty() => Some(T::from_token(&text)),
        _ => None,
    })
}

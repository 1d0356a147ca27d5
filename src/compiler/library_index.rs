// ABOUTME: Per-compilation lookup indices over the exercise library
// ABOUTME: Resolves session references by identifier first, then by normalized name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::compiler::name_matcher::normalize_key;
use coach_core::models::ExerciseRecord;
use std::collections::HashMap;

/// Identifier and name indices built once per compilation
///
/// When several library records share an id or a name key, the first record
/// in library order wins.
#[derive(Debug, Default)]
pub struct LibraryIndex<'a> {
    by_id: HashMap<&'a str, &'a ExerciseRecord>,
    by_name: HashMap<String, &'a ExerciseRecord>,
}

impl<'a> LibraryIndex<'a> {
    /// Build both indices from the library
    #[must_use]
    pub fn build(library: &'a [ExerciseRecord]) -> Self {
        let mut index = Self {
            by_id: HashMap::with_capacity(library.len()),
            by_name: HashMap::with_capacity(library.len() * 2),
        };
        for record in library {
            if let Some(id) = record.id.as_deref().filter(|id| !id.is_empty()) {
                index.by_id.entry(id).or_insert(record);
            }
            for name in [record.name.as_deref(), record.name_es.as_deref()]
                .into_iter()
                .flatten()
            {
                let key = normalize_key(name);
                if !key.is_empty() {
                    index.by_name.entry(key).or_insert(record);
                }
            }
        }
        index
    }

    /// Record with the given identifier
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&'a ExerciseRecord> {
        self.by_id.get(id).copied()
    }

    /// Record whose primary or localized name shares the label's key
    #[must_use]
    pub fn by_name(&self, label: &str) -> Option<&'a ExerciseRecord> {
        let key = normalize_key(label);
        if key.is_empty() {
            return None;
        }
        self.by_name.get(&key).copied()
    }

    /// Resolve a session-embedded reference: library id, own id, then names
    #[must_use]
    pub fn resolve(&self, reference: &ExerciseRecord) -> Option<&'a ExerciseRecord> {
        [reference.library_id.as_deref(), reference.id.as_deref()]
            .into_iter()
            .flatten()
            .find_map(|id| self.by_id(id))
            .or_else(|| {
                [reference.name.as_deref(), reference.name_es.as_deref()]
                    .into_iter()
                    .flatten()
                    .find_map(|name| self.by_name(name))
            })
    }

    /// Number of records reachable by identifier
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the index holds no identifiable records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty() && self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, name_es: Option<&str>) -> ExerciseRecord {
        ExerciseRecord {
            id: Some(id.into()),
            name: Some(name.into()),
            name_es: name_es.map(str::to_owned),
            ..ExerciseRecord::default()
        }
    }

    #[test]
    fn test_resolve_by_id_then_name() {
        let library = vec![
            record("lib-1", "Bench Press", Some("Press Banca")),
            record("lib-2", "Back Squat", Some("Sentadilla trasera")),
        ];
        let index = LibraryIndex::build(&library);

        let by_id = ExerciseRecord {
            id: Some("lib-2".into()),
            ..ExerciseRecord::default()
        };
        assert_eq!(index.resolve(&by_id).and_then(|r| r.id.as_deref()), Some("lib-2"));

        let by_name = ExerciseRecord {
            id: Some("random-8f2c".into()),
            name: Some("press-bancas".into()),
            ..ExerciseRecord::default()
        };
        assert_eq!(index.resolve(&by_name).and_then(|r| r.id.as_deref()), Some("lib-1"));
    }

    #[test]
    fn test_first_record_wins_on_key_collision() {
        let library = vec![record("a", "Plank", None), record("b", "Planks", None)];
        let index = LibraryIndex::build(&library);
        assert_eq!(index.by_name("plank").and_then(|r| r.id.as_deref()), Some("a"));
    }

    #[test]
    fn test_blank_label_never_matches() {
        let library = vec![record("a", "---", None)];
        let index = LibraryIndex::build(&library);
        assert!(index.by_name("").is_none());
        assert!(index.by_name("***").is_none());
    }
}

//! Searchable catalog of talks built from the parsed agenda file.
//!
//! The agenda is a JSON array of objects. Every object that carries a lookup
//! key (`presno`) becomes a [`Record`]; objects without one are left out of the
//! searchable set. Titles are the search identity: each distinct title appears
//! once, at the position where it was first seen, and resolves to the *last*
//! record that carried it. Duplicate titles are therefore last-write-wins.

use std::collections::HashMap;
use std::path::Path;

use serde_json::{Map, Value};

use crate::LoadError;

/// Agenda field holding the lookup key (the presentation number).
pub const KEY_FIELD: &str = "presno";
/// Accepted in place of [`KEY_FIELD`] when that is absent.
pub const KEY_ALIAS: &str = "key";
pub const TITLE_FIELD: &str = "title";

/// One agenda entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub title: String,
    pub key: Option<String>,
    /// Everything else the entry carried (times, day, ...), untouched.
    pub extra: Map<String, Value>,
}

impl Record {
    pub fn new(title: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            key: Some(key.into()),
            extra: Map::new(),
        }
    }

    pub fn without_key(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            key: None,
            extra: Map::new(),
        }
    }

    /// Build a record from an agenda object. Returns `None` when the object has
    /// no string title.
    pub fn from_object(mut obj: Map<String, Value>) -> Option<Self> {
        let title = match obj.remove(TITLE_FIELD) {
            Some(Value::String(title)) => title,
            _ => return None,
        };
        let raw_key = if obj.contains_key(KEY_FIELD) {
            obj.remove(KEY_FIELD)
        } else {
            obj.remove(KEY_ALIAS)
        };
        let key = raw_key.as_ref().and_then(key_to_string);

        Some(Self {
            title,
            key,
            extra: obj,
        })
    }
}

/// Keys are strings or integers in practice; anything else counts as absent.
fn key_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) if n.is_u64() || n.is_i64() => Some(n.to_string()),
        _ => None,
    }
}

fn has_key(obj: &Map<String, Value>) -> bool {
    obj.get(KEY_FIELD)
        .or_else(|| obj.get(KEY_ALIAS))
        .and_then(key_to_string)
        .is_some()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Read-only title index over the keyed agenda entries.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Distinct titles in first-seen order.
    titles: Vec<String>,
    /// Lowercased titles, parallel to `titles`.
    folded: Vec<String>,
    by_title: HashMap<String, Record>,
}

impl Catalog {
    /// Build a catalog from records, dropping those without a key.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut catalog = Self::default();
        let mut duplicates = 0usize;

        for record in records.into_iter().filter(|r| r.key.is_some()) {
            let title = record.title.clone();
            if catalog.by_title.insert(title.clone(), record).is_some() {
                duplicates += 1;
                tracing::debug!(title = %title, "duplicate title, keeping the later entry");
            } else {
                catalog.folded.push(title.to_lowercase());
                catalog.titles.push(title);
            }
        }

        if duplicates > 0 {
            tracing::warn!(duplicates, "catalog contains repeated titles");
        }
        catalog
    }

    /// Load the parsed agenda at `path`.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let entries = match value {
            Value::Array(entries) => entries,
            other => {
                return Err(LoadError::Shape {
                    path: path.to_path_buf(),
                    detail: format!("expected an array of objects, found {}", json_kind(&other)),
                });
            }
        };

        let raw_count = entries.len();
        let mut records = Vec::with_capacity(raw_count);
        for (index, entry) in entries.into_iter().enumerate() {
            let obj = match entry {
                Value::Object(obj) => obj,
                other => {
                    return Err(LoadError::Shape {
                        path: path.to_path_buf(),
                        detail: format!("entry {index} is {}, not an object", json_kind(&other)),
                    });
                }
            };
            let keyed = has_key(&obj);
            match Record::from_object(obj) {
                Some(record) => records.push(record),
                None if keyed => {
                    tracing::warn!(index, "skipping keyed agenda entry without a string title");
                }
                None => {}
            }
        }

        let keyed = records.iter().filter(|r| r.key.is_some()).count();
        let catalog = Self::from_records(records);
        tracing::info!(
            path = %path.display(),
            entries = raw_count,
            keyed,
            titles = catalog.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn title(&self, index: usize) -> Option<&str> {
        self.titles.get(index).map(String::as_str)
    }

    pub fn record_for(&self, title: &str) -> Option<&Record> {
        self.by_title.get(title)
    }

    /// Record behind the title at `index`.
    pub fn record(&self, index: usize) -> Option<&Record> {
        self.title(index).and_then(|t| self.record_for(t))
    }

    /// Indices of titles containing `query`, case-insensitively, in catalog
    /// order. An empty query matches everything.
    pub fn filter(&self, query: &str) -> Vec<usize> {
        if query.is_empty() {
            return (0..self.titles.len()).collect();
        }
        let needle = query.to_lowercase();
        self.folded
            .iter()
            .enumerate()
            .filter(|(_, title)| title.contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }
}

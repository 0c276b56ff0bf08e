//! Dot-notation key paths over JSON documents
//!
//! `"window.bounds.width"` addresses `{"window": {"bounds": {"width": ..}}}`.
//! A literal dot inside a segment is written `\.`.

use serde_json::{Map, Value};

use crate::errors::{Result, StoreError};

/// Split a key into path segments
///
/// Segments are separated by unescaped dots; `\.` yields a literal dot and
/// any other backslash is kept as-is.
pub fn split(key: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = key.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'.') => {
                current.push('.');
                chars.next();
            }
            '.' => segments.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    segments.push(current);

    segments
}

/// Split and validate a key
///
/// # Errors
///
/// Returns `InvalidInput` if the key is empty or has an empty segment.
pub fn parse(key: &str) -> Result<Vec<String>> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: "key cannot be empty".to_string(),
        }
        .into());
    }

    let segments = split(key);
    if segments.iter().any(String::is_empty) {
        return Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: "empty path segment".to_string(),
        }
        .into());
    }

    Ok(segments)
}

/// Look up a value by path
pub fn get<'a>(doc: &'a Map<String, Value>, segments: &[String]) -> Option<&'a Value> {
    let (last, parents) = segments.split_last()?;
    let mut current = doc;
    for segment in parents {
        current = current.get(segment)?.as_object()?;
    }
    current.get(last)
}

/// Write a value by path
///
/// Missing intermediate objects are created; intermediate values that are
/// not objects are replaced by objects.
pub fn set(doc: &mut Map<String, Value>, segments: &[String], value: Value) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut current = doc;
    for segment in parents {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(map) = slot else {
            return;
        };
        current = map;
    }
    current.insert(last.clone(), value);
}

/// Remove a value by path, returning whether anything was removed
pub fn delete(doc: &mut Map<String, Value>, segments: &[String]) -> bool {
    let Some((last, parents)) = segments.split_last() else {
        return false;
    };

    let mut current = doc;
    for segment in parents {
        match current.get_mut(segment) {
            Some(Value::Object(map)) => current = map,
            _ => return false,
        }
    }
    current.remove(last).is_some()
}

pub fn has(doc: &Map<String, Value>, segments: &[String]) -> bool {
    get(doc, segments).is_some()
}

//! Genre text parsing
//!
//! The source stores genres as serialized text of a list of `{id, name}`
//! objects, either as JSON (`[{"id": 28, "name": "Action"}]`) or as a
//! Python-style literal with single quotes. Only the first entry's `name`
//! is used downstream.
//!
//! Two strategies, one answer:
//! 1. Structured decode of a JSON list. If the text decodes, its result is
//!    final, even when that result is absent.
//! 2. Pattern extraction from the first `{...}` object of a list literal,
//!    tried only when the structured decode fails.
//!
//! Empty list, missing `name`, non-string `name`, blank `name` and non-list
//! text all yield `None` on both paths.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

/// One decoded genre entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Genre {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// Leading `[ { ... }` of a list literal; captures the first object body
static FIRST_OBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\[\s*\{([^{}]*)\}").expect("valid first-object pattern")
});

/// `name` key with a quoted string value, in either quote style
static NAME_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:'name'|"name")\s*:\s*(?:'([^']*)'|"([^"]*)")"#)
        .expect("valid name pattern")
});

/// Structured decode of the genre list
///
/// Returns `None` when the text is not a JSON list. Entries that are not
/// objects, or whose `name` is not a string, decode with `name: None`.
pub fn parse_genres(text: &str) -> Option<Vec<Genre>> {
    let value: Value = serde_json::from_str(text.trim()).ok()?;
    let items = value.as_array()?;

    Some(
        items
            .iter()
            .map(|item| Genre {
                id: item.get("id").and_then(Value::as_i64),
                name: item.get("name").and_then(Value::as_str).map(str::to_string),
            })
            .collect(),
    )
}

/// Name of the first genre, or `None`
pub fn main_genre(text: &str) -> Option<String> {
    match parse_genres(text) {
        Some(genres) => genres.into_iter().next().and_then(|g| g.name).and_then(clean_name),
        None => extract_first_name(text),
    }
}

/// Pattern fallback for list literals the JSON decoder rejects
fn extract_first_name(text: &str) -> Option<String> {
    let body = FIRST_OBJECT.captures(text)?.get(1)?.as_str();
    let caps = NAME_FIELD.captures(body)?;
    let name = caps.get(1).or_else(|| caps.get(2))?.as_str();
    clean_name(name.to_string())
}

fn clean_name(name: String) -> Option<String> {
    let trimmed = name.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

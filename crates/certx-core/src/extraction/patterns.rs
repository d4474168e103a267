//! Ordered regex extraction over the full document text.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use super::{FieldDefinition, FieldExtractor, FieldMap, FieldSet};
use crate::pdf::DocumentText;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    // Anything except word characters and - , . / ( ) & at the end of a
    // value. Whitespace is included so nothing strippable is left behind.
    static ref TRAILING_NOISE: Regex = Regex::new(r"[^\w\-,./()&]+$").unwrap();
}

/// Normalize a captured value: trim, collapse whitespace runs (newlines
/// included) to single spaces, strip trailing punctuation noise.
///
/// Idempotent: normalizing a normalized value returns it unchanged.
pub fn normalize_value(raw: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(raw.trim(), " ");
    TRAILING_NOISE.replace(&collapsed, "").into_owned()
}

/// First non-empty normalized capture of a field's patterns, in order, or
/// an empty string.
pub fn extract_field(text: &str, field: &FieldDefinition) -> String {
    for (index, pattern) in field.patterns().iter().enumerate() {
        let Some(capture) = pattern.captures(text).and_then(|caps| caps.get(1)) else {
            continue;
        };

        let value = normalize_value(capture.as_str());
        if value.is_empty() || field.is_discarded(&value) {
            trace!("{}: pattern {} matched '{}' but it was discarded", field.name(), index, value);
            continue;
        }

        trace!("{}: pattern {} matched '{}'", field.name(), index, value);
        return value;
    }

    String::new()
}

/// Runs every field's pattern list against the full text.
pub struct PatternExtractor<'a> {
    field_set: &'a FieldSet,
}

impl<'a> PatternExtractor<'a> {
    pub fn new(field_set: &'a FieldSet) -> Self {
        Self { field_set }
    }
}

impl FieldExtractor for PatternExtractor<'_> {
    /// Contains every field of the set, empty when no pattern matched.
    fn extract(&self, text: &DocumentText) -> FieldMap {
        self.field_set
            .fields()
            .iter()
            .map(|field| (field.name().to_string(), extract_field(text.text(), field)))
            .collect()
    }
}

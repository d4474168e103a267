//! Merging pattern and heuristic results into a record.

use tracing::debug;

use super::{FieldMap, FieldSet};
use crate::models::record::{ExtractionRecord, FieldSource, FieldValue};

/// Merge both passes field by field.
///
/// A non-empty pattern value is used verbatim. Otherwise a non-empty heuristic
/// value fills the gap. Every field of the set is present in the output.
pub fn reconcile(field_set: &FieldSet, patterns: &FieldMap, heuristics: &FieldMap) -> Vec<FieldValue> {
    field_set
        .fields()
        .iter()
        .map(|field| {
            let name = field.name();
            let from_pattern = patterns.get(name).filter(|v| !v.is_empty());
            let from_lines = heuristics.get(name).filter(|v| !v.is_empty());

            let (value, source) = match (from_pattern, from_lines) {
                (Some(value), _) => {
                    debug!("{}: '{}'", name, value);
                    (value.clone(), FieldSource::Pattern)
                }
                (None, Some(value)) => {
                    debug!("{} (line parsing): '{}'", name, value);
                    (value.clone(), FieldSource::LineHeuristic)
                }
                (None, None) => {
                    debug!("{}: not found", name);
                    (String::new(), FieldSource::Missing)
                }
            };

            FieldValue {
                name: name.to_string(),
                column: field.column().to_string(),
                value,
                source,
            }
        })
        .collect()
}

/// Assemble a record for one document.
pub fn build_record(
    field_set: &FieldSet,
    source_file: &str,
    patterns: &FieldMap,
    heuristics: &FieldMap,
) -> ExtractionRecord {
    ExtractionRecord::new(source_file, reconcile(field_set, patterns, heuristics))
}

/// A record with every field empty, for documents that produced no text.
pub fn empty_record(field_set: &FieldSet, source_file: &str) -> ExtractionRecord {
    build_record(field_set, source_file, &FieldMap::new(), &FieldMap::new())
}

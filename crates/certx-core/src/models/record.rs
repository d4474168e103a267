//! Extraction records: the total field-to-value mapping for one document.

use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Column holding the document's file name.
pub const SOURCE_COLUMN: &str = "Source File";

/// Which stage produced a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    /// An ordered regex pattern matched.
    Pattern,
    /// The line heuristic backfilled an empty pattern result.
    LineHeuristic,
    /// Neither stage found anything; the value is empty.
    Missing,
}

/// One reconciled field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    /// Canonical field name (also the label used by heuristics).
    pub name: String,
    /// Output column name.
    pub column: String,
    /// Extracted value, empty when not found.
    pub value: String,
    pub source: FieldSource,
}

/// All fields of one document plus its source file name.
///
/// Every field of the field set the record was built from is present, in
/// field set order; missing values are empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRecord {
    source_file: String,
    fields: Vec<FieldValue>,
}

impl ExtractionRecord {
    pub fn new(source_file: impl Into<String>, fields: Vec<FieldValue>) -> Self {
        Self {
            source_file: source_file.into(),
            fields,
        }
    }

    /// Base file name of the document.
    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    pub fn fields(&self) -> &[FieldValue] {
        &self.fields
    }

    /// Value of a field by canonical name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Provenance of a field by canonical name.
    pub fn source_of(&self, name: &str) -> Option<FieldSource> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.source)
    }

    /// Table header: field columns followed by the source column.
    pub fn headers(&self) -> Vec<&str> {
        self.fields
            .iter()
            .map(|f| f.column.as_str())
            .chain(std::iter::once(SOURCE_COLUMN))
            .collect()
    }

    /// Table row matching [`headers`](Self::headers).
    pub fn row(&self) -> Vec<&str> {
        self.fields
            .iter()
            .map(|f| f.value.as_str())
            .chain(std::iter::once(self.source_file.as_str()))
            .collect()
    }

    /// Number of fields with a non-empty value.
    pub fn filled_count(&self) -> usize {
        self.fields.iter().filter(|f| !f.value.is_empty()).count()
    }

    pub fn is_blank(&self) -> bool {
        self.filled_count() == 0
    }
}

impl Serialize for ExtractionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        for field in &self.fields {
            map.serialize_entry(&field.column, &field.value)?;
        }
        map.serialize_entry(SOURCE_COLUMN, &self.source_file)?;
        map.end()
    }
}

/// Base file name of a document path, without any directory component.
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record() -> ExtractionRecord {
        ExtractionRecord::new(
            "agent_1.pdf",
            vec![
                FieldValue {
                    name: "Pin Code".to_string(),
                    column: "Pin Code".to_string(),
                    value: "400001".to_string(),
                    source: FieldSource::Pattern,
                },
                FieldValue {
                    name: "Office Number".to_string(),
                    column: "Contact Details".to_string(),
                    value: String::new(),
                    source: FieldSource::Missing,
                },
            ],
        )
    }

    #[test]
    fn test_headers_and_row() {
        let record = record();
        assert_eq!(record.headers(), vec!["Pin Code", "Contact Details", "Source File"]);
        assert_eq!(record.row(), vec!["400001", "", "agent_1.pdf"]);
        assert_eq!(record.filled_count(), 1);
    }

    #[test]
    fn test_lookup_by_field_name() {
        let record = record();
        assert_eq!(record.get("Office Number"), Some(""));
        assert_eq!(record.get("Contact Details"), None);
        assert_eq!(record.source_of("Pin Code"), Some(FieldSource::Pattern));
    }

    #[test]
    fn test_serialize_keeps_column_order() {
        let json = serde_json::to_string(&record()).unwrap();
        assert_eq!(
            json,
            r#"{"Pin Code":"400001","Contact Details":"","Source File":"agent_1.pdf"}"#
        );
    }

    #[test]
    fn test_source_name_strips_directories() {
        assert_eq!(source_name(Path::new("/tmp/pdfs/agent_7.pdf")), "agent_7.pdf");
        assert_eq!(source_name(Path::new("agent_7.pdf")), "agent_7.pdf");
    }
}

//! Two-pass certificate parser.

use std::time::Instant;

use tracing::{debug, trace, warn};

use super::lines::LineHeuristicExtractor;
use super::patterns::PatternExtractor;
use super::reconcile::{build_record, empty_record};
use super::{FieldExtractor, FieldSet, FieldSetVersion};
use crate::models::record::ExtractionRecord;
use crate::pdf::DocumentText;

/// Characters of raw text dumped at trace level.
const TEXT_PREVIEW_CHARS: usize = 2000;

/// Runs the pattern pass, the line pass and reconciliation for one document.
#[derive(Debug, Clone, Copy)]
pub struct CertificateParser<'a> {
    field_set: &'a FieldSet,
}

impl<'a> CertificateParser<'a> {
    pub fn new(field_set: &'a FieldSet) -> Self {
        Self { field_set }
    }

    pub fn field_set(&self) -> &'a FieldSet {
        self.field_set
    }

    /// Extract a record from document text.
    ///
    /// Never fails: empty text yields a record with every field empty.
    pub fn parse(&self, text: &DocumentText, source_file: &str) -> ExtractionRecord {
        if text.is_empty() {
            warn!("{}: no text to extract fields from", source_file);
            return empty_record(self.field_set, source_file);
        }

        let start = Instant::now();
        trace!(
            "{}: text preview:\n{}",
            source_file,
            text.text().chars().take(TEXT_PREVIEW_CHARS).collect::<String>()
        );

        let patterns = PatternExtractor::new(self.field_set).extract(text);
        let heuristics = LineHeuristicExtractor::new(self.field_set).extract(text);
        let record = build_record(self.field_set, source_file, &patterns, &heuristics);

        debug!(
            "{}: {}/{} fields filled in {}us",
            source_file,
            record.filled_count(),
            record.fields().len(),
            start.elapsed().as_micros()
        );

        record
    }

    /// Convenience for already extracted text.
    pub fn parse_str(&self, text: &str, source_file: &str) -> ExtractionRecord {
        self.parse(&DocumentText::from_text(text), source_file)
    }
}

impl CertificateParser<'static> {
    /// Parser over a built-in field set.
    pub fn builtin(version: FieldSetVersion) -> Self {
        Self::new(FieldSet::builtin(version))
    }
}

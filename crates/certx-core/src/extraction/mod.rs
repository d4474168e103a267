//! Certificate field extraction.
//!
//! Two passes run over every document: ordered regex patterns over the full
//! text ([`patterns`]) and label/lookahead rules over its lines ([`lines`]).
//! [`reconcile`] prefers pattern values and backfills from the line pass.

mod fields;
pub mod lines;
mod parser;
pub mod patterns;
pub mod reconcile;
mod sets;

use std::collections::HashMap;

pub use fields::{FieldDefinition, FieldSet, FieldSetSpec, FieldSetVersion, FieldSpec, MatchMode};
pub use lines::{Accept, Capture, LabelMatch, LineHeuristicExtractor, LineRule};
pub use parser::CertificateParser;
pub use patterns::{normalize_value, PatternExtractor};

use crate::pdf::DocumentText;

/// Field name to extracted value.
pub type FieldMap = HashMap<String, String>;

/// One extraction pass over a document.
pub trait FieldExtractor {
    /// Extract field values from document text.
    fn extract(&self, text: &DocumentText) -> FieldMap;
}

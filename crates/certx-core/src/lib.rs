//! Core library for certificate PDF field extraction.
//!
//! This crate provides:
//! - Document text sources (PDF via lopdf/pdf-extract, plain text)
//! - Versioned field sets with ordered regex patterns and line rules
//! - A two-stage extraction pipeline (patterns, then line heuristics)
//! - Per-document and batch drivers that never abort on a bad document

pub mod batch;
pub mod error;
pub mod extraction;
pub mod models;
pub mod pdf;

pub use batch::{BatchResult, DocumentFailure, DocumentOutcome, DocumentProcessor, InputKind};
pub use error::{CertxError, Result};
pub use extraction::{CertificateParser, FieldSet, FieldSetVersion, MatchMode};
pub use models::record::{ExtractionRecord, FieldSource, FieldValue};
pub use pdf::{DocumentText, PdfExtractor, PlainTextSource, TextSource};

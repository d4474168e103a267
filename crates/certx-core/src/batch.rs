//! Per-document and batch drivers.
//!
//! A document either yields a record or is reported as unreadable; nothing a
//! single document does can abort the batch.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::CertxError;
use crate::extraction::reconcile::empty_record;
use crate::extraction::{CertificateParser, FieldSet, FieldSetVersion};
use crate::models::config::PdfConfig;
use crate::models::record::{source_name, ExtractionRecord};
use crate::pdf::read_document_text;

/// What the input path points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// A single document with an accepted extension.
    Document(PathBuf),
    /// A directory to scan for documents.
    Directory(PathBuf),
}

impl InputKind {
    /// Classify an input path.
    pub fn resolve(path: &Path, extensions: &[String]) -> crate::Result<Self> {
        if path.is_dir() {
            Ok(InputKind::Directory(path.to_path_buf()))
        } else if path.is_file() && has_extension(path, extensions) {
            Ok(InputKind::Document(path.to_path_buf()))
        } else {
            Err(CertxError::InvalidInput(path.to_path_buf()))
        }
    }

    /// Documents to process, in processing order.
    pub fn documents(&self, extensions: &[String]) -> crate::Result<Vec<PathBuf>> {
        match self {
            InputKind::Document(path) => Ok(vec![path.clone()]),
            InputKind::Directory(dir) => discover_documents(dir, extensions),
        }
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
}

/// Documents directly inside `dir` with an accepted extension
/// (case-insensitive), sorted by path.
pub fn discover_documents(dir: &Path, extensions: &[String]) -> crate::Result<Vec<PathBuf>> {
    let pattern = Path::new(&glob::Pattern::escape(&dir.to_string_lossy())).join("*");

    let mut documents: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
        .map_err(|e| CertxError::Config(format!("bad directory pattern: {}", e)))?
        .filter_map(|entry| entry.ok())
        .filter(|p| p.is_file() && has_extension(p, extensions))
        .collect();

    documents.sort();
    Ok(documents)
}

/// Outcome of processing one document.
#[derive(Debug, Clone)]
pub enum DocumentOutcome {
    /// Text was read and fields extracted (possibly all empty).
    Extracted(ExtractionRecord),
    /// No text could be read; the record has every field empty.
    Unreadable {
        record: ExtractionRecord,
        reason: String,
    },
}

impl DocumentOutcome {
    pub fn record(&self) -> &ExtractionRecord {
        match self {
            DocumentOutcome::Extracted(record) => record,
            DocumentOutcome::Unreadable { record, .. } => record,
        }
    }

    pub fn is_extracted(&self) -> bool {
        matches!(self, DocumentOutcome::Extracted(_))
    }
}

/// Reads one document and runs the parser over it.
#[derive(Debug, Clone)]
pub struct DocumentProcessor {
    parser: CertificateParser<'static>,
    pdf: PdfConfig,
}

impl DocumentProcessor {
    /// Processor over a built-in field set.
    pub fn new(version: FieldSetVersion, pdf: PdfConfig) -> Self {
        Self::with_field_set(FieldSet::builtin(version), pdf)
    }

    pub fn with_field_set(field_set: &'static FieldSet, pdf: PdfConfig) -> Self {
        Self {
            parser: CertificateParser::new(field_set),
            pdf,
        }
    }

    pub fn field_set(&self) -> &'static FieldSet {
        self.parser.field_set()
    }

    /// Process one document. Read failures are logged and returned as
    /// [`DocumentOutcome::Unreadable`], never as errors.
    pub fn process(&self, path: &Path) -> DocumentOutcome {
        let source = source_name(path);
        info!("Processing: {}", path.display());

        match read_document_text(path, &self.pdf) {
            Ok(text) => DocumentOutcome::Extracted(self.parser.parse(&text, &source)),
            Err(e) => {
                warn!("Failed to extract text from {}: {}", path.display(), e);
                DocumentOutcome::Unreadable {
                    record: empty_record(self.field_set(), &source),
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// A document that could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Records of one run, in document processing order.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub records: Vec<ExtractionRecord>,
    pub failures: Vec<DocumentFailure>,
    /// Documents seen, readable or not.
    pub processed: usize,
}

impl BatchResult {
    /// Add one document's outcome. Unreadable documents are listed as
    /// failures and, when `keep_unreadable` is set, also kept as empty records.
    pub fn push(&mut self, path: &Path, outcome: DocumentOutcome, keep_unreadable: bool) {
        self.processed += 1;
        match outcome {
            DocumentOutcome::Extracted(record) => self.records.push(record),
            DocumentOutcome::Unreadable { record, reason } => {
                self.failures.push(DocumentFailure {
                    path: path.to_path_buf(),
                    reason,
                });
                if keep_unreadable {
                    self.records.push(record);
                }
            }
        }
    }

    /// Number of documents whose text was read.
    pub fn extracted_count(&self) -> usize {
        self.processed - self.failures.len()
    }
}

/// Process documents one after another, in the order given.
pub fn run_batch(processor: &DocumentProcessor, paths: &[PathBuf], keep_unreadable: bool) -> BatchResult {
    let mut result = BatchResult::default();
    for path in paths {
        result.push(path, processor.process(path), keep_unreadable);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn extensions() -> Vec<String> {
        vec!["pdf".to_string(), "txt".to_string()]
    }

    #[test]
    fn test_discover_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "a.PDF", "notes.md", "c.pdf"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let found: Vec<String> = discover_documents(dir.path(), &extensions())
            .unwrap()
            .iter()
            .map(|p| source_name(p))
            .collect();
        assert_eq!(found, vec!["a.PDF", "b.txt", "c.pdf"]);
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_documents(dir.path(), &extensions()).unwrap().is_empty());
    }

    #[test]
    fn test_resolve_input() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("agent_1.txt");
        let other = dir.path().join("agent_1.csv");
        fs::write(&doc, "x").unwrap();
        fs::write(&other, "x").unwrap();

        assert_eq!(
            InputKind::resolve(dir.path(), &extensions()).unwrap(),
            InputKind::Directory(dir.path().to_path_buf())
        );
        assert_eq!(
            InputKind::resolve(&doc, &extensions()).unwrap(),
            InputKind::Document(doc.clone())
        );
        assert!(matches!(
            InputKind::resolve(&other, &extensions()),
            Err(CertxError::InvalidInput(_))
        ));
        assert!(matches!(
            InputKind::resolve(&dir.path().join("missing.pdf"), &extensions()),
            Err(CertxError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unreadable_document_does_not_abort_batch() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("a.txt");
        let blank = dir.path().join("b.txt");
        let broken = dir.path().join("c.pdf");
        fs::write(&good, "Pin Code\n400001\n").unwrap();
        fs::write(&blank, "  \n\n").unwrap();
        fs::write(&broken, "not a pdf").unwrap();

        let processor = DocumentProcessor::new(FieldSetVersion::V1, PdfConfig::default());
        let paths = vec![good, blank, broken.clone()];

        let result = run_batch(&processor, &paths, false);
        assert_eq!(result.processed, 3);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].get("Pin Code"), Some("400001"));
        assert_eq!(result.failures.len(), 2);
        assert_eq!(result.failures[1].path, broken);
        assert_eq!(result.extracted_count(), 1);

        let kept = run_batch(&processor, &paths, true);
        assert_eq!(kept.records.len(), 3);
        assert!(kept.records[1].is_blank());
        assert_eq!(kept.records[1].source_file(), "b.txt");
    }

    #[test]
    fn test_unreadable_outcome_has_all_fields() {
        let dir = tempfile::tempdir().unwrap();
        let blank = dir.path().join("scan.txt");
        fs::write(&blank, "").unwrap();

        let processor = DocumentProcessor::new(FieldSetVersion::V2, PdfConfig::default());
        let outcome = processor.process(&blank);

        assert!(!outcome.is_extracted());
        assert_eq!(outcome.record().fields().len(), processor.field_set().fields().len());
        assert!(outcome.record().is_blank());
    }
}

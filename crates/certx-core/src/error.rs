//! Error types for the certx-core library.

use thiserror::Error;

/// Main error type for the certx library.
#[derive(Error, Debug)]
pub enum CertxError {
    /// PDF or text source error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Field set or extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input path is neither a supported document nor a directory.
    #[error("not a supported document or a directory: {0}")]
    InvalidInput(std::path::PathBuf),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to reading document text.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The document extension has no text source.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The document produced no usable text.
    #[error("no text extracted ({0} characters)")]
    EmptyText(usize),
}

/// Errors related to field set compilation.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A field pattern failed to compile.
    #[error("invalid pattern for {field}: {reason}")]
    InvalidPattern { field: String, reason: String },

    /// A field pattern does not have exactly one capture group.
    #[error("pattern for {field} must have exactly one capture group, found {found}")]
    CaptureGroups { field: String, found: usize },

    /// A heuristic rule refers to a field that is not in the set.
    #[error("line rule refers to unknown field: {0}")]
    UnknownField(String),

    /// No field set with this name.
    #[error("unknown field set: {0}")]
    UnknownFieldSet(String),
}

/// Result type for the certx library.
pub type Result<T> = std::result::Result<T, CertxError>;

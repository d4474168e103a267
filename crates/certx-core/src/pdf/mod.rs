//! Document text sources.

mod extractor;
mod text;

pub use extractor::PdfExtractor;
pub use text::PlainTextSource;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// Result type for text source operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for anything that can turn a document into plain text.
pub trait TextSource {
    /// Load a document from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the document.
    fn page_count(&self) -> u32;

    /// Extract text from the entire document, pages in reading order.
    fn extract_text(&self) -> Result<String>;
}

/// Plain text of one document as an ordered sequence of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentText {
    lines: Vec<String>,
    text: String,
}

impl DocumentText {
    /// Split raw text into lines.
    pub fn from_text(raw: &str) -> Self {
        Self::from_lines(raw.lines())
    }

    /// Build from an already split line sequence.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        let text = lines.join("\n");
        Self { lines, text }
    }

    /// Drop lines that contain only whitespace.
    pub fn without_blank_lines(self) -> Self {
        Self::from_lines(self.lines.into_iter().filter(|l| !l.trim().is_empty()))
    }

    /// Full text, lines joined with `\n`.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of non-whitespace characters.
    pub fn char_count(&self) -> usize {
        self.text.chars().filter(|c| !c.is_whitespace()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.char_count() == 0
    }
}

/// Read a document from disk and return its text.
///
/// The text source is picked by extension: `pdf` goes through [`PdfExtractor`],
/// `txt` through [`PlainTextSource`]. Documents with fewer than
/// `config.min_text_length` non-whitespace characters are rejected with
/// [`PdfError::EmptyText`].
pub fn read_document_text(path: &Path, config: &PdfConfig) -> crate::Result<DocumentText> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut source: Box<dyn TextSource> = match extension.as_str() {
        "pdf" => Box::new(PdfExtractor::new()),
        "txt" => Box::new(PlainTextSource::new()),
        _ => return Err(PdfError::UnsupportedFormat(extension).into()),
    };

    let data = fs::read(path)?;
    source.load(&data)?;
    let raw = source.extract_text()?;

    let mut text = DocumentText::from_text(&raw);
    if config.skip_blank_lines {
        text = text.without_blank_lines();
    }

    let chars = text.char_count();
    debug!(
        "Read {} lines ({} chars) from {} page(s) of {}",
        text.lines().len(),
        chars,
        source.page_count(),
        path.display()
    );

    if chars == 0 || chars < config.min_text_length {
        return Err(PdfError::EmptyText(chars).into());
    }

    Ok(text)
}

//! Plain text documents (text already extracted by another tool).

use super::{Result, TextSource};

/// Text source for `.txt` documents. Form feeds are treated as page breaks.
#[derive(Debug, Default)]
pub struct PlainTextSource {
    content: String,
}

impl PlainTextSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextSource for PlainTextSource {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let content = String::from_utf8_lossy(data);
        self.content = content.strip_prefix('\u{feff}').unwrap_or(&content).to_string();
        Ok(())
    }

    fn page_count(&self) -> u32 {
        if self.content.is_empty() {
            0
        } else {
            self.content.split('\u{c}').count() as u32
        }
    }

    fn extract_text(&self) -> Result<String> {
        Ok(self.content.replace('\u{c}', "\n"))
    }
}

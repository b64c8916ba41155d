//! Page-by-page text extraction for financial PDFs
//!
//! The extractor is a total function over paths: every outcome, including
//! backend errors and backend panics, comes back as an [`Extraction`].

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::ExtractError;

/// Message returned when a document opens but yields no usable text
pub const NO_TEXT_WARNING: &str = "Warning: No readable text found in the PDF.";

/// Outcome of extracting text from a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Nothing exists at the requested path
    NotFound { path: PathBuf },
    /// The document could not be opened or read
    ParseFailure { message: String },
    /// The document opened but no page produced text
    EmptyContent,
    /// Cleaned report with page markers
    Success {
        text: String,
        /// Number of pages that contributed a marker
        pages: usize,
    },
}

impl Extraction {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Short machine-readable label for the outcome
    pub fn status(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::ParseFailure { .. } => "parse_failure",
            Self::EmptyContent => "empty_content",
            Self::Success { .. } => "success",
        }
    }
}

impl fmt::Display for Extraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "Error: File not found at {}", path.display()),
            Self::ParseFailure { message } => write!(f, "Error reading PDF: {}", message),
            Self::EmptyContent => f.write_str(NO_TEXT_WARNING),
            Self::Success { text, .. } => f.write_str(text),
        }
    }
}

/// Source of per-page text for a document on disk.
///
/// Each entry of the returned vector is one page in document order; `None`
/// or an empty string means the page had no extractable text.
pub trait PageSource: Send + Sync {
    /// Backend name, for logging
    fn name(&self) -> &str;

    /// Open the document at `path` and return the raw text of every page
    fn load_pages(&self, path: &Path) -> Result<Vec<Option<String>>, ExtractError>;
}

/// [`PageSource`] backed by the `pdf-extract` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractSource;

impl PageSource for PdfExtractSource {
    fn name(&self) -> &str {
        "pdf-extract"
    }

    fn load_pages(&self, path: &Path) -> Result<Vec<Option<String>>, ExtractError> {
        let data = std::fs::read(path)?;
        let pages = pdf_extract::extract_text_from_mem_by_pages(&data)
            .map_err(|e| ExtractError::Backend(e.to_string()))?;
        Ok(pages.into_iter().map(Some).collect())
    }
}

/// Turns a document path into a cleaned, page-marked report
#[derive(Clone)]
pub struct DocumentTextExtractor {
    source: Arc<dyn PageSource>,
}

impl Default for DocumentTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTextExtractor {
    /// Extractor using the bundled PDF backend
    pub fn new() -> Self {
        Self::with_source(Arc::new(PdfExtractSource))
    }

    pub fn with_source(source: Arc<dyn PageSource>) -> Self {
        Self { source }
    }

    /// Extract the text of the document at `path`.
    ///
    /// Never panics and never returns an error; see [`Extraction`].
    pub fn extract(&self, path: impl AsRef<Path>) -> Extraction {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "document not found");
            return Extraction::NotFound {
                path: path.to_path_buf(),
            };
        }

        match self.load_guarded(path) {
            Ok(pages) => {
                let extraction = build_report(pages);
                tracing::debug!(
                    path = %path.display(),
                    backend = self.source.name(),
                    status = extraction.status(),
                    "document extracted"
                );
                extraction
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    backend = self.source.name(),
                    error = %e,
                    "failed to read PDF"
                );
                Extraction::ParseFailure {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Convenience wrapper returning the legacy string form
    pub fn extract_text(&self, path: impl AsRef<Path>) -> String {
        self.extract(path).to_string()
    }

    // PDF backends may panic on malformed input; the unwind stops here.
    fn load_guarded(&self, path: &Path) -> Result<Vec<Option<String>>, ExtractError> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.source.load_pages(path))) {
            Ok(result) => result,
            Err(payload) => Err(ExtractError::Panicked(panic_message(payload.as_ref()))),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "PDF backend panicked on malformed document".to_string()
    }
}

/// Assemble the report from raw page texts.
///
/// Pages are numbered from 1. A page contributes a marker whenever its raw
/// text is non-empty, even if it trims down to nothing.
pub fn build_report<I>(pages: I) -> Extraction
where
    I: IntoIterator<Item = Option<String>>,
{
    let mut report = String::new();
    let mut marked = 0;

    for (index, content) in pages.into_iter().enumerate() {
        let Some(content) = content.filter(|c| !c.is_empty()) else {
            continue;
        };

        let cleaned = collapse_newlines(&content);
        report.push_str(&format!("\n--- Page {} ---\n", index + 1));
        report.push_str(cleaned.trim());
        report.push('\n');
        marked += 1;
    }

    if report.trim().is_empty() {
        return Extraction::EmptyContent;
    }

    Extraction::Success {
        text: report,
        pages: marked,
    }
}

/// Collapse every run of consecutive `\n` characters into a single `\n`.
///
/// Only line feeds are affected; `\r`, tabs and spaces are left alone.
pub fn collapse_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_newline = false;

    for ch in text.chars() {
        if ch == '\n' {
            if prev_newline {
                continue;
            }
            prev_newline = true;
        } else {
            prev_newline = false;
        }
        out.push(ch);
    }

    out
}

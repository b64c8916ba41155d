//! Document text extraction tests
//!
//! Backend behaviour is scripted through `PageSource` so report assembly can
//! be checked without real PDF fixtures; the bundled pdf-extract backend is
//! exercised against missing and corrupted files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use finsight_core::error::ExtractError;
use finsight_core::tools::document::{
    DocumentTextExtractor, Extraction, PageSource, NO_TEXT_WARNING,
};
use tempfile::TempDir;

/// Create a temporary test directory
fn setup_test_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Write a placeholder file so the existence check passes
fn touch(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

enum Script {
    Pages(Vec<Option<&'static str>>),
    Fail(&'static str),
    Panic(&'static str),
}

struct ScriptedSource(Script);

impl PageSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    fn load_pages(&self, _path: &Path) -> Result<Vec<Option<String>>, ExtractError> {
        match &self.0 {
            Script::Pages(pages) => Ok(pages.iter().map(|p| p.map(str::to_string)).collect()),
            Script::Fail(message) => Err(ExtractError::Backend(message.to_string())),
            Script::Panic(message) => panic!("{}", message),
        }
    }
}

fn scripted(script: Script) -> DocumentTextExtractor {
    DocumentTextExtractor::with_source(Arc::new(ScriptedSource(script)))
}

mod report_tests {
    use super::*;

    #[test]
    fn test_collapses_newlines_under_page_marker() {
        let dir = setup_test_dir();
        let path = touch(&dir, "annual.pdf", b"");
        let extractor = scripted(Script::Pages(vec![Some("Revenue\n\n\nGrowth")]));

        let report = extractor.extract_text(&path);
        assert!(report.contains("--- Page 1 ---\nRevenue\nGrowth\n"));
        assert_eq!(report, "\n--- Page 1 ---\nRevenue\nGrowth\n");
    }

    #[test]
    fn test_empty_middle_page_has_no_marker() {
        let dir = setup_test_dir();
        let path = touch(&dir, "q3.pdf", b"");
        let extractor = scripted(Script::Pages(vec![
            Some("Balance sheet"),
            None,
            Some("Cash flow statement"),
        ]));

        let report = extractor.extract_text(&path);
        let first = report.find("--- Page 1 ---").expect("page 1 marker");
        let third = report.find("--- Page 3 ---").expect("page 3 marker");
        assert!(first < third);
        assert!(!report.contains("--- Page 2 ---"));
    }

    #[test]
    fn test_all_pages_empty_is_warning() {
        let dir = setup_test_dir();
        let path = touch(&dir, "scan.pdf", b"");
        let extractor = scripted(Script::Pages(vec![None, Some(""), None]));

        assert_eq!(extractor.extract(&path), Extraction::EmptyContent);
        assert_eq!(extractor.extract_text(&path), NO_TEXT_WARNING);
    }

    #[test]
    fn test_success_counts_marked_pages() {
        let dir = setup_test_dir();
        let path = touch(&dir, "10k.pdf", b"");
        let extractor = scripted(Script::Pages(vec![Some("a"), None, Some("b"), Some("c")]));

        match extractor.extract(&path) {
            Extraction::Success { pages, .. } => assert_eq!(pages, 3),
            other => panic!("unexpected extraction: {:?}", other),
        }
    }

    #[test]
    fn test_backend_error_becomes_parse_failure() {
        let dir = setup_test_dir();
        let path = touch(&dir, "bad.pdf", b"");
        let extractor = scripted(Script::Fail("invalid file trailer"));

        assert_eq!(
            extractor.extract_text(&path),
            "Error reading PDF: invalid file trailer"
        );
    }

    #[test]
    fn test_backend_panic_becomes_parse_failure() {
        let dir = setup_test_dir();
        let path = touch(&dir, "explodes.pdf", b"");
        let extractor = scripted(Script::Panic("unexpected end of stream"));

        assert_eq!(
            extractor.extract(&path),
            Extraction::ParseFailure {
                message: "unexpected end of stream".to_string()
            }
        );
    }

    #[test]
    fn test_repeated_extraction_is_identical() {
        let dir = setup_test_dir();
        let path = touch(&dir, "stable.pdf", b"");
        let extractor = scripted(Script::Pages(vec![Some("EBITDA\n\n 12.4m "), Some("Notes")]));

        assert_eq!(extractor.extract_text(&path), extractor.extract_text(&path));
    }
}

mod pdf_backend_tests {
    use super::*;

    #[test]
    fn test_missing_file_reports_literal_path() {
        let extractor = DocumentTextExtractor::new();
        let result = extractor.extract_text("data/does-not-exist.pdf");
        assert_eq!(result, "Error: File not found at data/does-not-exist.pdf");
    }

    #[test]
    fn test_missing_file_absolute_path() {
        let dir = setup_test_dir();
        let path = dir.path().join("gone.pdf");
        let extractor = DocumentTextExtractor::new();

        assert_eq!(
            extractor.extract(&path),
            Extraction::NotFound { path: path.clone() }
        );
        assert_eq!(
            extractor.extract_text(&path),
            format!("Error: File not found at {}", path.display())
        );
    }

    #[test]
    fn test_corrupted_header_is_parse_failure() {
        let dir = setup_test_dir();
        let path = touch(&dir, "fake.pdf", b"not a real pdf");
        let extractor = DocumentTextExtractor::new();

        let result = extractor.extract_text(&path);
        assert!(result.starts_with("Error reading PDF: "), "got: {}", result);
        assert_eq!(result, extractor.extract_text(&path));
    }

    #[test]
    fn test_directory_is_not_a_pdf() {
        let dir = setup_test_dir();
        let extractor = DocumentTextExtractor::new();

        let result = extractor.extract_text(dir.path());
        assert!(result.starts_with("Error reading PDF: "), "got: {}", result);
    }
}

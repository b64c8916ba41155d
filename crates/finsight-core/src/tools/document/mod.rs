//! Document processing tools

mod extractor;
mod read_document;

pub use extractor::{
    build_report, collapse_newlines, DocumentTextExtractor, Extraction, PageSource,
    PdfExtractSource, NO_TEXT_WARNING,
};
pub use read_document::{ReadFinancialDocument, READ_DOCUMENT_TOOL_NAME};

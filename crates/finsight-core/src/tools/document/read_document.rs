//! Financial document reading tool

use serde_json::{json, Value};
use std::path::PathBuf;

use crate::error::ToolError;
use crate::tools::{BoxFuture, Tool, ToolOutput};

use super::extractor::{DocumentTextExtractor, Extraction};

pub const READ_DOCUMENT_TOOL_NAME: &str = "read_financial_document";

/// Tool that hands the cleaned text of a financial PDF to the agent.
///
/// Extraction outcomes are always returned as text in `Ok(ToolOutput)` so
/// the agent can reason about a missing or unreadable file like any other
/// observation. Only malformed parameters produce a `ToolError`.
#[derive(Clone, Default)]
pub struct ReadFinancialDocument {
    extractor: DocumentTextExtractor,
}

impl ReadFinancialDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extractor(extractor: DocumentTextExtractor) -> Self {
        Self { extractor }
    }

    /// Human-readable title shown alongside the tool name
    pub fn title(&self) -> &str {
        "Read financial document"
    }
}

impl Tool for ReadFinancialDocument {
    fn name(&self) -> &str {
        READ_DOCUMENT_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Reads a financial PDF document and returns cleaned text content, one \
         '--- Page N ---' section per page that contains text."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path to the uploaded PDF file"
                }
            },
            "required": ["path"]
        })
    }

    fn execute(&self, params: Value) -> BoxFuture<'_, Result<ToolOutput, ToolError>> {
        Box::pin(async move {
            let path = params["path"]
                .as_str()
                .ok_or_else(|| ToolError::InvalidParams("path is required".into()))?;
            let path = PathBuf::from(path);

            let extractor = self.extractor.clone();
            let extraction = tokio::task::spawn_blocking(move || extractor.extract(path))
                .await
                .map_err(|e| ToolError::ExecutionFailed(format!("Extraction task failed: {}", e)))?;

            Ok(to_output(extraction))
        })
    }
}

fn to_output(extraction: Extraction) -> ToolOutput {
    let status = extraction.status();
    match extraction {
        Extraction::Success { text, pages } => ToolOutput::success(text)
            .with_metadata("status", status)
            .with_metadata("pages", pages),
        other => ToolOutput::failure_text(other.to_string()).with_metadata("status", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_output_success() {
        let output = to_output(Extraction::Success {
            text: "\n--- Page 1 ---\nRevenue\n".to_string(),
            pages: 1,
        });
        assert!(output.success);
        assert_eq!(output.text(), "\n--- Page 1 ---\nRevenue\n");
        assert_eq!(output.metadata["status"], json!("success"));
        assert_eq!(output.metadata["pages"], json!(1));
    }

    #[test]
    fn test_to_output_empty_content() {
        let output = to_output(Extraction::EmptyContent);
        assert!(!output.success);
        assert_eq!(output.text(), "Warning: No readable text found in the PDF.");
        assert_eq!(output.metadata["status"], json!("empty_content"));
        assert!(!output.metadata.contains_key("pages"));
    }

    #[tokio::test]
    async fn test_missing_path_param() {
        let tool = ReadFinancialDocument::new();
        let result = tool.execute(json!({ "file": "q3.pdf" })).await;
        assert!(matches!(result, Err(ToolError::InvalidParams(_))));
    }
}

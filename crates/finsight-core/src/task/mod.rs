//! Task definitions
//!
//! A task is the fixed instruction handed to the analyst agent together with
//! the shape its answer must take. Templates use `{file_path}` and `{query}`
//! placeholders that are filled from [`TaskInputs`] at run time.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::agent::Agent;
use crate::error::Result;
use crate::tools::document::READ_DOCUMENT_TOOL_NAME;
use crate::tools::ToolOutput;

/// Unique step identifier
pub type StepId = String;

/// Values substituted into task and agent templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskInputs {
    pub file_path: String,
    pub query: String,
}

impl TaskInputs {
    pub fn new(file_path: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            query: query.into(),
        }
    }

    /// Placeholder bindings for [`interpolate`]
    pub fn vars(&self) -> [(&str, &str); 2] {
        [("file_path", self.file_path.as_str()), ("query", self.query.as_str())]
    }
}

/// Replace every `{name}` whose name is bound in `vars`.
///
/// Unbound placeholders and stray braces are copied through unchanged.
pub fn interpolate(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let bound = after.find('}').and_then(|end| {
            let name = &after[..end];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (end, *value))
        });

        match bound {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

const ANALYSIS_DESCRIPTION: &str = r#"Analyze the financial document located at: {file_path}.
Address the user query: {query}.

Your analysis must include:

1. Document Overview:
   - Type of document
   - Reporting period
   - Key entities involved

2. Financial Performance:
   - Revenue trends
   - Profitability
   - Cash flow observations
   - Growth patterns

3. Financial Health:
   - Liquidity position
   - Debt levels
   - Operational efficiency

4. Key Findings:
   - Significant changes
   - Notable trends
   - Financial anomalies (if any)

5. Risk Factors:
   - Operational risks
   - Financial risks
   - Market risks mentioned in the document

Important Rules:
- Use only information from the uploaded document.
- Do NOT fabricate data.
- Do NOT invent external sources.
- Base conclusions strictly on document evidence."#;

const ANALYSIS_EXPECTED_OUTPUT: &str = r#"Provide a structured financial analysis report containing:

- Executive Summary
- Key Financial Metrics
- Performance Analysis
- Financial Health Assessment
- Risk Evaluation
- Conclusion"#;

/// A task template bound to an agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisTask {
    pub description: String,
    pub expected_output: String,
    /// Id of the agent that owns this task
    pub agent_id: String,
    /// Tools the agent may use while working on the task
    pub tools: Vec<String>,
    pub async_execution: bool,
}

impl AnalysisTask {
    /// The single deterministic financial document analysis task
    pub fn financial_document_analysis() -> Self {
        Self {
            description: ANALYSIS_DESCRIPTION.to_string(),
            expected_output: ANALYSIS_EXPECTED_OUTPUT.to_string(),
            agent_id: crate::agent::FINANCIAL_ANALYST_ID.to_string(),
            tools: vec![READ_DOCUMENT_TOOL_NAME.to_string()],
            async_execution: false,
        }
    }

    pub fn render(&self, inputs: &TaskInputs) -> RenderedTask {
        let vars = inputs.vars();
        RenderedTask {
            description: interpolate(&self.description, &vars),
            expected_output: interpolate(&self.expected_output, &vars),
        }
    }

    /// Step that loads the uploaded document through the read tool
    pub fn read_step(&self, inputs: &TaskInputs) -> TaskStep {
        TaskStep::new(READ_DOCUMENT_TOOL_NAME, json!({ "path": inputs.file_path }))
    }

    /// Read the document via `agent` and assemble the full model context.
    ///
    /// Extraction problems end up as text in the document section rather
    /// than as an `Err`; errors here mean the agent could not run the step.
    pub async fn prepare(&self, agent: &dyn Agent, inputs: &TaskInputs) -> Result<PreparedAnalysis> {
        if agent.id() != self.agent_id {
            return Err(crate::error::Error::Task(format!(
                "Task is assigned to '{}', not '{}'",
                self.agent_id,
                agent.id()
            )));
        }

        let step = self.read_step(inputs);
        tracing::info!(step_id = %step.id, path = %inputs.file_path, "reading financial document");
        let result = agent.execute(&step).await?;

        Ok(PreparedAnalysis {
            agent_id: agent.id().to_string(),
            system_prompt: agent.system_prompt_for(inputs),
            task: self.render(inputs),
            document: result.output,
        })
    }
}

/// Task text with all placeholders filled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedTask {
    pub description: String,
    pub expected_output: String,
}

/// A single tool invocation requested of an agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStep {
    pub id: StepId,
    pub tool_name: String,
    pub parameters: Value,
}

impl TaskStep {
    pub fn new(tool_name: impl Into<String>, parameters: Value) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            tool_name: tool_name.into(),
            parameters,
        }
    }
}

/// Result of a task step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub step_id: StepId,
    pub output: ToolOutput,
}

/// Everything a model needs to produce the analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreparedAnalysis {
    pub agent_id: String,
    pub system_prompt: String,
    pub task: RenderedTask,
    pub document: ToolOutput,
}

impl PreparedAnalysis {
    /// Single user message combining task, document text and output shape
    pub fn user_message(&self) -> String {
        format!(
            "{}\n\n## Document Content\n{}\n\n## Expected Output\n{}",
            self.task.description,
            self.document.text(),
            self.task.expected_output
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_known_vars() {
        let vars = [("file_path", "data/q3.pdf"), ("query", "Is debt rising?")];
        assert_eq!(
            interpolate("Read {file_path} and answer: {query}", &vars),
            "Read data/q3.pdf and answer: Is debt rising?"
        );
    }

    #[test]
    fn test_interpolate_leaves_unknown_and_stray_braces() {
        let vars = [("query", "x")];
        assert_eq!(interpolate("{other} {query}", &vars), "{other} x");
        assert_eq!(interpolate("open { only", &vars), "open { only");
        assert_eq!(interpolate("}{query}{", &vars), "}x{");
        assert_eq!(interpolate("{{query}}", &vars), "{x}");
    }

    #[test]
    fn test_render_fills_description() {
        let task = AnalysisTask::financial_document_analysis();
        let rendered = task.render(&TaskInputs::new("reports/tsla-q2.pdf", "Summarize cash flow"));

        assert!(rendered
            .description
            .starts_with("Analyze the financial document located at: reports/tsla-q2.pdf."));
        assert!(rendered.description.contains("Address the user query: Summarize cash flow."));
        assert!(!rendered.description.contains("{query}"));
        assert!(rendered.expected_output.contains("- Executive Summary"));
        assert!(rendered.expected_output.ends_with("- Conclusion"));
    }

    #[test]
    fn test_read_step_targets_read_tool() {
        let task = AnalysisTask::financial_document_analysis();
        let step = task.read_step(&TaskInputs::new("a.pdf", "q"));
        assert_eq!(step.tool_name, READ_DOCUMENT_TOOL_NAME);
        assert_eq!(step.parameters, json!({ "path": "a.pdf" }));
        assert!(!step.id.is_empty());
        assert!(!task.async_execution);
    }

    #[test]
    fn test_user_message_layout() {
        let prepared = PreparedAnalysis {
            agent_id: "financial_analyst".to_string(),
            system_prompt: String::new(),
            task: RenderedTask {
                description: "Describe".to_string(),
                expected_output: "Shape".to_string(),
            },
            document: ToolOutput::success("\n--- Page 1 ---\nRevenue\n"),
        };
        assert_eq!(
            prepared.user_message(),
            "Describe\n\n## Document Content\n\n--- Page 1 ---\nRevenue\n\n\n## Expected Output\nShape"
        );
    }
}

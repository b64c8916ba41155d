//! Financial Analyst - reads uploaded reports and answers user queries

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{AgentConfig, ProviderConfig};
use crate::tools::document::{DocumentTextExtractor, ReadFinancialDocument};
use crate::tools::Tool;

use super::Agent;

pub const FINANCIAL_ANALYST_ID: &str = "financial_analyst";

const ROLE: &str = "Senior Financial Analyst";

const GOAL: &str = "Analyze the uploaded financial document and provide structured, \
evidence-based insights addressing the user query: {query}.";

const BACKSTORY: &str = "You are a professional financial analyst specializing in corporate \
financial reports. You extract key financial metrics, evaluate performance, assess financial \
health, and provide balanced investment insights strictly based on document content.";

/// Single analyst agent wired to the document reader
pub struct FinancialAnalyst {
    provider: ProviderConfig,
    settings: AgentConfig,
    tools: Vec<Arc<dyn Tool>>,
    system_prompt: String,
}

impl FinancialAnalyst {
    pub fn new(provider: ProviderConfig, settings: AgentConfig) -> Self {
        Self::with_extractor(provider, settings, DocumentTextExtractor::new())
    }

    /// Build the analyst around a specific extractor backend
    pub fn with_extractor(
        provider: ProviderConfig,
        settings: AgentConfig,
        extractor: DocumentTextExtractor,
    ) -> Self {
        let tools: Vec<Arc<dyn Tool>> =
            vec![Arc::new(ReadFinancialDocument::with_extractor(extractor))];

        Self {
            provider,
            settings,
            tools,
            system_prompt: format!("You are a {ROLE}.\n\nGoal: {GOAL}\n\n{BACKSTORY}"),
        }
    }

    pub fn role(&self) -> &str {
        ROLE
    }

    /// Goal template; `{query}` is filled per task
    pub fn goal(&self) -> &str {
        GOAL
    }

    pub fn backstory(&self) -> &str {
        BACKSTORY
    }

    /// Model configuration the runtime should use for this agent
    pub fn provider(&self) -> &ProviderConfig {
        &self.provider
    }

    pub fn settings(&self) -> &AgentConfig {
        &self.settings
    }
}

#[async_trait]
impl Agent for FinancialAnalyst {
    fn id(&self) -> &str {
        FINANCIAL_ANALYST_ID
    }

    fn name(&self) -> &str {
        "Financial Analyst"
    }

    fn description(&self) -> &str {
        "Analyzes uploaded financial documents and answers user queries with evidence-based insights."
    }

    fn tools(&self) -> Vec<Arc<dyn Tool>> {
        self.tools.clone()
    }

    fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}

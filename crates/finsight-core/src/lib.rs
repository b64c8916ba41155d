//! finsight Core - financial document analysis agent
//!
//! This crate provides:
//! - The PDF text extractor and the tool that exposes it to agents
//! - The financial analyst agent definition
//! - The analysis task template
//! - Configuration for model providers and agent limits

pub mod agent;
pub mod config;
pub mod error;
pub mod task;
pub mod tools;

pub use agent::{Agent, AgentInfo, AgentRegistry, FinancialAnalyst};
pub use config::{AgentConfig, Config, ConfigManager, GeneralConfig, ProviderConfig};
pub use error::{Error, ExtractError, Result, ToolError};
pub use task::{AnalysisTask, PreparedAnalysis, RenderedTask, TaskInputs, TaskStep};
pub use tools::document::{DocumentTextExtractor, Extraction, PageSource};
pub use tools::{Tool, ToolDefinition, ToolOutput, ToolRegistry};

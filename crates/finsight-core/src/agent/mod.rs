//! Agent system for finsight
//!
//! An agent is a persona (role, goal, backstory) bound to a model
//! configuration and a set of tools. Agents here do not talk to a model
//! themselves: they run tool steps and describe themselves through a system
//! prompt that an external runtime feeds to the LLM.

mod financial_analyst;

pub use financial_analyst::{FinancialAnalyst, FINANCIAL_ANALYST_ID};

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::task::{interpolate, StepResult, TaskInputs, TaskStep};
use crate::tools::Tool;

/// Core trait for all agents
#[async_trait]
pub trait Agent: Send + Sync {
    /// Unique identifier for this agent
    fn id(&self) -> &str;

    /// Human-readable name
    fn name(&self) -> &str;

    /// Description of agent's capabilities
    fn description(&self) -> &str;

    /// Tools this agent can use
    fn tools(&self) -> Vec<Arc<dyn Tool>>;

    /// System prompt template; may contain `{query}` / `{file_path}`
    fn system_prompt(&self) -> &str;

    /// System prompt with task inputs filled in
    fn system_prompt_for(&self, inputs: &TaskInputs) -> String {
        interpolate(self.system_prompt(), &inputs.vars())
    }

    /// Execute a task step by dispatching it to the named tool
    async fn execute(&self, step: &TaskStep) -> Result<StepResult> {
        let tool = self
            .tools()
            .into_iter()
            .find(|t| t.name() == step.tool_name)
            .ok_or_else(|| Error::Agent(format!("Tool not found: {}", step.tool_name)))?;

        tracing::debug!(agent = self.id(), tool = %step.tool_name, "executing step");
        let output = tool.execute(step.parameters.clone()).await?;

        Ok(StepResult {
            step_id: step.id.clone(),
            output,
        })
    }
}

/// Registry of available agents
pub struct AgentRegistry {
    agents: HashMap<String, Arc<dyn Agent>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self {
            agents: HashMap::new(),
        }
    }

    /// Register an agent
    pub fn register(&mut self, agent: Arc<dyn Agent>) {
        self.agents.insert(agent.id().to_string(), agent);
    }

    /// Get an agent by ID
    pub fn get(&self, id: &str) -> Option<Arc<dyn Agent>> {
        self.agents.get(id).cloned()
    }

    /// List all registered agents, sorted by id
    pub fn list(&self) -> Vec<AgentInfo> {
        let mut infos: Vec<_> = self
            .agents
            .values()
            .map(|a| AgentInfo {
                id: a.id().to_string(),
                name: a.name().to_string(),
                description: a.description().to_string(),
                tool_count: a.tools().len(),
            })
            .collect();
        infos.sort_by(|a, b| a.id.cmp(&b.id));
        infos
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Agent information for display
#[derive(Debug, Clone)]
pub struct AgentInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tool_count: usize,
}

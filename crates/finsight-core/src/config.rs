//! Configuration management for finsight
//!
//! Handles loading and saving the TOML configuration: LLM provider
//! credentials/model selection and the analyst agent's execution limits.
//! Nothing here is read implicitly; callers load a [`Config`] and pass the
//! pieces they need to the components that use them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default provider to use
    #[serde(default = "default_provider_name")]
    pub default_provider: String,
    /// Provider configurations keyed by name
    #[serde(default = "default_providers")]
    pub providers: HashMap<String, ProviderConfig>,
    /// Analyst agent settings
    #[serde(default)]
    pub agent: AgentConfig,
    /// General application settings
    #[serde(default)]
    pub general: GeneralConfig,
}

fn default_provider_name() -> String {
    "groq".to_string()
}

fn default_providers() -> HashMap<String, ProviderConfig> {
    let mut providers = HashMap::new();
    providers.insert("groq".to_string(), ProviderConfig::groq());
    providers.insert("openai".to_string(), ProviderConfig::openai());
    providers.insert("anthropic".to_string(), ProviderConfig::anthropic());
    providers
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_provider: default_provider_name(),
            providers: default_providers(),
            agent: AgentConfig::default(),
            general: GeneralConfig::default(),
        }
    }
}

impl Config {
    /// Get the provider config for the default provider
    pub fn get_default_provider(&self) -> Option<&ProviderConfig> {
        self.providers.get(&self.default_provider)
    }

    /// Get a specific provider config by name
    pub fn get_provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.get(name)
    }

    /// List all configured provider names, sorted
    pub fn list_providers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Resolve the provider to hand to the agent.
    ///
    /// `provider` overrides `default_provider`, `model` overrides the
    /// provider's configured model.
    pub fn resolve_provider(
        &self,
        provider: Option<&str>,
        model: Option<&str>,
    ) -> Result<ProviderConfig> {
        let name = provider.unwrap_or(self.default_provider.as_str());
        let mut resolved = self
            .get_provider(name)
            .cloned()
            .ok_or_else(|| Error::Config(format!("Unknown provider: {}", name)))?;

        if let Some(model) = model {
            resolved.model = model.to_string();
        }

        Ok(resolved)
    }
}

/// LLM Provider configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider type: "groq", "openai", "anthropic", etc.
    pub provider_type: String,
    /// API key (can be loaded from env)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Environment variable name for API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Model to use
    pub model: String,
    /// Base URL for the API (optional, for OpenAI-compatible endpoints)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Default max tokens
    pub default_max_tokens: u32,
    /// Default temperature
    pub default_temperature: f32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::groq()
    }
}

impl ProviderConfig {
    /// Groq serves open-weight models behind an OpenAI-compatible API;
    /// model names keep their upstream prefix.
    pub fn groq() -> Self {
        Self {
            provider_type: "groq".to_string(),
            api_key: None,
            api_key_env: Some("GROQ_API_KEY".to_string()),
            model: "openai/gpt-oss-120b".to_string(),
            base_url: Some("https://api.groq.com/openai/v1".to_string()),
            default_max_tokens: 4096,
            default_temperature: 0.2,
        }
    }

    /// Create OpenAI provider config
    pub fn openai() -> Self {
        Self {
            provider_type: "openai".to_string(),
            api_key: None,
            api_key_env: Some("OPENAI_API_KEY".to_string()),
            model: "gpt-4o".to_string(),
            base_url: None,
            default_max_tokens: 4096,
            default_temperature: 0.2,
        }
    }

    /// Create Anthropic provider config
    pub fn anthropic() -> Self {
        Self {
            provider_type: "anthropic".to_string(),
            api_key: None,
            api_key_env: Some("ANTHROPIC_API_KEY".to_string()),
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: None,
            default_max_tokens: 4096,
            default_temperature: 0.2,
        }
    }

    /// Get the API key, checking environment variable if not set directly
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(key) = &self.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }

        let env_name = self.api_key_env.as_deref()?;
        std::env::var(env_name).ok().filter(|key| !key.is_empty())
    }

    /// Model identifier qualified by provider, e.g. `groq/openai/gpt-oss-120b`
    pub fn qualified_model(&self) -> String {
        format!("{}/{}", self.provider_type, self.model)
    }
}

/// Execution settings for the analyst agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Maximum reasoning iterations before the agent must answer
    pub max_iter: u32,
    /// Whether the agent may hand work to other agents
    pub allow_delegation: bool,
    /// Emit step-by-step progress
    pub verbose: bool,
    /// Keep conversation memory between runs
    pub memory: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iter: 3,
            allow_delegation: false,
            verbose: true,
            memory: false,
        }
    }
}

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Configuration manager for loading and saving config
pub struct ConfigManager {
    config_path: PathBuf,
    config: Config,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::with_path(config_path)
    }

    /// Create a config manager with a specific path
    pub fn with_path(config_path: PathBuf) -> Result<Self> {
        let config = if config_path.exists() {
            Self::load_from_path(&config_path)?
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Config::default()
        };

        Ok(Self { config_path, config })
    }

    /// Get the default config path
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not find config directory".to_string()))?;

        Ok(config_dir.join("finsight").join("config.toml"))
    }

    fn load_from_path(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Path the configuration is loaded from and saved to
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable access to configuration
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Save the current configuration to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config dir: {}", e)))?;
        }

        let content = toml::to_string_pretty(&self.config)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&self.config_path, content)
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Get the default provider name
    pub fn default_provider(&self) -> &str {
        &self.config.default_provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_provider, "groq");
        assert_eq!(config.list_providers(), vec!["anthropic", "groq", "openai"]);

        let groq = config.get_default_provider().unwrap();
        assert_eq!(groq.model, "openai/gpt-oss-120b");
        assert_eq!(groq.api_key_env.as_deref(), Some("GROQ_API_KEY"));
        assert_eq!(groq.qualified_model(), "groq/openai/gpt-oss-120b");
    }

    #[test]
    fn test_agent_defaults() {
        let agent = AgentConfig::default();
        assert_eq!(agent.max_iter, 3);
        assert!(!agent.allow_delegation);
        assert!(agent.verbose);
        assert!(!agent.memory);
    }

    #[test]
    fn test_resolve_provider_overrides() {
        let config = Config::default();

        let default = config.resolve_provider(None, None).unwrap();
        assert_eq!(default, ProviderConfig::groq());

        let openai = config.resolve_provider(Some("openai"), Some("gpt-4.1")).unwrap();
        assert_eq!(openai.provider_type, "openai");
        assert_eq!(openai.model, "gpt-4.1");

        let err = config.resolve_provider(Some("nope"), None).unwrap_err();
        assert!(err.to_string().contains("Unknown provider: nope"));
    }

    #[test]
    fn test_direct_api_key_wins() {
        let mut provider = ProviderConfig::groq();
        provider.api_key = Some("direct".to_string());
        provider.api_key_env = Some("FINSIGHT_TEST_UNSET_KEY_1".to_string());
        assert_eq!(provider.get_api_key(), Some("direct".to_string()));

        provider.api_key = Some(String::new());
        assert_eq!(provider.get_api_key(), None);
    }
}

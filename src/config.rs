use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, RouterError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub env_file: Option<PathBuf>,
    pub llm: LlmConfig,
    pub provider: ProviderConfig,
    pub routing: RoutingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_url: String,
    pub model: String,
    pub api_key_env: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_ms: u64,
    pub json_mode: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
            temperature: 0.1,
            max_tokens: 200,
            timeout_ms: 30000,
            json_mode: true,
        }
    }
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn resolve_api_key(&self) -> Result<String> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(RouterError::Configuration(format!(
                "{} not set (add it to the environment or a .env file)",
                self.api_key_env
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub command: String,
    pub args: Vec<String>,
    pub env: HashMap<String, String>,
    pub cwd: Option<PathBuf>,
    pub init_timeout_ms: u64,
    pub call_timeout_ms: u64,
    pub shutdown_timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        // The server must keep stdout clean for JSON-RPC
        let mut env = HashMap::new();
        env.insert("ENABLE_VIEWER".to_string(), "false".to_string());

        Self {
            command: "node".to_string(),
            args: vec!["mcp-server.js".to_string()],
            env,
            cwd: None,
            init_timeout_ms: 30000,
            call_timeout_ms: 30000,
            shutdown_timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Reject tool names missing from the catalog before dispatch
    pub validate_tool_names: bool,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let project_name = env!("CARGO_PKG_NAME");

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RouterError::Configuration(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| {
            RouterError::Configuration(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        log::info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded file
    pub fn apply_overrides(&mut self, env_file: Option<PathBuf>, server: Option<PathBuf>, model: Option<String>) {
        if let Some(path) = env_file {
            self.env_file = Some(path);
        }
        if let Some(script) = server {
            self.provider.args = vec![script.to_string_lossy().into_owned()];
        }
        if let Some(model) = model {
            self.llm.model = model;
        }
    }

    /// Load variables from the configured .env file, or ./.env when none is set
    pub fn load_env_file(&self) -> Result<()> {
        match &self.env_file {
            Some(path) => {
                dotenv::from_path(path).map_err(|e| {
                    RouterError::Configuration(format!("Failed to load env file {}: {}", path.display(), e))
                })?;
                log::info!("Loaded environment from: {}", path.display());
            }
            None => {
                if let Ok(path) = dotenv::dotenv() {
                    log::info!("Loaded environment from: {}", path.display());
                }
            }
        }
        Ok(())
    }
}

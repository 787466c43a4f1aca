//! Configuration management for Agency Assist.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Built-in defaults
//! - Config file (`.assist/config.yaml`)
//! - Environment variables
//! - Command-line flags
//!
//! The configuration is workspace-centric: relative data paths resolve
//! against the workspace root.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

const KNOWN_LLM_PROVIDERS: [&str; 1] = ["ollama"];
const KNOWN_EMBEDDING_PROVIDERS: [&str; 2] = ["ollama", "mock"];
const KNOWN_RERANKERS: [&str; 2] = ["lexical", "http"];
const KNOWN_INDEX_BACKENDS: [&str; 2] = ["lancedb", "jsonl"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .assist/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Text-generation provider
    pub llm: LlmSettings,

    /// Query embedding provider
    pub embeddings: EmbeddingSettings,

    /// Official records and evidence index locations
    pub data: DataSettings,

    /// Candidate retrieval and reranking
    pub retrieval: RetrievalSettings,

    /// Answer synthesis
    pub generation: GenerationSettings,
}

/// Text-generation provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LlmSettings {
    pub provider: String,
    pub endpoint: String,
    pub model: String,
    /// Low temperature keeps answers close to the grounding.
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    /// HTTP timeout in seconds; unset means wait indefinitely.
    pub timeout: Option<u64>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            endpoint: "http://localhost:11434".to_string(),
            model: "mistral".to_string(),
            temperature: 0.1,
            max_tokens: None,
            timeout: None,
        }
    }
}

/// Embedding provider settings used to embed queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmbeddingSettings {
    pub provider: String,
    pub endpoint: String,
    pub model: String,
    pub dimensions: usize,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            endpoint: "http://localhost:11434".to_string(),
            model: "all-minilm".to_string(),
            dimensions: 384,
        }
    }
}

/// Locations of the official records and the pre-built evidence index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataSettings {
    pub official_dir: PathBuf,
    pub index_dir: PathBuf,
    /// "lancedb" or "jsonl"
    pub index_backend: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            official_dir: PathBuf::from("data/official"),
            index_dir: PathBuf::from("storage/vector_index"),
            index_backend: "lancedb".to_string(),
        }
    }
}

/// Retrieval and reranking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RetrievalSettings {
    /// Candidates requested from the index (wider than the final set)
    pub retrieve_k: usize,
    /// Passages kept after reranking
    pub rerank_top_k: usize,
    /// Drop candidates farther than this distance; unset disables the gate
    pub max_distance: Option<f32>,
    /// "lexical" or "http"
    pub reranker: String,
    pub reranker_endpoint: Option<String>,
    pub reranker_model: Option<String>,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            retrieve_k: 8,
            rerank_top_k: 2,
            max_distance: None,
            reranker: "lexical".to_string(),
            reranker_endpoint: None,
            reranker_model: None,
        }
    }
}

/// Answer synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationSettings {
    /// Run the second-pass support verifier
    pub enable_verify: bool,
    /// Name the assistant speaks for in prompts
    pub agency_name: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            enable_verify: false,
            agency_name: "the Regional Office".to_string(),
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmSettings>,
    embeddings: Option<EmbeddingSettings>,
    data: Option<DataSettings>,
    retrieval: Option<RetrievalSettings>,
    generation: Option<GenerationSettings>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
            llm: LlmSettings::default(),
            embeddings: EmbeddingSettings::default(),
            data: DataSettings::default(),
            retrieval: RetrievalSettings::default(),
            generation: GenerationSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `ASSIST_WORKSPACE`: Override workspace path
    /// - `ASSIST_CONFIG`: Path to config file
    /// - `ASSIST_PROVIDER`: Text-generation provider
    /// - `ASSIST_MODEL`: Text-generation model
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        Self::load_with(None, None)
    }

    /// Load configuration with an explicit workspace and config file.
    ///
    /// `None` falls back to `ASSIST_WORKSPACE` / `ASSIST_CONFIG`, then to the
    /// current directory and `.assist/config.yaml`.
    pub fn load_with(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) = workspace.or_else(|| env_path("ASSIST_WORKSPACE")) {
            config.workspace = workspace;
        }
        config.config_file = config_file.or_else(|| env_path("ASSIST_CONFIG"));

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = match config.config_file {
            Some(ref cf) => cf.clone(),
            None => config.assist_dir().join("config.yaml"),
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file not found: {:?}",
                config_path
            )));
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("ASSIST_PROVIDER") {
            config.llm.provider = provider;
        }

        if let Ok(model) = std::env::var("ASSIST_MODEL") {
            config.llm.model = model;
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(llm) = config_file.llm {
            result.llm = llm;
        }
        if let Some(embeddings) = config_file.embeddings {
            result.embeddings = embeddings;
        }
        if let Some(data) = config_file.data {
            result.data = data;
        }
        if let Some(retrieval) = config_file.retrieval {
            result.retrieval = retrieval;
        }
        if let Some(generation) = config_file.generation {
            result.generation = generation;
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        tracing::debug!("Merged config file {:?}", path);
        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over environment variables and
    /// the config file.
    pub fn with_overrides(
        mut self,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(provider) = provider {
            self.llm.provider = provider;
        }

        if let Some(model) = model {
            self.llm.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .assist directory.
    pub fn assist_dir(&self) -> PathBuf {
        self.workspace.join(".assist")
    }

    /// Directory holding the five official record files.
    pub fn official_dir(&self) -> PathBuf {
        self.resolve(&self.data.official_dir)
    }

    /// Directory holding the pre-built evidence index.
    pub fn index_dir(&self) -> PathBuf {
        self.resolve(&self.data.index_dir)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace.join(path)
        }
    }

    /// Validate provider names and retrieval sizes.
    pub fn validate(&self) -> AppResult<()> {
        check_known("LLM provider", &self.llm.provider, &KNOWN_LLM_PROVIDERS)?;
        check_known(
            "embedding provider",
            &self.embeddings.provider,
            &KNOWN_EMBEDDING_PROVIDERS,
        )?;
        check_known("reranker", &self.retrieval.reranker, &KNOWN_RERANKERS)?;
        check_known(
            "index backend",
            &self.data.index_backend,
            &KNOWN_INDEX_BACKENDS,
        )?;

        if self.retrieval.retrieve_k == 0 {
            return Err(AppError::Config(
                "retrieval.retrieveK must be greater than zero".to_string(),
            ));
        }

        if self.retrieval.rerank_top_k == 0 {
            return Err(AppError::Config(
                "retrieval.rerankTopK must be greater than zero".to_string(),
            ));
        }

        if self.retrieval.reranker == "http" && self.retrieval.reranker_endpoint.is_none() {
            return Err(AppError::Config(
                "The http reranker requires retrieval.rerankerEndpoint".to_string(),
            ));
        }

        Ok(())
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name).ok().map(PathBuf::from)
}

fn check_known(what: &str, value: &str, known: &[&str]) -> AppResult<()> {
    if known.contains(&value) {
        Ok(())
    } else {
        Err(AppError::Config(format!(
            "Unknown {}: {}. Supported: {}",
            what,
            value,
            known.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.llm.model, "mistral");
        assert_eq!(config.retrieval.retrieve_k, 8);
        assert_eq!(config.retrieval.rerank_top_k, 2);
        assert!(config.retrieval.max_distance.is_none());
        assert!(!config.generation.enable_verify);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_relative_data_paths_resolve_against_workspace() {
        let mut config = AppConfig::default();
        config.workspace = PathBuf::from("/srv/assist");
        assert_eq!(
            config.official_dir(),
            PathBuf::from("/srv/assist/data/official")
        );

        config.data.index_dir = PathBuf::from("/var/index");
        assert_eq!(config.index_dir(), PathBuf::from("/var/index"));
    }

    #[test]
    fn test_yaml_sections_merge() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(
            &path,
            "retrieval:\n  retrieveK: 12\n  reranker: http\n  rerankerEndpoint: http://localhost:8080\n\
             generation:\n  enableVerify: true\n\
             logging:\n  level: debug\n  color: false\n",
        )
        .unwrap();

        let config = AppConfig::default().merge_yaml(&path).unwrap();
        assert_eq!(config.retrieval.retrieve_k, 12);
        // Unspecified fields inside a section keep their defaults
        assert_eq!(config.retrieval.rerank_top_k, 2);
        assert_eq!(config.retrieval.reranker, "http");
        assert!(config.generation.enable_verify);
        assert_eq!(config.log_level, Some("debug".to_string()));
        assert!(config.no_color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default().with_overrides(
            Some("ollama".to_string()),
            Some("llama3.2".to_string()),
            None,
            true,
            false,
        );

        assert_eq!(config.llm.model, "llama3.2");
        assert!(config.verbose);
        assert_eq!(config.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_validate_unknown_provider() {
        let mut config = AppConfig::default();
        config.llm.provider = "unknown".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_http_reranker_needs_endpoint() {
        let mut config = AppConfig::default();
        config.retrieval.reranker = "http".to_string();
        assert!(config.validate().is_err());

        config.retrieval.reranker_endpoint = Some("http://localhost:8080".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_top_k() {
        let mut config = AppConfig::default();
        config.retrieval.rerank_top_k = 0;
        assert!(config.validate().is_err());
    }
}

//! Configuration management for the CLI.
//!
//! Settings are resolved in layers, later layers winning: built-in defaults,
//! the TOML config file, the environment (including a `.env` file in the
//! working directory), and finally command-line flags.

use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use termbase_domain::ColumnNames;
use termbase_llm::{anthropic, openai, LlmError, ProviderKind, ProviderSettings};
use termbase_matcher::{ClusterPolicy, MatcherConfig};
use termbase_merger::MergerConfig;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "termbase.toml";

/// Full application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Merge backend: `openai` or `anthropic`
    pub ai_provider: String,

    /// Minimum field similarity for two records to be grouped
    pub similarity_threshold: f64,

    /// Maximum backend calls per run
    pub max_ai_calls: usize,

    /// Use the backend for duplicate groups
    pub enable_ai: bool,

    /// Directory holding the input CSV files
    pub input_directory: PathBuf,

    /// Consolidated output file
    pub output_file: PathBuf,

    /// Term column name
    pub term_column: String,

    /// Definition column name
    pub definition_column: String,

    /// URL column name
    pub url_column: String,

    /// Log level filter
    pub log_level: String,

    /// Append-only run log
    pub log_file: PathBuf,

    /// Delay between backend calls (milliseconds)
    pub rate_limit_ms: u64,

    /// Per-request timeout (seconds)
    pub request_timeout_secs: u64,

    /// Grouping policy
    pub cluster_policy: ClusterPolicy,

    /// OpenAI connection
    pub openai: ProviderConfig,

    /// Anthropic connection
    pub anthropic: ProviderConfig,
}

/// Connection settings for one backend.
///
/// Unset model and base URL fall back to the backend's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// API key
    pub api_key: String,

    /// Model identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let merger = MergerConfig::default();
        Self {
            ai_provider: ProviderKind::OpenAi.as_str().to_string(),
            similarity_threshold: MatcherConfig::default().similarity_threshold,
            max_ai_calls: merger.max_ai_calls,
            enable_ai: merger.enable_ai,
            input_directory: PathBuf::from("./csv_files"),
            output_file: PathBuf::from("consolidated_knowledge_base.csv"),
            term_column: "term".to_string(),
            definition_column: "definition".to_string(),
            url_column: "url".to_string(),
            log_level: "info".to_string(),
            log_file: PathBuf::from("consolidation.log"),
            rate_limit_ms: merger.rate_limit_ms,
            request_timeout_secs: termbase_llm::provider::DEFAULT_TIMEOUT_SECS,
            cluster_policy: ClusterPolicy::Seed,
            openai: ProviderConfig::default(),
            anthropic: ProviderConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the first config file found, or defaults.
    ///
    /// An explicit path must exist; otherwise `./termbase.toml` and then
    /// `<config dir>/termbase/config.toml` are tried.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::discover() {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Locate an implicit configuration file.
    pub fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }

        dirs::config_dir()
            .map(|dir| dir.join("termbase").join("config.toml"))
            .filter(|path| path.is_file())
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply `.env` and process environment overrides.
    pub fn apply_process_env(&mut self) -> Result<()> {
        dotenv::dotenv().ok();
        self.apply_env(|key| env::var(key).ok())
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// Unset and blank variables are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(v) = get("AI_PROVIDER") {
            self.ai_provider = v.trim().to_lowercase();
        }
        if let Some(v) = get("SIMILARITY_THRESHOLD") {
            self.similarity_threshold = parse_env("SIMILARITY_THRESHOLD", &v)?;
        }
        if let Some(v) = get("MAX_AI_CALLS_PER_RUN") {
            self.max_ai_calls = parse_env("MAX_AI_CALLS_PER_RUN", &v)?;
        }
        if let Some(v) = get("ENABLE_AI_CONSOLIDATION") {
            self.enable_ai = parse_bool("ENABLE_AI_CONSOLIDATION", &v)?;
        }
        if let Some(v) = get("INPUT_DIRECTORY") {
            self.input_directory = PathBuf::from(v);
        }
        if let Some(v) = get("OUTPUT_FILE") {
            self.output_file = PathBuf::from(v);
        }
        if let Some(v) = get("TERM_COLUMN") {
            self.term_column = v;
        }
        if let Some(v) = get("DEFINITION_COLUMN") {
            self.definition_column = v;
        }
        if let Some(v) = get("URL_COLUMN") {
            self.url_column = v;
        }
        if let Some(v) = get("LOG_LEVEL") {
            self.log_level = v;
        }

        for (prefix, provider) in [("OPENAI", &mut self.openai), ("ANTHROPIC", &mut self.anthropic)] {
            if let Some(v) = get(&format!("{}_API_KEY", prefix)) {
                provider.api_key = v;
            }
            if let Some(v) = get(&format!("{}_MODEL", prefix)) {
                provider.model = Some(v);
            }
            if let Some(v) = get(&format!("{}_BASE_URL", prefix)) {
                provider.base_url = Some(v);
            }
        }

        Ok(())
    }

    /// Apply command-line overrides for a run.
    pub fn apply_args(&mut self, args: &RunArgs) {
        if let Some(dir) = &args.input_dir {
            self.input_directory = dir.clone();
        }
        if let Some(output) = &args.output {
            self.output_file = output.clone();
        }
        if let Some(threshold) = args.threshold {
            self.similarity_threshold = threshold;
        }
        if let Some(max) = args.max_ai_calls {
            self.max_ai_calls = max;
        }
        if let Some(provider) = &args.provider {
            self.ai_provider = provider.trim().to_lowercase();
        }
        if args.no_ai {
            self.enable_ai = false;
        }
        if args.transitive {
            self.cluster_policy = ClusterPolicy::Transitive;
        }
    }

    /// Validate the configuration before any input is read.
    pub fn validate(&self) -> Result<()> {
        let kind = self.provider_kind()?;

        self.matcher_config()
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        self.columns().validate().map_err(CliError::Config)?;
        self.merger_config().validate().map_err(CliError::Config)?;

        if self.request_timeout_secs == 0 {
            return Err(CliError::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.enable_ai {
            let key = &self.provider(kind).api_key;
            if key.trim().is_empty() || is_placeholder(key) {
                return Err(CliError::Config(format!(
                    "{} API key not configured (set {}_API_KEY or [{}].api_key)",
                    kind,
                    kind.as_str().to_uppercase(),
                    kind
                )));
            }
        }

        Ok(())
    }

    /// The configured merge backend.
    pub fn provider_kind(&self) -> Result<ProviderKind> {
        ProviderKind::parse(&self.ai_provider).map_err(|e| match e {
            LlmError::Configuration(message) => CliError::Config(message),
            other => CliError::Config(other.to_string()),
        })
    }

    /// Connection settings for the configured backend, defaults filled in.
    pub fn provider_settings(&self) -> Result<(ProviderKind, ProviderSettings)> {
        let kind = self.provider_kind()?;
        let (default_model, default_base_url) = match kind {
            ProviderKind::OpenAi => (openai::DEFAULT_MODEL, openai::DEFAULT_BASE_URL),
            ProviderKind::Anthropic => (anthropic::DEFAULT_MODEL, anthropic::DEFAULT_BASE_URL),
        };
        let provider = self.provider(kind);

        let settings = ProviderSettings::new(
            provider.api_key.clone(),
            provider.model.as_deref().unwrap_or(default_model),
            provider.base_url.as_deref().unwrap_or(default_base_url),
        )
        .with_timeout(Duration::from_secs(self.request_timeout_secs));

        Ok((kind, settings))
    }

    fn provider(&self, kind: ProviderKind) -> &ProviderConfig {
        match kind {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Anthropic => &self.anthropic,
        }
    }

    /// Configured column names.
    pub fn columns(&self) -> ColumnNames {
        ColumnNames::new(
            self.term_column.clone(),
            self.definition_column.clone(),
            self.url_column.clone(),
        )
    }

    /// Matcher settings.
    pub fn matcher_config(&self) -> MatcherConfig {
        MatcherConfig {
            similarity_threshold: self.similarity_threshold,
            policy: self.cluster_policy,
        }
    }

    /// Merge-layer settings.
    pub fn merger_config(&self) -> MergerConfig {
        MergerConfig {
            enable_ai: self.enable_ai,
            max_ai_calls: self.max_ai_calls,
            rate_limit_ms: self.rate_limit_ms,
        }
    }
}

/// Sample keys shipped in generated configuration files
fn is_placeholder(key: &str) -> bool {
    let key = key.trim();
    key.starts_with("your_") && key.ends_with("_here")
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value)))
}

/// Parse a boolean setting (`true/false/1/0/yes/no/on/off`, any case).
pub fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(CliError::Config(format!(
            "Invalid boolean for {}: {}",
            key, value
        ))),
    }
}

/// Commented sample configuration written by `termbase init`.
pub const SAMPLE_CONFIG: &str = r#"# Termbase configuration
#
# Environment variables (and a .env file in the working directory) override
# these values; command-line flags override both.

# Merge backend: "openai" or "anthropic"
ai_provider = "openai"

# Records are grouped when their terms or definitions are at least this similar
similarity_threshold = 0.85

# Backend calls allowed per run; duplicate groups left when it runs out are not emitted
max_ai_calls = 100

# Set to false for rule-based merging only
enable_ai = true

input_directory = "./csv_files"
output_file = "consolidated_knowledge_base.csv"

term_column = "term"
definition_column = "definition"
url_column = "url"

log_level = "info"
log_file = "consolidation.log"

# Delay between backend calls, and per-request timeout
rate_limit_ms = 100
request_timeout_secs = 30

# "seed" compares candidates with the group seed only; "transitive" closes groups
cluster_policy = "seed"

[openai]
api_key = "your_openai_api_key_here"
model = "gpt-4"
base_url = "https://api.openai.com/v1"

[anthropic]
api_key = "your_anthropic_api_key_here"
model = "claude-3-sonnet-20240229"
base_url = "https://api.anthropic.com"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.ai_provider, "openai");
        assert_eq!(config.similarity_threshold, 0.85);
        assert_eq!(config.max_ai_calls, 100);
        assert!(config.enable_ai);
        assert_eq!(config.output_file, PathBuf::from("consolidated_knowledge_base.csv"));
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.cluster_policy, ClusterPolicy::Seed);
    }

    #[test]
    fn test_sample_config_parses() {
        let config = AppConfig::from_toml(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.openai.model.as_deref(), Some("gpt-4"));
        assert_eq!(config.anthropic.base_url.as_deref(), Some("https://api.anthropic.com"));
        // Placeholder keys are not usable credentials
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            "enable_ai = false\ncluster_policy = \"transitive\"\n[anthropic]\napi_key = \"ak\"\n",
        )
        .unwrap();
        assert!(!config.enable_ai);
        assert_eq!(config.cluster_policy, ClusterPolicy::Transitive);
        assert_eq!(config.anthropic.api_key, "ak");
        assert_eq!(config.anthropic.model, None);
        assert_eq!(config.term_column, "term");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env(env_of(&[
                ("AI_PROVIDER", "Anthropic"),
                ("SIMILARITY_THRESHOLD", "0.9"),
                ("MAX_AI_CALLS_PER_RUN", "5"),
                ("ENABLE_AI_CONSOLIDATION", "off"),
                ("TERM_COLUMN", "name"),
                ("ANTHROPIC_API_KEY", "ak-live"),
                ("OPENAI_MODEL", "gpt-3.5-turbo"),
                ("OUTPUT_FILE", ""),
            ]))
            .unwrap();

        assert_eq!(config.ai_provider, "anthropic");
        assert_eq!(config.similarity_threshold, 0.9);
        assert_eq!(config.max_ai_calls, 5);
        assert!(!config.enable_ai);
        assert_eq!(config.term_column, "name");
        assert_eq!(config.anthropic.api_key, "ak-live");
        assert_eq!(config.openai.model.as_deref(), Some("gpt-3.5-turbo"));
        assert_eq!(config.output_file, PathBuf::from("consolidated_knowledge_base.csv"));
    }

    #[test]
    fn test_invalid_env_values() {
        let mut config = AppConfig::default();
        let result = config.apply_env(env_of(&[("SIMILARITY_THRESHOLD", "high")]));
        assert!(matches!(result, Err(CliError::Config(_))));

        let result = config.apply_env(env_of(&[("ENABLE_AI_CONSOLIDATION", "maybe")]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_parse_bool() {
        for value in ["true", "TRUE", "1", "yes", "On"] {
            assert!(parse_bool("X", value).unwrap());
        }
        for value in ["false", "0", "no", "OFF"] {
            assert!(!parse_bool("X", value).unwrap());
        }
    }

    #[test]
    fn test_args_override() {
        let mut config = AppConfig::default();
        let args = RunArgs {
            input_dir: Some(PathBuf::from("in")),
            threshold: Some(0.7),
            provider: Some("anthropic".to_string()),
            no_ai: true,
            transitive: true,
            ..RunArgs::default()
        };

        config.apply_args(&args);

        assert_eq!(config.input_directory, PathBuf::from("in"));
        assert_eq!(config.similarity_threshold, 0.7);
        assert_eq!(config.ai_provider, "anthropic");
        assert!(!config.enable_ai);
        assert_eq!(config.cluster_policy, ClusterPolicy::Transitive);
    }

    #[test]
    fn test_validate_rule_based_needs_no_key() {
        let config = AppConfig {
            enable_ai: false,
            ..AppConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_key_with_ai() {
        let mut config = AppConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));

        config.openai.api_key = "sk-real".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_provider() {
        let config = AppConfig {
            ai_provider: "cohere".to_string(),
            enable_ai: false,
            ..AppConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Unsupported AI provider: cohere"));
    }

    #[test]
    fn test_validate_threshold_and_columns() {
        let config = AppConfig {
            similarity_threshold: 1.5,
            enable_ai: false,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(CliError::Config(_))));

        let config = AppConfig {
            url_column: " ".to_string(),
            enable_ai: false,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_provider_settings_fill_defaults() {
        let mut config = AppConfig::default();
        config.ai_provider = "anthropic".to_string();
        config.anthropic.api_key = "ak".to_string();
        config.request_timeout_secs = 5;

        let (kind, settings) = config.provider_settings().unwrap();
        assert_eq!(kind, ProviderKind::Anthropic);
        assert_eq!(settings.model, "claude-3-sonnet-20240229");
        assert_eq!(settings.base_url, "https://api.anthropic.com");
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_explicit_missing_file_is_config_error() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/termbase.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}

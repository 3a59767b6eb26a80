use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::providers::gitlab::{
    DEFAULT_ENVIRONMENT_ORDER, DEFAULT_MAX_CONCURRENT_REQUESTS, DEFAULT_MIN_ACCESS_LEVEL,
    DEFAULT_PER_PAGE,
};

const CANDIDATES: [&str; 4] = [
    "deploydash.toml",
    "deploydash.json",
    "deploydash.yaml",
    "deploydash.yml",
];

/// Configuration file structure for deploydash.
///
/// Every value can be overridden on the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub gitlab: GitLabConfig,

    #[serde(default)]
    pub environments: EnvironmentsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitLabConfig {
    /// GitLab personal access token
    pub token: Option<String>,

    /// GitLab instance base URL
    #[serde(default = "default_gitlab_base_url")]
    pub base_url: String,

    /// Minimum access level of listed projects
    #[serde(default = "default_min_access_level")]
    pub min_access_level: u32,

    /// Page size of the project listing
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Upper bound on simultaneous API requests
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EnvironmentsConfig {
    /// Environment names to display, highest priority first
    #[serde(default = "default_environment_order")]
    pub order: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Summary,
    Json,
}

impl Default for GitLabConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: default_gitlab_base_url(),
            min_access_level: default_min_access_level(),
            per_page: default_per_page(),
            max_concurrent_requests: default_max_concurrent_requests(),
        }
    }
}

impl Default for EnvironmentsConfig {
    fn default() -> Self {
        Self {
            order: default_environment_order(),
        }
    }
}

fn default_gitlab_base_url() -> String {
    "https://gitlab.com".to_string()
}

fn default_min_access_level() -> u32 {
    DEFAULT_MIN_ACCESS_LEVEL
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

fn default_max_concurrent_requests() -> usize {
    DEFAULT_MAX_CONCURRENT_REQUESTS
}

fn default_environment_order() -> Vec<String> {
    DEFAULT_ENVIRONMENT_ORDER
        .iter()
        .map(ToString::to_string)
        .collect()
}

impl Config {
    /// Load configuration from a file.
    ///
    /// Searches for configuration files in this order:
    /// 1. Specified path (must exist)
    /// 2. `deploydash.{toml,json,yaml,yml}` in the current directory
    /// 3. `<user config dir>/deploydash/config.toml`
    ///
    /// Returns default configuration if no file is found.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }

        if let Some(config) = Self::load_from_dir(Path::new("."))? {
            return Ok(config);
        }

        if let Some(path) = user_config_path().filter(|p| p.exists()) {
            return Self::load_from_path(&path);
        }

        Ok(Self::default())
    }

    /// Loads the first candidate file present in `dir`, if any.
    fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        for candidate in &CANDIDATES {
            let path = dir.join(candidate);
            if path.exists() {
                return Self::load_from_path(&path).map(Some);
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific file path.
    fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension {
            "toml" => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            "json" => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display())),
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            _ => toml::from_str(&contents)
                .or_else(|_| serde_json::from_str(&contents))
                .or_else(|_| serde_yaml::from_str(&contents))
                .with_context(|| format!("Failed to parse config file: {}", path.display())),
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("deploydash").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.gitlab.base_url, "https://gitlab.com");
        assert_eq!(config.gitlab.min_access_level, 10);
        assert_eq!(config.gitlab.per_page, 1000);
        assert_eq!(
            config.environments.order,
            vec!["production", "staging", "feature", "feature-marketing"]
        );
        assert_eq!(config.output.format, OutputFormat::Summary);
    }

    #[test]
    fn test_load_toml_config() {
        let mut temp_file = NamedTempFile::with_suffix(".toml").unwrap();
        let toml_content = r#"
[gitlab]
token = "glpat-test-token"
base-url = "https://gitlab.example.com"
min-access-level = 30
max-concurrent-requests = 16

[environments]
order = ["prod", "qa"]

[output]
format = "json"
pretty = true
"#;
        write!(temp_file, "{}", toml_content).unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.gitlab.token, Some("glpat-test-token".to_string()));
        assert_eq!(config.gitlab.base_url, "https://gitlab.example.com");
        assert_eq!(config.gitlab.min_access_level, 30);
        assert_eq!(config.gitlab.per_page, 1000);
        assert_eq!(config.gitlab.max_concurrent_requests, 16);
        assert_eq!(config.environments.order, vec!["prod", "qa"]);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_load_json_config() {
        let mut temp_file = NamedTempFile::with_suffix(".json").unwrap();
        let json_content = r#"{
  "gitlab": {
    "token": "glpat-json-token",
    "base-url": "https://gitlab.json.com"
  }
}"#;
        write!(temp_file, "{}", json_content).unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.gitlab.token, Some("glpat-json-token".to_string()));
        assert_eq!(config.gitlab.base_url, "https://gitlab.json.com");
        assert_eq!(config.environments.order.len(), 4);
    }

    #[test]
    fn test_load_yaml_config() {
        let mut temp_file = NamedTempFile::with_suffix(".yaml").unwrap();
        write!(temp_file, "gitlab:\n  per-page: 50\noutput:\n  format: json\n").unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.gitlab.per_page, 50);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let result = Config::load(Some(Path::new("definitely-missing-deploydash.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_dir_picks_first_candidate() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join("deploydash.toml"),
            "[gitlab]\nbase-url = \"https://toml.gitlab.com\"\n",
        )
        .unwrap();
        std::fs::write(
            temp_dir.path().join("deploydash.json"),
            r#"{"gitlab": {"base-url": "https://json.gitlab.com"}}"#,
        )
        .unwrap();

        let config = Config::load_from_dir(temp_dir.path()).unwrap().unwrap();
        assert_eq!(config.gitlab.base_url, "https://toml.gitlab.com");
    }

    #[test]
    fn test_load_from_empty_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_dir(temp_dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_malformed_config_reports_path() {
        let mut temp_file = NamedTempFile::with_suffix(".toml").unwrap();
        write!(temp_file, "[gitlab\nbase-url = ").unwrap();

        let error = Config::load_from_path(temp_file.path()).unwrap_err();
        assert!(error.to_string().contains("Failed to parse TOML config"));
    }
}

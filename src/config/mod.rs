// gha-bump - Configuration loading and validation

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("home directory not found")]
    NoHomeDir,
    #[error("invalid github.base_url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("{0}")]
    Other(String),
}

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

// ---------------------------------------------------------------------------
// GitHub
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubConfig {
    /// Host serving `/{owner}/{repo}/releases/latest` redirects.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_accept")]
    pub accept: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            accept: default_accept(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://github.com".to_string()
}
fn default_accept() -> String {
    "application/vnd.github.v3+json".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

// ---------------------------------------------------------------------------
// Scan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Workflow directory, relative to a directory target.
    #[serde(default = "default_workflows_dir")]
    pub workflows_dir: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workflows_dir: default_workflows_dir(),
            extensions: default_extensions(),
        }
    }
}

fn default_workflows_dir() -> String {
    ".github/workflows".to_string()
}
fn default_extensions() -> Vec<String> {
    vec!["yaml".to_string(), "yml".to_string()]
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// A missing file at the default location falls back to defaults; a
    /// missing file that was asked for explicitly is an error.
    pub fn load(path: &Path, explicit: bool) -> Result<Self, ConfigError> {
        if !path.exists() && !explicit {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            let mut config = Config::default();
            config.apply_env_overrides();
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = serde_json::from_str(&contents)?;
        config.apply_env_overrides();
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Apply environment variable overrides (prefix: GHA_BUMP_)
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("GHA_BUMP_GITHUB_BASE_URL") {
            self.github.base_url = v;
        }
        if let Ok(v) = std::env::var("GHA_BUMP_GITHUB_ACCEPT") {
            self.github.accept = v;
        }
        if let Ok(v) = std::env::var("GHA_BUMP_GITHUB_TIMEOUT_SECS") {
            if let Ok(n) = v.parse() {
                self.github.timeout_secs = n;
            }
        }
        if let Ok(v) = std::env::var("GHA_BUMP_SCAN_WORKFLOWS_DIR") {
            self.scan.workflows_dir = v;
        }
    }

    /// Get the default config file path: ~/.gha-bump/config.json
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".gha-bump").join("config.json"))
    }

    /// Validate configuration for basic correctness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.github.base_url;
        match url::Url::parse(base) {
            Ok(u) if u.scheme() == "http" || u.scheme() == "https" => {}
            Ok(u) => {
                return Err(ConfigError::InvalidBaseUrl {
                    url: base.clone(),
                    reason: format!("unsupported scheme {:?}", u.scheme()),
                })
            }
            Err(e) => {
                return Err(ConfigError::InvalidBaseUrl {
                    url: base.clone(),
                    reason: e.to_string(),
                })
            }
        }

        if self.github.timeout_secs == 0 {
            return Err(ConfigError::Other(
                "github.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.scan.extensions.is_empty() {
            return Err(ConfigError::Other(
                "scan.extensions must list at least one file extension".to_string(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.github.base_url, "https://github.com");
        assert_eq!(cfg.github.accept, "application/vnd.github.v3+json");
        assert_eq!(cfg.scan.workflows_dir, ".github/workflows");
        assert_eq!(cfg.scan.extensions, vec!["yaml", "yml"]);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_json() {
        let json = r#"{"github": {"timeout_secs": 5}}"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.github.timeout_secs, 5);
        assert_eq!(cfg.github.base_url, "https://github.com");
        assert_eq!(cfg.scan.extensions.len(), 2);
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.json"), true).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Config::load(&path, true),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"scan": {"workflows_dir": "ci", "extensions": ["yml"]}}"#,
        )
        .unwrap();
        let cfg = Config::load(&path, true).unwrap();
        assert_eq!(cfg.scan.workflows_dir, "ci");
        assert_eq!(cfg.scan.extensions, vec!["yml"]);
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut cfg = Config::default();
        cfg.github.base_url = "not a url".to_string();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));

        cfg.github.base_url = "ftp://github.com".to_string();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        // Only this test sets these variables
        std::env::set_var("GHA_BUMP_GITHUB_BASE_URL", "http://127.0.0.1:9999");
        std::env::set_var("GHA_BUMP_GITHUB_TIMEOUT_SECS", "soon");

        let mut cfg = Config::default();
        cfg.apply_env_overrides();
        assert_eq!(cfg.github.base_url, "http://127.0.0.1:9999");
        assert_eq!(cfg.github.timeout_secs, 30);

        std::env::set_var("GHA_BUMP_GITHUB_TIMEOUT_SECS", "7");
        cfg.apply_env_overrides();
        assert_eq!(cfg.github.timeout_secs, 7);

        std::env::remove_var("GHA_BUMP_GITHUB_BASE_URL");
        std::env::remove_var("GHA_BUMP_GITHUB_TIMEOUT_SECS");
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut cfg = Config::default();
        cfg.github.timeout_secs = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::Other(_))));
    }

    #[test]
    fn test_validate_rejects_empty_extensions() {
        let mut cfg = Config::default();
        cfg.scan.extensions.clear();
        assert!(matches!(cfg.validate(), Err(ConfigError::Other(_))));
    }
}

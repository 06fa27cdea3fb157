// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

const DEFAULT_CONFIG_FILE: &str = "config.yaml";
const DEFAULT_SESSION_PATH: &str = ".classmate/session.yaml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// One environment section of `config.yaml`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentConfig {
    pub backend_api: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub session_path: Option<PathBuf>,
    pub log_format: Option<LogFormat>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: EnvironmentConfig,
    #[serde(default)]
    production: EnvironmentConfig,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub environment: String,
    pub backend_api: Option<String>,
    /// `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
    pub session_path: PathBuf,
    pub log_format: LogFormat,
}

impl ClientConfig {
    /// Load configuration for the current environment.
    ///
    /// `backend_override` (from `--base-url` / `CLASSMATE_BACKEND_API`) wins
    /// over the file. An explicit `config_path` must exist; the default
    /// `config.yaml` is optional.
    pub fn load(config_path: Option<&Path>, backend_override: Option<String>) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let section = match config_path {
            Some(path) => Self::load_section(path, &environment)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_section(&default_path, &environment)?
                } else {
                    EnvironmentConfig::default()
                }
            }
        };

        Self::from_section(environment, section, backend_override)
    }

    fn get_environment() -> String {
        std::env::var("CLASSMATE_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_section(path: &Path, environment: &str) -> Result<EnvironmentConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse_section(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn parse_section(content: &str, environment: &str) -> Result<EnvironmentConfig> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;
        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    pub fn from_section(
        environment: String,
        section: EnvironmentConfig,
        backend_override: Option<String>,
    ) -> Result<Self> {
        let backend_api = backend_override
            .filter(|url| !url.trim().is_empty())
            .or(section.backend_api)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let session_path = Self::resolve_path(
            section
                .session_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_PATH)),
        )?;

        Ok(Self {
            environment,
            backend_api,
            timeout: section.timeout_seconds.map(Duration::from_secs),
            session_path,
            log_format: section.log_format.unwrap_or_default(),
        })
    }

    /// Base URL of the analysis service, required for any request.
    pub fn backend_api(&self) -> Result<&str> {
        self.backend_api.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Backend API URL not configured. Set CLASSMATE_BACKEND_API, pass --base-url, or add backend_api to {}",
                DEFAULT_CONFIG_FILE
            )
        })
    }

    fn resolve_path(path: PathBuf) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path)
        } else {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            Ok(current_dir.join(path))
        }
    }
}

//! Client configuration: defaults, a JSON file, then the environment.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use slurmrest_core::ApiVersion;
use slurmrest_http::DEFAULT_USER_AGENT;
use std::time::Duration;
use thiserror::Error;

pub const ENV_URL: &str = "SLURM_REST_URL";
pub const ENV_API_VERSION: &str = "SLURM_API_VERSION";
pub const ENV_TIMEOUT: &str = "SLURM_TIMEOUT";
pub const ENV_USER_AGENT: &str = "SLURM_USER_AGENT";
pub const ENV_USER_NAME: &str = "SLURM_USER_NAME";
pub const ENV_JWT: &str = "SLURM_JWT";

/// Selector value that asks the client to probe the server.
pub const AUTO_VERSION: &str = "auto";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// slurmrestd root, e.g. `http://slurmctld:6820`.
    pub base_url: String,
    /// `latest`, `stable`, `auto` or an exact version such as `v0.0.42`.
    pub api_version: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub user_name: Option<String>,
    pub token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:6820".to_string(),
            api_version: "stable".to_string(),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            user_name: None,
            token: None,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("user_name", &self.user_name)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ClientConfig {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Defaults or `path`, then process environment, then validation.
    pub fn resolve(path: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        let config = config.with_env(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `SLURM_*` overrides read through `lookup`. Empty values are
    /// ignored.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_URL) {
            self.base_url = url;
        }
        if let Some(version) = get(ENV_API_VERSION) {
            self.api_version = version;
        }
        if let Some(timeout) = get(ENV_TIMEOUT) {
            self.timeout_secs = timeout
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv {
                    var: ENV_TIMEOUT,
                    value: timeout.clone(),
                })?;
        }
        if let Some(agent) = get(ENV_USER_AGENT) {
            self.user_agent = agent;
        }
        if let Some(user) = get(ENV_USER_NAME) {
            self.user_name = Some(user);
        }
        if let Some(token) = get(ENV_JWT) {
            self.token = Some(token);
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                field: "base_url",
                message: format!("expected an http:// or https:// URL, got {:?}", url),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "timeout_secs",
                message: "timeout must be at least one second".to_string(),
            });
        }
        if !self.detects_version() {
            ApiVersion::select(&self.api_version).map_err(|e| ConfigError::Invalid {
                field: "api_version",
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn detects_version(&self) -> bool {
        self.api_version.trim().eq_ignore_ascii_case(AUTO_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_defaults_validate() {
        let config = ClientConfig::default();
        config.validate().unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(!config.detects_version());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"base_url": "https://slurm.example.org:6820", "api_version": "v0.0.41"}}"#
        )
        .unwrap();
        let path = Utf8Path::from_path(file.path()).unwrap();
        let config = ClientConfig::load(path).unwrap();
        assert_eq!(config.base_url, "https://slurm.example.org:6820");
        assert_eq!(config.api_version, "v0.0.41");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("missing.json")).unwrap();
        let err = ClientConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let path = Utf8Path::from_path(file.path()).unwrap();
        assert!(matches!(
            ClientConfig::load(path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::default()
            .with_env(env(&[
                (ENV_URL, "http://ctl:6820"),
                (ENV_API_VERSION, "latest"),
                (ENV_TIMEOUT, "5"),
                (ENV_USER_NAME, "alice"),
                (ENV_JWT, "jwt"),
                (ENV_USER_AGENT, ""),
            ]))
            .unwrap();
        assert_eq!(config.base_url, "http://ctl:6820");
        assert_eq!(config.api_version, "latest");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_name.as_deref(), Some("alice"));
        assert_eq!(config.token.as_deref(), Some("jwt"));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_env_bad_timeout() {
        let err = ClientConfig::default()
            .with_env(env(&[(ENV_TIMEOUT, "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: ENV_TIMEOUT, .. }));
    }

    #[test]
    fn test_validate_rejects() {
        let config = ClientConfig {
            base_url: "slurm:6820".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "base_url", .. })
        ));

        let config = ClientConfig {
            api_version: "v0.0.12".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "api_version", .. })
        ));

        let config = ClientConfig {
            api_version: "AUTO".to_string(),
            ..Default::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig {
            token: Some("secret-jwt".to_string()),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("secret-jwt"));
    }
}

//! Application configuration
//!
//! Settings are layered: `$CONFIG_DIR/rwsheets/config.toml` first, then `.env` and
//! the process environment, then command-line flags (applied by the CLI).

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;

use crate::api::auth::SCOPE_SPREADSHEETS;
use crate::api::config::ClientConfig;

/// Environment variables understood by the loader
pub mod env_vars {
    pub const CREDENTIALS: &str = "CREDENTIALS";
    pub const TOKEN: &str = "TOKEN";
    pub const SSID: &str = "SSID";
    pub const GID: &str = "GID";
    pub const SAMPLE_DATA: &str = "SAMPLE_DATA";
    /// Comma or whitespace separated OAuth scopes
    pub const SCOPES: &str = "RWSHEETS_SCOPES";
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the OAuth client-secret file
    pub credentials: Option<PathBuf>,
    /// Path to the cached token file
    pub token: Option<PathBuf>,
    pub scopes: Vec<String>,
    pub spreadsheet_id: Option<String>,
    pub sheet_id: Option<i64>,
    pub sample_data: Option<PathBuf>,
    pub client: ClientSection,
}

/// `[client]` table
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientSection {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
}

impl Config {
    /// Load the config file (if any), `.env` (if any), and the environment
    pub fn load() -> Result<Self> {
        let mut config = match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => debug!("No .env file found"),
            Err(e) => return Err(e).context("Failed to load .env file"),
        }

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Override settings with environment values, looked up through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(env_vars::CREDENTIALS) {
            self.credentials = Some(PathBuf::from(v));
        }
        if let Some(v) = get(env_vars::TOKEN) {
            self.token = Some(PathBuf::from(v));
        }
        if let Some(v) = get(env_vars::SSID) {
            self.spreadsheet_id = Some(v);
        }
        if let Some(v) = get(env_vars::GID) {
            let gid = v
                .trim()
                .parse::<i64>()
                .with_context(|| format!("Failed to parse sheet GID '{}' as an integer", v))?;
            self.sheet_id = Some(gid);
        }
        if let Some(v) = get(env_vars::SAMPLE_DATA) {
            self.sample_data = Some(PathBuf::from(v));
        }
        if let Some(v) = get(env_vars::SCOPES) {
            self.scopes = v
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        Ok(())
    }

    /// Configured scopes, or the read/write spreadsheets scope
    pub fn scopes(&self) -> Vec<String> {
        if self.scopes.is_empty() {
            vec![SCOPE_SPREADSHEETS.to_string()]
        } else {
            self.scopes.clone()
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut builder = ClientConfig::builder();
        if let Some(url) = &self.client.base_url {
            builder = builder.base_url(url.clone());
        }
        if let Some(secs) = self.client.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(retries) = self.client.max_retries {
            builder = builder.max_retries(retries);
        }
        builder.build()
    }
}

/// `$CONFIG_DIR/rwsheets/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rwsheets").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_parse_toml() {
        let config = Config::from_toml_str(
            r#"
            credentials = "/etc/rwsheets/credentials.json"
            token = "/var/lib/rwsheets/token.json"
            scopes = ["https://www.googleapis.com/auth/spreadsheets.readonly"]
            spreadsheet_id = "abc"
            sheet_id = 12

            [client]
            timeout_secs = 5
            max_retries = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.credentials, Some(PathBuf::from("/etc/rwsheets/credentials.json")));
        assert_eq!(config.sheet_id, Some(12));
        assert_eq!(config.client.timeout_secs, Some(5));

        let client = config.client_config();
        assert_eq!(client.timeout, Duration::from_secs(5));
        assert_eq!(client.retry.max_attempts, 4);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = Config::from_toml_str(r#"spreadsheet_id = "from-file""#).unwrap();
        config
            .apply_env(lookup(&[
                ("SSID", "from-env"),
                ("GID", " 99 "),
                ("TOKEN", "token.json"),
                ("CREDENTIALS", ""),
                ("RWSHEETS_SCOPES", "a, b c"),
            ]))
            .unwrap();

        assert_eq!(config.spreadsheet_id.as_deref(), Some("from-env"));
        assert_eq!(config.sheet_id, Some(99));
        assert_eq!(config.token, Some(PathBuf::from("token.json")));
        // Empty values are ignored
        assert!(config.credentials.is_none());
        assert_eq!(config.scopes, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_invalid_gid() {
        let mut config = Config::default();
        let err = config.apply_env(lookup(&[("GID", "sheet1")])).unwrap_err();
        assert!(err.to_string().contains("GID"));
    }

    #[test]
    fn test_default_scopes() {
        assert_eq!(Config::default().scopes(), vec![SCOPE_SPREADSHEETS.to_string()]);
    }

    #[test]
    fn test_default_client_config() {
        let client = Config::default().client_config();
        assert_eq!(client.base_url, crate::api::config::DEFAULT_BASE_URL);
    }
}

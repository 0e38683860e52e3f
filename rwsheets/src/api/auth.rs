//! OAuth2 authentication for the Sheets API
//!
//! Implements the "installed application" flow: client credentials come from the
//! JSON file downloaded from the Google Cloud console, tokens are cached in a local
//! token file and refreshed with the stored refresh token when they expire.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::{Result, SheetsError};

/// See, edit, create, and delete all of your Google Drive files
pub const SCOPE_DRIVE: &str = "https://www.googleapis.com/auth/drive";
/// See, edit, create, and delete only the specific Google Drive files you use with this app
pub const SCOPE_DRIVE_FILE: &str = "https://www.googleapis.com/auth/drive.file";
/// See and download all your Google Drive files
pub const SCOPE_DRIVE_READONLY: &str = "https://www.googleapis.com/auth/drive.readonly";
/// See, edit, create, and delete all your Google Sheets spreadsheets
pub const SCOPE_SPREADSHEETS: &str = "https://www.googleapis.com/auth/spreadsheets";
/// See all your Google Sheets spreadsheets
pub const SCOPE_SPREADSHEETS_READONLY: &str =
    "https://www.googleapis.com/auth/spreadsheets.readonly";

/// Opaque state sent with the consent URL
const AUTH_STATE: &str = "state-token";
/// Tokens this close to expiry are refreshed before use
const EXPIRY_SKEW_SECS: i64 = 60;

/// Client configuration parsed from a Google client-secret file
#[derive(Clone, PartialEq)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CredentialFile {
    installed: Option<CredentialSection>,
    web: Option<CredentialSection>,
}

#[derive(Debug, Deserialize)]
struct CredentialSection {
    client_id: String,
    client_secret: String,
    auth_uri: String,
    token_uri: String,
    #[serde(default)]
    redirect_uris: Vec<String>,
}

impl std::fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("token_uri", &self.token_uri)
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}

impl OAuthConfig {
    /// Parse the client-secret JSON (`installed` or `web` application)
    pub fn from_json(json: &[u8], scopes: &[&str]) -> Result<Self> {
        let file: CredentialFile = serde_json::from_slice(json)
            .map_err(|e| SheetsError::Config(format!("invalid credential json: {}", e)))?;

        let section = file.installed.or(file.web).ok_or_else(|| {
            SheetsError::Config("credential file has no 'installed' or 'web' section".to_string())
        })?;

        let redirect_uri = section.redirect_uris.into_iter().next().ok_or_else(|| {
            SheetsError::Config("credential file has no redirect uri".to_string())
        })?;

        Ok(Self {
            client_id: section.client_id,
            client_secret: section.client_secret,
            auth_uri: section.auth_uri,
            token_uri: section.token_uri,
            redirect_uri,
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Read and parse a client-secret file
    pub fn from_file(path: &Path, scopes: &[&str]) -> Result<Self> {
        let contents = fs::read(path).map_err(|source| {
            warn!("Unable to read client secret file {}: {}", path.display(), source);
            SheetsError::ReadCredentials {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_json(&contents, scopes)
    }

    /// URL the user visits to grant access and obtain an authorization code
    pub fn auth_code_url(&self) -> String {
        format!(
            "{}?access_type=offline&client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            self.auth_uri,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(&self.scopes.join(" ")),
            AUTH_STATE,
        )
    }
}

/// Cached OAuth token, as stored in the token file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl Token {
    /// A token without expiry is treated as valid
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) => expiry - Duration::seconds(EXPIRY_SKEW_SECS) <= now,
            None => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenResponse {
    fn into_token(self, previous_refresh: Option<String>) -> Token {
        Token {
            access_token: self.access_token,
            token_type: self.token_type.unwrap_or_else(default_token_type),
            refresh_token: self.refresh_token.or(previous_refresh),
            expiry: self.expires_in.map(|secs| Utc::now() + Duration::seconds(secs)),
        }
    }
}

/// Load a token from a local file
pub fn read_token(path: &Path) -> Result<Token> {
    let contents = fs::read(path).map_err(|source| SheetsError::ReadToken {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&contents)?)
}

/// Save a token to a file, readable only by the owner on unix
pub fn save_token(path: &Path, token: &Token) -> Result<()> {
    info!("Saving token file to: {}", path.display());

    let json = serde_json::to_vec(token)?;

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let to_err = |source: std::io::Error| SheetsError::SaveToken {
        path: path.to_path_buf(),
        source,
    };
    let mut file = options.open(path).map_err(to_err)?;
    file.write_all(&json).map_err(to_err)?;
    Ok(())
}

/// Source of the authorization code during the consent flow.
///
/// Implementations may block; the authenticator calls them on tokio's blocking pool.
pub trait CodePrompt: Send + Sync {
    fn authorization_code(&self, auth_url: &str) -> Result<String>;
}

/// Prints the consent URL and reads the code from the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl CodePrompt for TerminalPrompt {
    fn authorization_code(&self, auth_url: &str) -> Result<String> {
        println!(
            "Go to the following link in your browser then type the authorization code:\n{}",
            auth_url
        );

        let code: String = dialoguer::Input::new()
            .with_prompt("Authorization code")
            .interact_text()
            .map_err(|e| SheetsError::Prompt(e.to_string()))?;

        Ok(code.trim().to_string())
    }
}

/// Anything that can hand out a bearer token for API calls
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String>;
}

/// A fixed token, useful for short-lived scripts and tests
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Token provider backed by a client-secret file and a cached token file
pub struct Authenticator {
    http: reqwest::Client,
    config: OAuthConfig,
    token_file: PathBuf,
    token: Mutex<Token>,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("client_id", &self.config.client_id)
            .field("token_file", &self.token_file)
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    /// Load credentials and token, running the consent flow if no usable token is cached
    pub async fn new(
        credential_file: impl AsRef<Path>,
        token_file: impl AsRef<Path>,
        scopes: &[&str],
        prompt: Arc<dyn CodePrompt>,
    ) -> Result<Self> {
        let config = OAuthConfig::from_file(credential_file.as_ref(), scopes)?;
        Self::with_config(config, token_file, prompt).await
    }

    pub async fn with_config(
        config: OAuthConfig,
        token_file: impl AsRef<Path>,
        prompt: Arc<dyn CodePrompt>,
    ) -> Result<Self> {
        let http = reqwest::Client::new();
        let token_file = token_file.as_ref().to_path_buf();

        let token = match read_token(&token_file) {
            Ok(token) => token,
            Err(e) => {
                debug!("No usable cached token ({}), starting consent flow", e);
                let auth_url = config.auth_code_url();
                let code = tokio::task::spawn_blocking(move || prompt.authorization_code(&auth_url))
                    .await
                    .map_err(|e| SheetsError::Prompt(e.to_string()))??;
                let token = exchange_code(&http, &config, &code).await?;
                if let Err(e) = save_token(&token_file, &token) {
                    warn!("{}", e);
                }
                token
            }
        };

        Ok(Self {
            http,
            config,
            token_file,
            token: Mutex::new(token),
        })
    }

    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    async fn refresh(&self, current: &Token) -> Result<Token> {
        let refresh_token = current.refresh_token.clone().ok_or_else(|| {
            SheetsError::Config("token expired and no refresh token is available".to_string())
        })?;

        debug!("Refreshing access token at {}", self.config.token_uri);
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("refresh_token", refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];
        let response = request_token(&self.http, &self.config.token_uri, &params).await?;
        let token = response.into_token(Some(refresh_token));

        if let Err(e) = save_token(&self.token_file, &token) {
            warn!("{}", e);
        }
        Ok(token)
    }
}

#[async_trait]
impl TokenProvider for Authenticator {
    async fn access_token(&self) -> Result<String> {
        let mut token = self.token.lock().await;
        if token.is_expired() {
            let refreshed = self.refresh(&token).await?;
            *token = refreshed;
        }
        Ok(token.access_token.clone())
    }
}

async fn exchange_code(http: &reqwest::Client, config: &OAuthConfig, code: &str) -> Result<Token> {
    let params = [
        ("code", code),
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("redirect_uri", config.redirect_uri.as_str()),
        ("grant_type", "authorization_code"),
    ];
    let response = request_token(http, &config.token_uri, &params).await?;
    Ok(response.into_token(None))
}

async fn request_token(
    http: &reqwest::Client,
    token_uri: &str,
    params: &[(&str, &str)],
) -> Result<TokenResponse> {
    let response = http.post(token_uri).form(params).send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("error_description")
                    .or_else(|| v.get("error"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or(body);
        return Err(SheetsError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response.json().await?)
}

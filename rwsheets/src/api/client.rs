//! Sheets API client
//!
//! `SheetsApi` is the seam the read/update operations are written against;
//! `SheetsClient` is the reqwest-backed implementation talking to Google.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use super::auth::{Authenticator, TerminalPrompt, TokenProvider};
use super::config::ClientConfig;
use super::models::{BatchUpdateSpreadsheetRequest, BatchUpdateSpreadsheetResponse, Spreadsheet};
use crate::error::{Result, SheetsError};

/// The subset of the Sheets API used by this crate
#[async_trait]
pub trait SheetsApi: Send + Sync {
    /// `GET /v4/spreadsheets/{id}`
    async fn get_spreadsheet(
        &self,
        spreadsheet_id: &str,
        ranges: &[String],
        include_grid_data: bool,
    ) -> Result<Spreadsheet>;

    /// `POST /v4/spreadsheets/{id}:batchUpdate`
    async fn batch_update(
        &self,
        spreadsheet_id: &str,
        request: &BatchUpdateSpreadsheetRequest,
    ) -> Result<BatchUpdateSpreadsheetResponse>;
}

/// Authenticated handle to the Sheets API
#[derive(Clone)]
pub struct SheetsClient {
    http: reqwest::Client,
    config: ClientConfig,
    auth: Arc<dyn TokenProvider>,
}

impl std::fmt::Debug for SheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SheetsClient {
    pub fn new(auth: Arc<dyn TokenProvider>, config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { http, config, auth })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn spreadsheet_url(&self, spreadsheet_id: &str) -> String {
        format!(
            "{}/{}",
            self.config.spreadsheets_url(),
            urlencoding::encode(spreadsheet_id)
        )
    }

    /// Send a request, retrying throttled and server errors per the retry config
    async fn execute<T, F>(&self, build: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn(&reqwest::Client) -> RequestBuilder + Send + Sync,
    {
        let retry = &self.config.retry;
        let mut attempt = 1;

        loop {
            let token = self.auth.access_token().await?;
            let result = match build(&self.http).bearer_auth(token).send().await {
                Ok(response) => parse_response(response).await,
                Err(e) => Err(SheetsError::Http(e)),
            };

            match result {
                Err(e) if e.is_retryable() && attempt < retry.max_attempts => {
                    let delay = retry.delay_for(attempt);
                    warn!(
                        "Sheets request failed (attempt {}/{}), retrying in {:?}: {}",
                        attempt, retry.max_attempts, delay, e
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}

async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();
    Err(SheetsError::Api {
        status: status.as_u16(),
        message: api_error_message(status, &body),
    })
}

/// Extract `error.message` from a Google error payload, falling back to the raw body
fn api_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body.to_string()
            }
        })
}

#[async_trait]
impl SheetsApi for SheetsClient {
    async fn get_spreadsheet(
        &self,
        spreadsheet_id: &str,
        ranges: &[String],
        include_grid_data: bool,
    ) -> Result<Spreadsheet> {
        let url = self.spreadsheet_url(spreadsheet_id);
        let mut query: Vec<(&str, String)> =
            ranges.iter().map(|r| ("ranges", r.clone())).collect();
        query.push(("includeGridData", include_grid_data.to_string()));

        debug!("GET {} ranges={:?} includeGridData={}", url, ranges, include_grid_data);
        self.execute(|http| http.get(&url).query(&query)).await
    }

    async fn batch_update(
        &self,
        spreadsheet_id: &str,
        request: &BatchUpdateSpreadsheetRequest,
    ) -> Result<BatchUpdateSpreadsheetResponse> {
        let url = format!("{}:batchUpdate", self.spreadsheet_url(spreadsheet_id));

        debug!("POST {} ({} requests)", url, request.requests.len());
        self.execute(|http| http.post(&url).json(request)).await
    }
}

/// Create a new Sheets client from a client-secret file and a token file.
///
/// When the token file does not exist yet, the consent flow runs in the terminal and
/// the resulting token is written to `token_file`. If you change the scopes, delete
/// the previously saved token file.
pub async fn new_sheets_client(
    credential_file: impl AsRef<Path>,
    token_file: impl AsRef<Path>,
    scopes: &[&str],
) -> Result<SheetsClient> {
    new_sheets_client_with_config(credential_file, token_file, scopes, ClientConfig::default())
        .await
}

pub async fn new_sheets_client_with_config(
    credential_file: impl AsRef<Path>,
    token_file: impl AsRef<Path>,
    scopes: &[&str],
    config: ClientConfig,
) -> Result<SheetsClient> {
    let auth =
        Authenticator::new(credential_file, token_file, scopes, Arc::new(TerminalPrompt)).await?;
    SheetsClient::new(Arc::new(auth), config)
}

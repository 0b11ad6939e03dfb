//! Pluggy HTTP client
//!
//! Token exchange, connect-token issuance and cursor-paginated listings.
//! Nothing is cached: every call goes to the network.

use std::fmt;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::config::{Config, Credentials};
use crate::domain::DateWindow;

use super::error::PluggyError;
use super::models::{
    AuthRequest, AuthResponse, ConnectToken, ConnectTokenRequest, Page, Record, Resource,
};

/// Timeout for POST /auth and POST /connect_token
const AUTH_TIMEOUT: Duration = Duration::from_secs(15);

/// Timeout for each listing page
const LIST_TIMEOUT: Duration = Duration::from_secs(20);

const DEFAULT_PAGE_SIZE: u32 = 500;
const DEFAULT_MAX_PAGES: usize = 100;

/// Short-lived Pluggy API key, valid for the request that acquired it
#[derive(Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// Pluggy API client
#[derive(Debug, Clone)]
pub struct PluggyClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
    page_size: u32,
    max_pages: usize,
}

impl PluggyClient {
    /// Create a client with default pagination settings
    pub fn new(credentials: Credentials, base_url: &str) -> Result<Self, PluggyError> {
        let http = Client::builder().build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        })
    }

    /// Create a client from application configuration
    pub fn from_config(config: &Config) -> Result<Self, PluggyError> {
        Ok(Self::new(config.credentials.clone(), &config.pluggy_base_url)?
            .with_page_size(config.page_size)
            .with_max_pages(config.max_pages))
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // =========================================================================
    // Token Provider
    // =========================================================================

    /// Exchange the client credentials for an access token (POST /auth)
    pub async fn acquire_token(&self) -> Result<AccessToken, PluggyError> {
        if !self.credentials.is_complete() {
            return Err(PluggyError::MissingCredentials);
        }

        let response = self
            .http
            .post(self.url("/auth"))
            .timeout(AUTH_TIMEOUT)
            .json(&AuthRequest {
                client_id: self.credentials.client_id(),
                client_secret: self.credentials.client_secret(),
            })
            .send()
            .await?;

        let (status, body) = read_body(response).await?;
        if !status.is_success() {
            tracing::warn!(status = %status, "Pluggy rejected token exchange");
            return Err(PluggyError::AuthRejected { status, body });
        }

        let auth: AuthResponse = parse_body("authentication", &body)?;
        match auth.api_key.filter(|key| !key.is_empty()) {
            Some(key) => {
                tracing::debug!("Acquired Pluggy access token");
                Ok(AccessToken::new(key))
            }
            None => Err(PluggyError::MissingApiKey),
        }
    }

    // =========================================================================
    // Connect-Token Issuer
    // =========================================================================

    /// Issue a widget token for `user_id` (POST /connect_token).
    ///
    /// `item_id` opens the widget in update mode for an existing connection.
    pub async fn create_connect_token(
        &self,
        token: &AccessToken,
        user_id: &str,
        item_id: Option<&str>,
    ) -> Result<ConnectToken, PluggyError> {
        const OPERATION: &str = "connect token creation";

        let response = self
            .http
            .post(self.url("/connect_token"))
            .bearer_auth(token.expose())
            .timeout(AUTH_TIMEOUT)
            .json(&ConnectTokenRequest {
                client_user_id: user_id,
                item_id,
            })
            .send()
            .await?;

        let (status, body) = read_body(response).await?;
        if !status.is_success() {
            return Err(PluggyError::Upstream {
                operation: OPERATION,
                status,
                body,
            });
        }

        let raw: serde_json::Value = parse_body(OPERATION, &body)?;
        ConnectToken::from_payload(raw).ok_or_else(|| PluggyError::MalformedResponse {
            operation: OPERATION,
            reason: "missing accessToken".to_string(),
        })
    }

    // =========================================================================
    // Paginated Fetcher
    // =========================================================================

    /// Fetch every page of `resource` for a connection, in request order.
    ///
    /// A failure on any page fails the whole call; records from earlier
    /// pages are dropped. At most `max_pages` requests are issued.
    pub async fn fetch_all(
        &self,
        token: &AccessToken,
        resource: Resource,
        item_id: &str,
        window: Option<&DateWindow>,
    ) -> Result<Vec<Record>, PluggyError> {
        let url = self.url(resource.path());
        let page_size = self.page_size.to_string();
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;

        for page_number in 1..=self.max_pages {
            let mut request = self
                .http
                .get(&url)
                .bearer_auth(token.expose())
                .timeout(LIST_TIMEOUT)
                .query(&[("itemId", item_id), ("pageSize", page_size.as_str())]);
            if let Some(window) = window {
                request = request.query(&window.query_params());
            }
            if let Some(cursor) = cursor.as_deref() {
                request = request.query(&[("cursor", cursor)]);
            }

            let (status, body) = read_body(request.send().await?).await?;
            if !status.is_success() {
                tracing::warn!(
                    resource = %resource,
                    page = page_number,
                    status = %status,
                    "Pluggy listing page failed"
                );
                return Err(PluggyError::Upstream {
                    operation: resource.operation(),
                    status,
                    body,
                });
            }

            let page: Page = parse_body(resource.operation(), &body)?;
            let next = page.continuation().map(str::to_string);

            tracing::debug!(
                resource = %resource,
                page = page_number,
                records = page.len(),
                has_next = next.is_some(),
                "Fetched Pluggy page"
            );

            records.extend(page.into_results());

            match next {
                Some(next) => cursor = Some(next),
                None => return Ok(records),
            }
        }

        Err(PluggyError::PageLimitExceeded {
            resource,
            max_pages: self.max_pages,
        })
    }
}

/// Read status and body text from a response
async fn read_body(response: Response) -> Result<(StatusCode, String), PluggyError> {
    let status = response.status();
    let body = response.text().await?;
    Ok((status, body))
}

fn parse_body<T: DeserializeOwned>(operation: &'static str, body: &str) -> Result<T, PluggyError> {
    serde_json::from_str(body).map_err(|e| PluggyError::MalformedResponse {
        operation,
        reason: e.to_string(),
    })
}

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    catalog::{Catalog, CatalogType},
    config::CatalogConfig,
    Error, Result,
};

#[derive(Debug, Deserialize)]
struct TokenGrant {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Client-credential access to a Spotify-compatible Web API.
///
/// The access token is shared by every request. Refresh happens while the
/// lock is held, so concurrent callers on an expired token wait for a single
/// exchange instead of each running their own.
pub struct SpotifyGateway {
    client: Client,
    config: CatalogConfig,
    token: Mutex<Option<AccessToken>>,
}

impl SpotifyGateway {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            token: Mutex::new(None),
        }
    }

    async fn ensure_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref().filter(|token| token.is_fresh()) {
            return Ok(token.value.clone());
        }

        let token = self.exchange_credentials().await?;
        let value = token.value.clone();
        *cached = Some(token);

        Ok(value)
    }

    async fn exchange_credentials(&self) -> Result<AccessToken> {
        tracing::debug!("Requesting a new catalog access token");

        let response = self
            .client
            .post(&self.config.token_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(transport_failure)?;

        if !response.status().is_success() {
            return Err(upstream_failure(response).await);
        }

        let grant: TokenGrant = response.json().await.map_err(transport_failure)?;

        Ok(AccessToken {
            value: grant.access_token,
            expires_at: Instant::now() + Duration::from_secs(grant.expires_in),
        })
    }

    async fn get(&self, url: Url, query: &[(&str, String)]) -> Result<reqwest::Response> {
        let token = self.ensure_token().await?;

        self.client
            .get(url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .map_err(transport_failure)
    }

    fn api_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.config.api_url).map_err(|e| Error::CatalogFailure {
            message: format!("invalid catalog url: {e}"),
        })?;

        url.path_segments_mut()
            .map_err(|_| Error::CatalogFailure {
                message: "catalog url cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }
}

#[async_trait]
impl Catalog for SpotifyGateway {
    async fn search(
        &self,
        query: &str,
        types: &[CatalogType],
        limit: u64,
        offset: u64,
    ) -> Result<Value> {
        let types = types
            .iter()
            .map(|kind| kind.as_ref())
            .collect::<Vec<&str>>()
            .join(",");

        let url = self.api_url(&["search"])?;
        let response = self
            .get(
                url,
                &[
                    ("q", query.to_string()),
                    ("type", types),
                    ("limit", limit.to_string()),
                    ("offset", offset.to_string()),
                ],
            )
            .await?;

        read_body(response).await
    }

    async fn fetch_element(&self, id: &str, kind: CatalogType) -> Result<Value> {
        let collection = kind.collection();
        let url = self.api_url(&[collection.as_str(), id])?;
        let response = self.get(url, &[]).await?;

        read_body(response).await
    }

    async fn validate_id(&self, id: &str, kind: CatalogType) -> bool {
        let collection = kind.collection();
        let response = match self.api_url(&[collection.as_str(), id]) {
            Ok(url) => self.get(url, &[]).await,
            Err(e) => Err(e),
        };

        match response {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::warn!(%id, kind = %kind, status = %response.status(), "catalog id rejected");
                false
            }
            Err(e) => {
                tracing::warn!(%id, kind = %kind, "catalog id probe failed: {e}");
                false
            }
        }
    }
}

async fn read_body(response: reqwest::Response) -> Result<Value> {
    if !response.status().is_success() {
        return Err(upstream_failure(response).await);
    }

    response.json().await.map_err(transport_failure)
}

/// Extracts the provider's message from `{error:{message}}` or an OAuth `{error, error_description}` body.
async fn upstream_failure(response: reqwest::Response) -> Error {
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    let message = body
        .pointer("/error/message")
        .and_then(Value::as_str)
        .or_else(|| body.get("error_description").and_then(Value::as_str))
        .or_else(|| body.get("error").and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string());

    tracing::warn!(%status, "catalog request failed: {message}");

    Error::CatalogFailure { message }
}

fn transport_failure(err: reqwest::Error) -> Error {
    tracing::warn!("catalog transport error: {err}");
    Error::CatalogFailure {
        message: err.to_string(),
    }
}

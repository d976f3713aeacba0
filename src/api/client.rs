//! HTTP client for the card service.
//!
//! Three GET endpoints, all answering JSON:
//!
//! | Resource       | Query             | Body                         |
//! |----------------|-------------------|------------------------------|
//! | `games`        |                   | `{"games": [..]}`            |
//! | `autocomplete` | `q`, `limit`, `game?` | `{"suggestions": [..]}`  |
//! | `search`       | `q`, `limit`, `game?` | `{"cards": [..], "total"?}` |
//!
//! Extra keys in a body are ignored. A missing required key is a
//! [`ClientError::MalformedResponse`].

use crate::api::endpoint::ApiEndpoint;
use crate::model::{Card, ClientError, GameId};
use crate::state::SearchPayload;
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Remote card service.
///
/// Implemented over HTTP by [`HttpCardApi`]; tests substitute an in-memory
/// implementation.
#[async_trait]
pub trait CardApi: Send + Sync {
    /// Every game identifier the service knows, in server order.
    async fn games(&self) -> Result<Vec<GameId>, ClientError>;

    /// Up to `limit` completions for `query`.
    async fn autocomplete(
        &self,
        query: &str,
        limit: usize,
        game: Option<&GameId>,
    ) -> Result<Vec<String>, ClientError>;

    /// Up to `limit` cards matching `query`, in rank order.
    async fn search(
        &self,
        query: &str,
        limit: usize,
        game: Option<&GameId>,
    ) -> Result<SearchPayload, ClientError>;
}

// ===== Wire types =====

#[derive(Debug, Deserialize)]
struct GamesResponse {
    games: Vec<GameId>,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    cards: Vec<Card>,
    #[serde(default)]
    total: Option<u64>,
}

/// URL of a query endpoint with parameters in wire order: `q`, `limit`, `game`.
pub fn query_url(
    endpoint: &ApiEndpoint,
    resource: &str,
    query: &str,
    limit: usize,
    game: Option<&GameId>,
) -> Url {
    let mut url = endpoint.resource(resource);
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("q", query);
        pairs.append_pair("limit", &limit.to_string());
        if let Some(game) = game {
            pairs.append_pair("game", game.as_str());
        }
    }
    url
}

/// Decode a response body, mapping failures to `MalformedResponse`.
fn decode<T: DeserializeOwned>(url: &Url, body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::MalformedResponse {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

fn transport_reason(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    }
}

// ===== HttpCardApi =====

/// [`CardApi`] over HTTP using `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpCardApi {
    endpoint: ApiEndpoint,
    http: reqwest::Client,
}

impl HttpCardApi {
    /// Create a client rooted at `endpoint`.
    ///
    /// `timeout` bounds each request end to end; `None` waits indefinitely.
    pub fn new(endpoint: ApiEndpoint, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            endpoint,
            http: builder.build()?,
        })
    }

    pub fn endpoint(&self) -> &ApiEndpoint {
        &self.endpoint
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        debug!(url = %url, "Sending request");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                url: url.to_string(),
                reason: transport_reason(&e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Read text first so decode errors can name the URL
        let body = response.text().await.map_err(|e| ClientError::Transport {
            url: url.to_string(),
            reason: transport_reason(&e),
        })?;

        debug!(url = %url, bytes = body.len(), "Response received");
        decode(&url, &body)
    }
}

#[async_trait]
impl CardApi for HttpCardApi {
    async fn games(&self) -> Result<Vec<GameId>, ClientError> {
        let url = self.endpoint.resource("games");
        let response: GamesResponse = self.get_json(url).await?;
        Ok(response.games)
    }

    async fn autocomplete(
        &self,
        query: &str,
        limit: usize,
        game: Option<&GameId>,
    ) -> Result<Vec<String>, ClientError> {
        let url = query_url(&self.endpoint, "autocomplete", query, limit, game);
        let response: AutocompleteResponse = self.get_json(url).await?;
        Ok(response.suggestions)
    }

    async fn search(
        &self,
        query: &str,
        limit: usize,
        game: Option<&GameId>,
    ) -> Result<SearchPayload, ClientError> {
        let url = query_url(&self.endpoint, "search", query, limit, game);
        let response: SearchResponse = self.get_json(url).await?;
        Ok(SearchPayload {
            cards: response.cards,
            total: response.total,
        })
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

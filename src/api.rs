#![cfg(feature = "std")]

//! The game server as seen by the client: where snapshots come from and
//! where commands go.

use crate::domain::Snapshot;
use crate::protocol::{ApiRequest, Method, ServerResponse};
use crate::wire;
use anyhow::{anyhow, Context};
use log::{debug, info};
use std::time::Duration;

/// Supplies fresh game state.
#[async_trait::async_trait]
pub trait StateSource: Send + Sync {
    async fn fetch_snapshot(&mut self) -> anyhow::Result<Snapshot>;
}

/// Accepts player commands.
#[async_trait::async_trait]
pub trait CommandSink: Send + Sync {
    async fn submit(&mut self, request: ApiRequest) -> anyhow::Result<ServerResponse>;
}

/// REST client for the game server. One request at a time, no retries.
pub struct HttpGameClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpGameClient {
    /// `timeout` of `None` waits on the server indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: builder.build().context("building HTTP client")?,
        })
    }

    pub fn url(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.base_url, request.path())
    }

    /// Sends `request`. Anything but a 2xx reply is an error.
    pub async fn send(&self, request: &ApiRequest) -> anyhow::Result<ServerResponse> {
        let url = self.url(request);
        let builder = match request.method() {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Delete => self.http.delete(&url),
        };
        let builder = match request.body() {
            Some(body) => builder.json(&body),
            None => builder,
        };

        let reply = builder
            .send()
            .await
            .with_context(|| format!("{} {}", request.method(), url))?;
        let status = reply.status();
        let body = reply
            .text()
            .await
            .with_context(|| format!("reading reply to {} {}", request.method(), url))?;
        if !status.is_success() {
            return Err(anyhow!(
                "{} {} returned {}: {}",
                request.method(),
                url,
                status,
                body
            ));
        }
        Ok(ServerResponse::new(status.as_u16(), body))
    }

    async fn fetch_json(&self, request: ApiRequest) -> anyhow::Result<serde_json::Value> {
        let response = self.send(&request).await?;
        response
            .json()
            .with_context(|| format!("{} did not return JSON", request))
    }
}

#[async_trait::async_trait]
impl StateSource for HttpGameClient {
    async fn fetch_snapshot(&mut self) -> anyhow::Result<Snapshot> {
        let game = wire::decode_game(&self.fetch_json(ApiRequest::FetchGame).await?)?;
        let units = wire::decode_units(&self.fetch_json(ApiRequest::FetchUnits).await?)?;
        let targets = wire::decode_targets(&self.fetch_json(ApiRequest::FetchTargets).await?)?;
        debug!(
            "refreshed: map radius {}, {} units, {} targets",
            game.map_radius,
            units.len(),
            targets.len()
        );
        Ok(Snapshot { game, units, targets })
    }
}

#[async_trait::async_trait]
impl CommandSink for HttpGameClient {
    async fn submit(&mut self, request: ApiRequest) -> anyhow::Result<ServerResponse> {
        let response = self.send(&request).await?;
        info!("{} -> {}", request, response.status);
        Ok(response)
    }
}

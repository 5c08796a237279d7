//! Name-resolution gateway client module.
//!
//! # Usage
//!
//! ```rust,no_run
//! use gateway::libs::gateway_client::{
//!     Client, ClientConfig, HttpConfig,
//!     api::{Api, Network},
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = Client::from_config(ClientConfig {
//!         host: "https://gateway.example".to_owned(),
//!         http_config: HttpConfig::default(),
//!     })?;
//!
//!     let address: Option<String> = client
//!         .get(Api::Address(Network::Evm), &[("name", "vitalik.eth")], 5_000)
//!         .await?;
//!     println!("{address:?}");
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use anyhow::{Context, bail};
use engine::ResolverError;
use reqwest::{
    Method, Response, StatusCode,
    header::{CONTENT_TYPE, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;
use url::Url;

use crate::libs::gateway_client::{api::Api, models::Envelope};

/// Configuration for the gateway client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the gateway, without a trailing slash.
    pub host: String,
    pub http_config: HttpConfig,
}

#[derive(Clone, Debug)]
pub struct Client {
    host: String,
    inner_client: reqwest::Client,
}

impl Client {
    pub fn from_config(conf: ClientConfig) -> anyhow::Result<Self> {
        let host = conf.host.trim_end_matches('/').to_owned();
        if host.is_empty() {
            bail!("Gateway host cannot be empty");
        }
        Url::parse(&host).with_context(|| format!("Invalid gateway host {host:?}"))?;

        let http = conf.http_config;
        let inner_client = reqwest::Client::builder()
            .connect_timeout(http.connect_timeout)
            .pool_idle_timeout(http.pool_idle_timeout)
            .pool_max_idle_per_host(http.pool_max_idle_per_host)
            .tcp_keepalive(http.tcp_keepalive)
            .build()
            .context("Failed to build gateway http client")?;

        Ok(Self { host, inner_client })
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Performs a GET request and unwraps the gateway envelope.
    ///
    /// A positive `timeout_ms` bounds the whole request; zero or negative
    /// values send it without a per-request timeout.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: Api,
        query: &[(&str, &str)],
        timeout_ms: i64,
    ) -> Result<Option<T>, ResolverError> {
        self.process_request(Method::GET, path, query, None, timeout_ms)
            .await
    }

    /// Performs a POST request with a JSON body and unwraps the gateway envelope.
    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: Api,
        body: &B,
        timeout_ms: i64,
    ) -> Result<Option<T>, ResolverError> {
        let body = serde_json::to_string(body)
            .map_err(|e| ResolverError::Malformed(format!("request body: {e}")))?;
        self.process_request(Method::POST, path, &[], Some(body), timeout_ms)
            .await
    }

    async fn process_request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: Api,
        query: &[(&str, &str)],
        body: Option<String>,
        timeout_ms: i64,
    ) -> Result<Option<T>, ResolverError> {
        let url = self.build_url(&path, query)?;
        debug!(%method, %url, timeout_ms, "gateway request");

        let mut req_builder = self.inner_client.request(method, url);

        if let Some(timeout) = request_timeout(timeout_ms) {
            req_builder = req_builder.timeout(timeout);
        }

        if let Some(body) = body {
            req_builder = req_builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| transport_error(&e, timeout_ms))?;

        response_handler(response, timeout_ms).await
    }

    fn build_url(&self, path: &Api, query: &[(&str, &str)]) -> Result<Url, ResolverError> {
        let mut url = Url::parse(&format!("{}{}", self.host, path.as_str()))
            .map_err(|e| ResolverError::Transport(e.to_string()))?;

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }
}

/// Per-request timeout for a positive value only.
fn request_timeout(timeout_ms: i64) -> Option<Duration> {
    u64::try_from(timeout_ms)
        .ok()
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
}

fn transport_error(e: &reqwest::Error, timeout_ms: i64) -> ResolverError {
    if e.is_timeout() {
        timeout_error(timeout_ms, e)
    } else if e.is_decode() {
        ResolverError::Malformed(e.to_string())
    } else {
        ResolverError::Transport(e.to_string())
    }
}

/// Only a request sent with a per-request timeout can report it. Without one
/// the timer that fired is the client's connect timeout.
fn timeout_error(timeout_ms: i64, cause: &dyn std::fmt::Display) -> ResolverError {
    if request_timeout(timeout_ms).is_some() {
        ResolverError::Timeout(timeout_ms)
    } else {
        ResolverError::Transport(format!("Connection timed out: {cause}"))
    }
}

/// Reads the envelope from a response.
///
/// Error statuses that still carry a rejection envelope surface its message;
/// anything else becomes a transport error naming the status.
async fn response_handler<T: DeserializeOwned>(
    resp: Response,
    timeout_ms: i64,
) -> Result<Option<T>, ResolverError> {
    let status = resp.status();
    let body = resp
        .bytes()
        .await
        .map_err(|e| transport_error(&e, timeout_ms))?;

    match status {
        StatusCode::OK => serde_json::from_slice::<Envelope<T>>(&body)
            .map_err(|e| ResolverError::Malformed(e.to_string()))?
            .into_result(),
        code => {
            if let Ok(envelope) = serde_json::from_slice::<Envelope<serde_json::Value>>(&body)
                && envelope.code != 0
            {
                return Err(ResolverError::Rejected(envelope.msg));
            }

            Err(match code {
                StatusCode::INTERNAL_SERVER_ERROR => {
                    ResolverError::Transport("Internal Server Error".to_owned())
                }
                StatusCode::SERVICE_UNAVAILABLE => {
                    ResolverError::Transport("Service Unavailable".to_owned())
                }
                code => ResolverError::Transport(format!(
                    "Error {code}: {}",
                    String::from_utf8_lossy(&body)
                )),
            })
        }
    }
}

/// HTTP configuration for the client.
///
/// There is no client-wide request timeout: each call brings its own.
#[derive(Clone, Debug)]
pub struct HttpConfig {
    pub connect_timeout: Duration,
    pub pool_idle_timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub tcp_keepalive: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(120),
            pool_max_idle_per_host: 5,
            tcp_keepalive: Duration::from_secs(120),
        }
    }
}

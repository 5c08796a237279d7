use std::time::Duration;

use anyhow::{Context, bail};
use engine::Validatable;
use serde::Deserialize;
use url::Url;

use crate::libs::gateway_client::HttpConfig;

const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;

/// Gateway connection settings.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api_url: String,
    /// Fallback RPC endpoint for EVM lookups when a case does not set one.
    pub evm_rpc_url: Option<String>,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_connect_timeout_ms() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_MS
}

impl Config {
    #[must_use]
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            ..HttpConfig::default()
        }
    }
}

impl Validatable for Config {
    fn validate(&mut self) -> anyhow::Result<()> {
        self.api_url = self.api_url.trim().trim_end_matches('/').to_owned();
        if self.api_url.is_empty() {
            bail!("Gateway api_url cannot be empty");
        }
        Url::parse(&self.api_url)
            .with_context(|| format!("Invalid gateway api_url {:?}", self.api_url))?;

        let rpc_url = self
            .evm_rpc_url
            .take()
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty());
        if let Some(url) = &rpc_url {
            Url::parse(url).with_context(|| format!("Invalid evm_rpc_url {url:?}"))?;
        }
        self.evm_rpc_url = rpc_url;

        if self.connect_timeout_ms == 0 {
            bail!("connect_timeout_ms must be positive");
        }

        Ok(())
    }
}

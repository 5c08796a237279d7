use async_trait::async_trait;
use engine::{
    BatchEntry, BatchQuery, EvmNameResolver, NameResolver, PaymentChain, PaymentIdResolver,
    ResolverError,
};
use serde_json::Value;

use crate::libs::gateway_client::{
    Client,
    api::{Api, Network},
};

/// Forward and reverse lookups for one network through the gateway.
///
/// The EVM instance also serves metadata, content hash and batch reverse
/// lookups, and forwards its RPC endpoint as `rpcUrl`.
#[derive(Clone, Debug)]
pub struct GatewayResolver {
    client: Client,
    network: Network,
    rpc_url: Option<String>,
}

impl GatewayResolver {
    #[must_use]
    pub fn new(client: Client, network: Network, rpc_url: Option<String>) -> Self {
        Self {
            client,
            network,
            rpc_url,
        }
    }

    async fn lookup<T: serde::de::DeserializeOwned>(
        &self,
        path: Api,
        key: &str,
        value: &str,
        timeout_ms: i64,
    ) -> Result<Option<T>, ResolverError> {
        let mut query = vec![(key, value)];
        if let Some(rpc_url) = &self.rpc_url {
            query.push(("rpcUrl", rpc_url.as_str()));
        }
        self.client.get(path, &query, timeout_ms).await
    }
}

#[async_trait]
impl NameResolver for GatewayResolver {
    async fn get_address(
        &self,
        domain: &str,
        timeout_ms: i64,
    ) -> Result<Option<String>, ResolverError> {
        self.lookup(Api::Address(self.network), "name", domain, timeout_ms)
            .await
    }

    async fn get_domain_name(
        &self,
        address: &str,
        timeout_ms: i64,
    ) -> Result<Option<String>, ResolverError> {
        self.lookup(Api::Name(self.network), "address", address, timeout_ms)
            .await
    }
}

#[async_trait]
impl EvmNameResolver for GatewayResolver {
    async fn get_metadata(
        &self,
        name: &str,
        timeout_ms: i64,
    ) -> Result<Option<Value>, ResolverError> {
        self.lookup(Api::Metadata, "name", name, timeout_ms).await
    }

    async fn get_content_hash(
        &self,
        name: &str,
        timeout_ms: i64,
    ) -> Result<Option<String>, ResolverError> {
        self.lookup(Api::ContentHash, "name", name, timeout_ms)
            .await
    }

    async fn batch_get_domain_name_by_chain_id(
        &self,
        mut query: BatchQuery,
    ) -> Result<Vec<BatchEntry>, ResolverError> {
        if query.rpc_url.is_none() {
            query.rpc_url.clone_from(&self.rpc_url);
        }

        let entries: Option<Vec<BatchEntry>> = self
            .client
            .post(Api::BatchNames, &query, query.timeout_ms)
            .await?;

        Ok(entries.unwrap_or_default())
    }
}

/// PaymentID lookups. The gateway route takes no timeout.
#[derive(Clone, Debug)]
pub struct PaymentIdService {
    client: Client,
}

impl PaymentIdService {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PaymentIdResolver for PaymentIdService {
    async fn get_address(
        &self,
        name: &str,
        chain: PaymentChain,
    ) -> Result<Option<String>, ResolverError> {
        let chain_id = chain.id().to_string();
        self.client
            .get(
                Api::PaymentIdAddress,
                &[("name", name), ("chainId", chain_id.as_str())],
                0,
            )
            .await
    }
}

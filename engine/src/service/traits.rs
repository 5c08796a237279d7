use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    enums::{Method, PaymentChain, Protocol},
    error::{DispatchError, ResolverError},
    model::request::ResolutionRequest,
};

/// A trait for types that require internal consistency checks and parameter initialization.
///
/// This trait is primarily used by configuration structures to ensure that all
/// provided values are within valid ranges before the harness starts.
pub trait Validatable {
    /// Validates the internal state of the object.
    fn validate(&mut self) -> anyhow::Result<()>;
}

/// Forward and reverse lookups every name service offers.
///
/// `Ok(None)` means the service answered and has no mapping.
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn get_address(
        &self,
        domain: &str,
        timeout_ms: i64,
    ) -> Result<Option<String>, ResolverError>;

    async fn get_domain_name(
        &self,
        address: &str,
        timeout_ms: i64,
    ) -> Result<Option<String>, ResolverError>;
}

/// Extra lookups only the EVM resolver provides.
#[async_trait]
pub trait EvmNameResolver: NameResolver {
    async fn get_metadata(&self, name: &str, timeout_ms: i64)
    -> Result<Option<Value>, ResolverError>;

    async fn get_content_hash(
        &self,
        name: &str,
        timeout_ms: i64,
    ) -> Result<Option<String>, ResolverError>;

    async fn batch_get_domain_name_by_chain_id(
        &self,
        query: BatchQuery,
    ) -> Result<Vec<BatchEntry>, ResolverError>;
}

/// Identifier-to-address lookup. The underlying service takes no timeout.
#[async_trait]
pub trait PaymentIdResolver: Send + Sync {
    async fn get_address(
        &self,
        name: &str,
        chain: PaymentChain,
    ) -> Result<Option<String>, ResolverError>;
}

/// Arguments of a batch reverse lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchQuery {
    pub address_list: Vec<String>,
    pub query_chain_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
    #[serde(skip)]
    pub timeout_ms: i64,
}

/// One row of a batch reverse lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub address: String,
    #[serde(default)]
    pub domain: Option<String>,
}

/// Uniform call surface over one protocol's resolver.
#[async_trait]
pub trait ResolverAdapter: Send + Sync {
    fn protocol(&self) -> Protocol;

    /// Runs `method` with the inputs from `request`.
    async fn invoke(
        &self,
        method: Method,
        request: &ResolutionRequest,
    ) -> Result<Option<Value>, DispatchError>;
}

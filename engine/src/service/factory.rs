use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    enums::Protocol,
    error::ResolverError,
    service::traits::{EvmNameResolver, NameResolver, PaymentIdResolver},
};

/// Builds a service of type `T` from a provider-specific configuration.
#[async_trait]
pub trait ServiceFactory<T: ?Sized> {
    type Config;
    async fn from_config(config: &Self::Config) -> anyhow::Result<Arc<T>>;
}

/// Per-call settings handed to a resolver when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolverOptions {
    pub timeout_ms: i64,
    pub rpc_url: Option<String>,
}

/// Creates resolver handles for each protocol.
///
/// Handles are requested per invocation, mirroring how the client libraries
/// are constructed with the call's timeout and RPC endpoint.
pub trait ResolverFactory: Send + Sync {
    fn evm(&self, options: &ResolverOptions) -> Result<Arc<dyn EvmNameResolver>, ResolverError>;

    /// Resolver for Solana, Sei or Injective names.
    fn name_service(
        &self,
        protocol: Protocol,
        options: &ResolverOptions,
    ) -> Result<Arc<dyn NameResolver>, ResolverError>;

    fn payment_id(&self) -> Result<Arc<dyn PaymentIdResolver>, ResolverError>;
}

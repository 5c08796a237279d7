use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    enums::{Method, Protocol},
    error::{DispatchError, ValidationError},
    model::request::{PaymentIdRequest, ResolutionRequest},
    service::{
        factory::{ResolverFactory, ResolverOptions},
        traits::{BatchQuery, EvmNameResolver, NameResolver, PaymentIdResolver, ResolverAdapter},
    },
};

/// Creates the adapter for the request's protocol, with a resolver configured
/// for this call's timeout and RPC endpoint.
pub fn adapter_for(
    factory: &dyn ResolverFactory,
    request: &ResolutionRequest,
) -> Result<Box<dyn ResolverAdapter>, DispatchError> {
    let options = ResolverOptions {
        timeout_ms: request.timeout_ms,
        rpc_url: request.rpc_url.clone(),
    };

    let adapter: Box<dyn ResolverAdapter> = match request.protocol {
        Protocol::Evm => Box::new(EvmAdapter::new(factory.evm(&options)?)),
        protocol @ (Protocol::Solana | Protocol::Sei | Protocol::Injective) => Box::new(
            NameServiceAdapter::new(protocol, factory.name_service(protocol, &options)?),
        ),
        Protocol::PaymentId => Box::new(PaymentIdAdapter::new(factory.payment_id()?)),
    };

    Ok(adapter)
}

fn unsupported(protocol: Protocol, method: Method) -> DispatchError {
    ValidationError::UnsupportedMethod { protocol, method }.into()
}

/// EVM names: forward, reverse, batch reverse, metadata and content hash.
pub struct EvmAdapter {
    resolver: Arc<dyn EvmNameResolver>,
}

impl EvmAdapter {
    #[must_use]
    pub fn new(resolver: Arc<dyn EvmNameResolver>) -> Self {
        Self { resolver }
    }

    /// Reverse-resolves the request's address on `chain_id` and keeps only the
    /// first entry of the answer. A zero or missing chain id is rejected
    /// before the resolver is called.
    async fn batch_domain_name(
        &self,
        request: &ResolutionRequest,
    ) -> Result<Option<Value>, DispatchError> {
        let query_chain_id = request
            .chain_id
            .filter(|id| *id != 0)
            .ok_or(ValidationError::MissingChainId)?;

        let entries = self
            .resolver
            .batch_get_domain_name_by_chain_id(BatchQuery {
                address_list: vec![request.address.clone()],
                query_chain_id,
                rpc_url: request.rpc_url.clone(),
                timeout_ms: request.timeout_ms,
            })
            .await?;

        Ok(entries
            .into_iter()
            .next()
            .and_then(|entry| entry.domain)
            .map(Value::String))
    }
}

#[async_trait]
impl ResolverAdapter for EvmAdapter {
    fn protocol(&self) -> Protocol {
        Protocol::Evm
    }

    async fn invoke(
        &self,
        method: Method,
        request: &ResolutionRequest,
    ) -> Result<Option<Value>, DispatchError> {
        let timeout = request.timeout_ms;
        let value = match method {
            Method::GetAddress => self
                .resolver
                .get_address(&request.domain, timeout)
                .await?
                .map(Value::String),
            Method::GetDomainName => self
                .resolver
                .get_domain_name(&request.address, timeout)
                .await?
                .map(Value::String),
            Method::GetMetadata => self.resolver.get_metadata(&request.domain, timeout).await?,
            Method::GetContentHash => self
                .resolver
                .get_content_hash(&request.domain, timeout)
                .await?
                .map(Value::String),
            Method::BatchGetDomainNameByChainId => self.batch_domain_name(request).await?,
        };
        Ok(value)
    }
}

/// Solana, Sei and Injective names share one call shape: forward and reverse
/// lookups only.
pub struct NameServiceAdapter {
    protocol: Protocol,
    resolver: Arc<dyn NameResolver>,
}

impl NameServiceAdapter {
    #[must_use]
    pub fn new(protocol: Protocol, resolver: Arc<dyn NameResolver>) -> Self {
        Self { protocol, resolver }
    }
}

#[async_trait]
impl ResolverAdapter for NameServiceAdapter {
    fn protocol(&self) -> Protocol {
        self.protocol
    }

    async fn invoke(
        &self,
        method: Method,
        request: &ResolutionRequest,
    ) -> Result<Option<Value>, DispatchError> {
        let value = match method {
            Method::GetAddress => {
                self.resolver
                    .get_address(&request.domain, request.timeout_ms)
                    .await?
            }
            Method::GetDomainName => {
                self.resolver
                    .get_domain_name(&request.address, request.timeout_ms)
                    .await?
            }
            other => return Err(unsupported(self.protocol, other)),
        };
        Ok(value.map(Value::String))
    }
}

/// PaymentID identifiers reached through the main dispatcher. The chain id
/// comes from the request and is required; the timeout is not forwarded.
pub struct PaymentIdAdapter {
    resolver: Arc<dyn PaymentIdResolver>,
}

impl PaymentIdAdapter {
    #[must_use]
    pub fn new(resolver: Arc<dyn PaymentIdResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl ResolverAdapter for PaymentIdAdapter {
    fn protocol(&self) -> Protocol {
        Protocol::PaymentId
    }

    async fn invoke(
        &self,
        method: Method,
        request: &ResolutionRequest,
    ) -> Result<Option<Value>, DispatchError> {
        if method != Method::GetAddress {
            return Err(unsupported(Protocol::PaymentId, method));
        }

        let chain_id = request
            .chain_id
            .ok_or(ValidationError::MissingPaymentChain)?;
        let payment_request = PaymentIdRequest {
            domain: request.domain.clone(),
            chain_id,
        };

        resolve_payment_id(self.resolver.as_ref(), &payment_request).await
    }
}

/// Validates a PaymentID request and resolves it.
pub async fn resolve_payment_id(
    resolver: &dyn PaymentIdResolver,
    request: &PaymentIdRequest,
) -> Result<Option<Value>, DispatchError> {
    let chain = request.validate()?;
    Ok(resolver
        .get_address(&request.domain, chain)
        .await?
        .map(Value::String))
}

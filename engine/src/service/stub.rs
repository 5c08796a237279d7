//! Recording resolver doubles for dispatcher and adapter tests.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::Notify;

use crate::{
    enums::{Method, PaymentChain, Protocol},
    error::ResolverError,
    runtime::clock::ManualClock,
    service::{
        factory::{ResolverFactory, ResolverOptions},
        traits::{BatchEntry, BatchQuery, EvmNameResolver, NameResolver, PaymentIdResolver},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubCall {
    pub method: Method,
    pub input: String,
    pub timeout_ms: i64,
}

/// Shared behavior of both stubs: optional gate to hold a call in flight and
/// optional clock tick to simulate latency.
#[derive(Default, Clone)]
pub struct Latency {
    pub gate: Option<Arc<Notify>>,
    pub tick: Option<(Arc<ManualClock>, Duration)>,
}

impl Latency {
    async fn wait(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some((clock, by)) = &self.tick {
            clock.advance(*by);
        }
    }
}

pub struct StubResolver {
    reply: Mutex<Result<Option<String>, ResolverError>>,
    metadata: Mutex<Option<Value>>,
    batch: Mutex<Vec<BatchEntry>>,
    pub calls: Mutex<Vec<StubCall>>,
    pub batch_queries: Mutex<Vec<BatchQuery>>,
    latency: Latency,
}

impl StubResolver {
    pub fn new() -> Self {
        Self {
            reply: Mutex::new(Ok(None)),
            metadata: Mutex::new(None),
            batch: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            batch_queries: Mutex::new(Vec::new()),
            latency: Latency::default(),
        }
    }

    pub fn with_reply(self, reply: Result<Option<&str>, ResolverError>) -> Self {
        *self.reply.lock() = reply.map(|v| v.map(str::to_owned));
        self
    }

    pub fn with_metadata(self, metadata: Value) -> Self {
        *self.metadata.lock() = Some(metadata);
        self
    }

    pub fn with_batch(self, entries: Vec<BatchEntry>) -> Self {
        *self.batch.lock() = entries;
        self
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    async fn record(&self, method: Method, input: &str, timeout_ms: i64) {
        self.calls.lock().push(StubCall {
            method,
            input: input.to_owned(),
            timeout_ms,
        });
        self.latency.wait().await;
    }

    fn reply(&self) -> Result<Option<String>, ResolverError> {
        self.reply.lock().clone()
    }
}

#[async_trait]
impl NameResolver for StubResolver {
    async fn get_address(
        &self,
        domain: &str,
        timeout_ms: i64,
    ) -> Result<Option<String>, ResolverError> {
        self.record(Method::GetAddress, domain, timeout_ms).await;
        self.reply()
    }

    async fn get_domain_name(
        &self,
        address: &str,
        timeout_ms: i64,
    ) -> Result<Option<String>, ResolverError> {
        self.record(Method::GetDomainName, address, timeout_ms)
            .await;
        self.reply()
    }
}

#[async_trait]
impl EvmNameResolver for StubResolver {
    async fn get_metadata(
        &self,
        name: &str,
        timeout_ms: i64,
    ) -> Result<Option<Value>, ResolverError> {
        self.record(Method::GetMetadata, name, timeout_ms).await;
        self.reply()?;
        Ok(self.metadata.lock().clone())
    }

    async fn get_content_hash(
        &self,
        name: &str,
        timeout_ms: i64,
    ) -> Result<Option<String>, ResolverError> {
        self.record(Method::GetContentHash, name, timeout_ms).await;
        self.reply()
    }

    async fn batch_get_domain_name_by_chain_id(
        &self,
        query: BatchQuery,
    ) -> Result<Vec<BatchEntry>, ResolverError> {
        let input = query.address_list.join(",");
        self.record(Method::BatchGetDomainNameByChainId, &input, query.timeout_ms)
            .await;
        self.batch_queries.lock().push(query);
        self.reply()?;
        Ok(self.batch.lock().clone())
    }
}

pub struct StubPaymentResolver {
    reply: Mutex<Result<Option<String>, ResolverError>>,
    pub calls: Mutex<Vec<(String, PaymentChain)>>,
    latency: Latency,
}

impl StubPaymentResolver {
    pub fn new() -> Self {
        Self {
            reply: Mutex::new(Ok(None)),
            calls: Mutex::new(Vec::new()),
            latency: Latency::default(),
        }
    }

    pub fn with_reply(self, reply: Result<Option<&str>, ResolverError>) -> Self {
        *self.reply.lock() = reply.map(|v| v.map(str::to_owned));
        self
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl PaymentIdResolver for StubPaymentResolver {
    async fn get_address(
        &self,
        name: &str,
        chain: PaymentChain,
    ) -> Result<Option<String>, ResolverError> {
        self.calls.lock().push((name.to_owned(), chain));
        self.latency.wait().await;
        self.reply.lock().clone()
    }
}

/// Hands out the same stubs for every protocol and records each creation.
pub struct StubFactory {
    pub resolver: Arc<StubResolver>,
    pub payment: Arc<StubPaymentResolver>,
    pub created: Mutex<Vec<(Protocol, ResolverOptions)>>,
}

impl StubFactory {
    pub fn new(resolver: StubResolver, payment: StubPaymentResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
            payment: Arc::new(payment),
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn with_resolver(resolver: StubResolver) -> Self {
        Self::new(resolver, StubPaymentResolver::new())
    }

    pub fn with_payment(payment: StubPaymentResolver) -> Self {
        Self::new(StubResolver::new(), payment)
    }

    /// Calls that reached any external resolver.
    pub fn external_calls(&self) -> usize {
        self.resolver.call_count() + self.payment.call_count()
    }
}

impl ResolverFactory for StubFactory {
    fn evm(&self, options: &ResolverOptions) -> Result<Arc<dyn EvmNameResolver>, ResolverError> {
        self.created.lock().push((Protocol::Evm, options.clone()));
        Ok(self.resolver.clone())
    }

    fn name_service(
        &self,
        protocol: Protocol,
        options: &ResolverOptions,
    ) -> Result<Arc<dyn NameResolver>, ResolverError> {
        self.created.lock().push((protocol, options.clone()));
        Ok(self.resolver.clone())
    }

    fn payment_id(&self) -> Result<Arc<dyn PaymentIdResolver>, ResolverError> {
        self.created
            .lock()
            .push((Protocol::PaymentId, ResolverOptions::default()));
        Ok(self.payment.clone())
    }
}

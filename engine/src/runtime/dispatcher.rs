use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    enums::{Method, Protocol},
    error::{DispatchError, DispatcherBusy},
    model::{
        outcome::ResolutionOutcome,
        request::{PaymentIdRequest, ResolutionRequest},
    },
    registry::{PROTOCOL_REGISTRY, ProtocolRegistry},
    runtime::{
        clock::{Clock, SystemClock},
        metrics::METRICS,
        state::{DispatchState, StateCell},
    },
    service::{
        adapter::{adapter_for, resolve_payment_id},
        factory::ResolverFactory,
    },
};

/// Shown when a PaymentID lookup succeeds without an address.
pub const PAYMENT_ID_NOT_FOUND: &str = "Address not found for this PaymentID domain and selected chain";

/// Runs one resolution at a time against the protocol chosen by the request.
///
/// Each run goes through the registry check, the protocol adapter and the
/// resolver, and always ends in a [`ResolutionOutcome`]. A run started while
/// another is in flight is refused with [`DispatcherBusy`] and leaves the
/// current state alone.
pub struct Dispatcher {
    registry: ProtocolRegistry,
    factory: Arc<dyn ResolverFactory>,
    clock: Arc<dyn Clock>,
    state: StateCell<ResolutionRequest>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(factory: Arc<dyn ResolverFactory>) -> Self {
        Self {
            registry: PROTOCOL_REGISTRY.clone(),
            factory,
            clock: Arc::new(SystemClock),
            state: StateCell::new(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_registry(mut self, registry: ProtocolRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &ProtocolRegistry {
        &self.registry
    }

    #[must_use]
    pub fn state(&self) -> DispatchState<ResolutionRequest> {
        self.state.get()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.is_running()
    }

    #[must_use]
    pub fn last_outcome(&self) -> Option<ResolutionOutcome> {
        self.state.get().outcome().cloned()
    }

    pub async fn run(&self, request: ResolutionRequest) -> Result<ResolutionOutcome, DispatcherBusy> {
        let guard = self.state.begin(request.clone())?;
        let request_id = Uuid::new_v4();

        debug!(
            %request_id,
            protocol = %request.protocol,
            method = %request.method,
            input = request.input(),
            timeout_ms = request.timeout_ms,
            chain_id = ?request.chain_id,
            "dispatching resolution"
        );

        let start = self.clock.now();
        let result = self.resolve(&request).await;
        let outcome = ResolutionOutcome::from_result(result, self.clock.elapsed_ms(start));

        report(request_id, request.protocol, request.method, &outcome);
        guard.finish(outcome.clone());

        Ok(outcome)
    }

    async fn resolve(&self, request: &ResolutionRequest) -> Result<Option<Value>, DispatchError> {
        self.registry.validate(request.protocol, request.method)?;

        let adapter = adapter_for(self.factory.as_ref(), request)?;
        adapter.invoke(request.method, request).await
    }
}

/// Resolves PaymentID identifiers independently of the main [`Dispatcher`].
///
/// Owns its own state, so a PaymentID lookup can run while a main resolution
/// is in flight. An empty answer is a success.
pub struct PaymentIdDispatcher {
    factory: Arc<dyn ResolverFactory>,
    clock: Arc<dyn Clock>,
    state: StateCell<PaymentIdRequest>,
}

impl PaymentIdDispatcher {
    #[must_use]
    pub fn new(factory: Arc<dyn ResolverFactory>) -> Self {
        Self {
            factory,
            clock: Arc::new(SystemClock),
            state: StateCell::new(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn state(&self) -> DispatchState<PaymentIdRequest> {
        self.state.get()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.is_running()
    }

    #[must_use]
    pub fn last_outcome(&self) -> Option<ResolutionOutcome> {
        self.state.get().outcome().cloned()
    }

    pub async fn run(&self, request: PaymentIdRequest) -> Result<ResolutionOutcome, DispatcherBusy> {
        let guard = self.state.begin(request.clone())?;
        let request_id = Uuid::new_v4();

        debug!(
            %request_id,
            domain = %request.domain,
            chain_id = request.chain_id,
            "dispatching payment id resolution"
        );

        let start = self.clock.now();
        let result = self.resolve(&request).await;
        let outcome = ResolutionOutcome::from_result(result, self.clock.elapsed_ms(start));

        report(request_id, Protocol::PaymentId, Method::GetAddress, &outcome);
        guard.finish(outcome.clone());

        Ok(outcome)
    }

    async fn resolve(&self, request: &PaymentIdRequest) -> Result<Option<Value>, DispatchError> {
        let resolver = self.factory.payment_id()?;
        resolve_payment_id(resolver.as_ref(), request).await
    }
}

fn report(request_id: Uuid, protocol: Protocol, method: Method, outcome: &ResolutionOutcome) {
    match outcome {
        ResolutionOutcome::Success { value, elapsed_ms } => info!(
            %request_id,
            %protocol,
            %method,
            elapsed_ms,
            found = value.is_some(),
            "resolution finished"
        ),
        ResolutionOutcome::Failure {
            message,
            elapsed_ms,
        } => warn!(
            %request_id,
            %protocol,
            %method,
            elapsed_ms,
            error = %message,
            "resolution failed"
        ),
    }

    METRICS.record_resolution(protocol.as_ref(), method.as_ref(), outcome);
}

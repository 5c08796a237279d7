use serde::Serialize;

use crate::{
    enums::{Method, PaymentChain, Protocol, TimeoutPreset},
    error::ValidationError,
};

/// Immutable snapshot of everything a single main dispatch needs.
///
/// Built once when the run starts; later changes to the selection it came
/// from never reach an in-flight call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionRequest {
    pub protocol: Protocol,
    pub method: Method,
    pub domain: String,
    pub address: String,
    pub chain_id: Option<i64>,
    /// Forwarded verbatim, including zero and negative values.
    pub timeout_ms: i64,
    pub rpc_url: Option<String>,
}

impl ResolutionRequest {
    #[must_use]
    pub fn new(protocol: Protocol, method: Method) -> Self {
        Self {
            protocol,
            method,
            domain: String::new(),
            address: String::new(),
            chain_id: None,
            timeout_ms: TimeoutPreset::Normal.millis(),
            rpc_url: None,
        }
    }

    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    #[must_use]
    pub fn with_chain_id(mut self, chain_id: Option<i64>) -> Self {
        self.chain_id = chain_id;
        self
    }

    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: i64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    #[must_use]
    pub fn with_rpc_url(mut self, rpc_url: Option<String>) -> Self {
        self.rpc_url = rpc_url;
        self
    }

    /// The value the selected method consumes: an address for reverse lookups,
    /// a domain otherwise.
    #[must_use]
    pub fn input(&self) -> &str {
        if self.method.takes_address() {
            &self.address
        } else {
            &self.domain
        }
    }
}

/// Input of the PaymentID sub-dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIdRequest {
    /// Identifier in `user@provider` form.
    pub domain: String,
    pub chain_id: i64,
}

impl PaymentIdRequest {
    #[must_use]
    pub fn new(domain: impl Into<String>, chain: PaymentChain) -> Self {
        Self {
            domain: domain.into(),
            chain_id: i64::from(chain.id()),
        }
    }

    /// Checks the identifier shape and resolves the chain id.
    pub fn validate(&self) -> Result<PaymentChain, ValidationError> {
        let well_formed = self
            .domain
            .split_once('@')
            .is_some_and(|(user, provider)| {
                !user.trim().is_empty() && !provider.trim().is_empty() && !provider.contains('@')
            });

        if !well_formed {
            return Err(ValidationError::InvalidPaymentIdDomain(self.domain.clone()));
        }

        PaymentChain::from_id(self.chain_id)
            .ok_or(ValidationError::UnknownPaymentChain(self.chain_id))
    }
}

use crate::enums::{Method, Protocol};

/// Fallback text for failures that carry no message of their own.
pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// A local precondition failed. Raised before any resolver is called.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Method {method} is not supported by the {protocol} protocol")]
    UnsupportedMethod { protocol: Protocol, method: Method },
    #[error("Chain ID is required for batchGetDomainNameByChainId")]
    MissingChainId,
    #[error("Chain ID is required for PaymentID resolution")]
    MissingPaymentChain,
    #[error("Unknown PaymentID chain id: {0}")]
    UnknownPaymentChain(i64),
    #[error("Invalid PaymentID domain {0:?}, expected user@provider")]
    InvalidPaymentIdDomain(String),
}

/// Rejection reported by an external resolver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolverError {
    #[error("Request timed out after {0}ms")]
    Timeout(i64),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Malformed response: {0}")]
    Malformed(String),
    /// Message passed through from the resolver as is, possibly empty.
    #[error("{0}")]
    Rejected(String),
}

/// Everything that can turn a dispatch into a `Failure` outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Resolver(#[from] ResolverError),
}

impl DispatchError {
    /// User-facing message, falling back to [`UNKNOWN_ERROR`] when empty.
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_ERROR.to_owned()
        } else {
            message
        }
    }

    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// A dispatcher refused a run because its previous one is still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("A resolution is already in progress")]
pub struct DispatcherBusy;

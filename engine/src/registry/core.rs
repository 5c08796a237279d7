use ahash::AHashMap;

use crate::{
    enums::{Method, Protocol},
    error::ValidationError,
};

/// Method set assumed for any protocol without an explicit entry.
pub const DEFAULT_METHODS: &[Method] = &[Method::GetAddress];

/// Static description of what a protocol's resolver can do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolDescriptor {
    pub id: Protocol,
    pub supported_methods: Vec<Method>,
    pub supports_timeout: bool,
}

impl ProtocolDescriptor {
    #[must_use]
    pub fn new(id: Protocol, supported_methods: Vec<Method>) -> Self {
        Self {
            id,
            supported_methods,
            supports_timeout: true,
        }
    }

    /// Marks the protocol's resolver as ignoring the timeout parameter.
    #[must_use]
    pub fn without_timeout(mut self) -> Self {
        self.supports_timeout = false;
        self
    }
}

/// Lookup table from protocol to its descriptor.
#[derive(Debug, Clone, Default)]
pub struct ProtocolRegistry {
    map: AHashMap<Protocol, ProtocolDescriptor>,
}

impl ProtocolRegistry {
    /// Creates a new, empty registry instance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: AHashMap::new(),
        }
    }

    /// Registers a descriptor, replacing any previous entry for the same protocol.
    pub fn add(&mut self, descriptor: ProtocolDescriptor) {
        self.map.insert(descriptor.id, descriptor);
    }

    #[must_use]
    pub fn descriptor(&self, protocol: Protocol) -> Option<&ProtocolDescriptor> {
        self.map.get(&protocol)
    }

    /// Ordered methods supported by `protocol`. Never empty: unknown protocols
    /// (and descriptors registered without methods) fall back to [`DEFAULT_METHODS`].
    #[must_use]
    pub fn methods_for(&self, protocol: Protocol) -> &[Method] {
        match self.map.get(&protocol) {
            Some(d) if !d.supported_methods.is_empty() => &d.supported_methods,
            _ => DEFAULT_METHODS,
        }
    }

    /// Whether the protocol's resolver honors the timeout parameter. Defaults to true.
    #[must_use]
    pub fn supports_timeout(&self, protocol: Protocol) -> bool {
        self.map.get(&protocol).is_none_or(|d| d.supports_timeout)
    }

    #[must_use]
    pub fn supports(&self, protocol: Protocol, method: Method) -> bool {
        self.methods_for(protocol).contains(&method)
    }

    /// First supported method, used when a selection has to be reset.
    #[must_use]
    pub fn first_method(&self, protocol: Protocol) -> Method {
        self.methods_for(protocol)
            .first()
            .copied()
            .unwrap_or(Method::GetAddress)
    }

    /// Fails with [`ValidationError::UnsupportedMethod`] for an invalid pairing.
    pub fn validate(&self, protocol: Protocol, method: Method) -> Result<(), ValidationError> {
        if self.supports(protocol, method) {
            Ok(())
        } else {
            Err(ValidationError::UnsupportedMethod { protocol, method })
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::registry::PROTOCOL_REGISTRY;

    #[test]
    fn test_every_protocol_supports_get_address() {
        for protocol in Protocol::iter() {
            let methods = PROTOCOL_REGISTRY.methods_for(protocol);
            assert!(!methods.is_empty(), "{protocol} has no methods");
            assert!(methods.contains(&Method::GetAddress));
        }
    }

    #[test]
    fn test_default_table() {
        assert_eq!(PROTOCOL_REGISTRY.methods_for(Protocol::Evm).len(), 5);
        assert_eq!(
            PROTOCOL_REGISTRY.methods_for(Protocol::Sei),
            &[Method::GetAddress, Method::GetDomainName]
        );
        assert_eq!(
            PROTOCOL_REGISTRY.methods_for(Protocol::PaymentId),
            &[Method::GetAddress]
        );
        assert!(PROTOCOL_REGISTRY.supports_timeout(Protocol::Evm));
        assert!(PROTOCOL_REGISTRY.supports_timeout(Protocol::Injective));
        assert!(!PROTOCOL_REGISTRY.supports_timeout(Protocol::PaymentId));
    }

    #[test]
    fn test_missing_entry_falls_back() {
        let mut reg = ProtocolRegistry::new();
        reg.add(ProtocolDescriptor::new(
            Protocol::Evm,
            vec![Method::GetAddress, Method::GetMetadata],
        ));

        assert_eq!(reg.methods_for(Protocol::Injective), DEFAULT_METHODS);
        assert!(reg.supports_timeout(Protocol::Injective));
        assert!(reg.descriptor(Protocol::Injective).is_none());
        assert_eq!(reg.first_method(Protocol::Injective), Method::GetAddress);
    }

    #[test]
    fn test_empty_descriptor_falls_back() {
        let mut reg = ProtocolRegistry::new();
        reg.add(ProtocolDescriptor::new(Protocol::Sei, vec![]));
        assert_eq!(reg.methods_for(Protocol::Sei), DEFAULT_METHODS);
    }

    #[test]
    fn test_validate_pairing() {
        assert!(
            PROTOCOL_REGISTRY
                .validate(Protocol::Evm, Method::GetContentHash)
                .is_ok()
        );
        assert_eq!(
            PROTOCOL_REGISTRY.validate(Protocol::Solana, Method::GetMetadata),
            Err(ValidationError::UnsupportedMethod {
                protocol: Protocol::Solana,
                method: Method::GetMetadata,
            })
        );
        assert!(
            PROTOCOL_REGISTRY
                .validate(Protocol::PaymentId, Method::GetDomainName)
                .is_err()
        );
    }
}

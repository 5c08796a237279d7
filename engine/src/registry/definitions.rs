use crate::{
    enums::{Method, Protocol},
    registry::core::{ProtocolDescriptor, ProtocolRegistry},
};

/// Populates the provided [ProtocolRegistry] with the supported method sets.
///
/// Method order matters: the first entry is what a selection falls back to
/// when the active protocol changes.
///
/// ### Supported Protocols:
/// - **EVM**: forward and reverse lookups, batch reverse lookup, metadata, content hash.
/// - **Solana / Sei / Injective**: forward and reverse lookups.
/// - **PaymentID**: forward lookup only, timeout not honored by the resolver.
pub fn fill_registry(reg: &mut ProtocolRegistry) {
    reg.add(ProtocolDescriptor::new(
        Protocol::Evm,
        vec![
            Method::GetAddress,
            Method::GetDomainName,
            Method::BatchGetDomainNameByChainId,
            Method::GetMetadata,
            Method::GetContentHash,
        ],
    ));

    for protocol in [Protocol::Solana, Protocol::Sei, Protocol::Injective] {
        reg.add(ProtocolDescriptor::new(
            protocol,
            vec![Method::GetAddress, Method::GetDomainName],
        ));
    }

    reg.add(
        ProtocolDescriptor::new(Protocol::PaymentId, vec![Method::GetAddress]).without_timeout(),
    );
}

pub mod core;
pub mod definitions;

pub use core::{DEFAULT_METHODS, ProtocolDescriptor, ProtocolRegistry};

/// Global registry populated with every protocol the harness knows about.
pub static PROTOCOL_REGISTRY: std::sync::LazyLock<ProtocolRegistry> =
    std::sync::LazyLock::new(|| {
        let mut reg = ProtocolRegistry::new();

        definitions::fill_registry(&mut reg);

        reg
    });

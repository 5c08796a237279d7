pub mod enums;
pub mod error;
pub mod model;
pub mod registry;
pub mod runtime;
pub mod service;

pub use enums::{Method, OutcomeStatus, PaymentChain, Protocol, TimeoutPreset};
pub use error::{DispatchError, DispatcherBusy, ResolverError, UNKNOWN_ERROR, ValidationError};
pub use model::{
    cases::{Selection, TestCase, builtin_cases},
    outcome::{NOT_FOUND, ResolutionOutcome},
    request::{PaymentIdRequest, ResolutionRequest},
};
pub use registry::{PROTOCOL_REGISTRY, ProtocolDescriptor, ProtocolRegistry};
pub use runtime::{
    clock::{Clock, ManualClock, SystemClock},
    dispatcher::{Dispatcher, PAYMENT_ID_NOT_FOUND, PaymentIdDispatcher},
    metrics::{METRICS, Metrics},
    state::DispatchState,
};
pub use service::{
    builder::{build_dispatchers, build_with_factory},
    factory::{ResolverFactory, ResolverOptions, ServiceFactory},
    traits::{
        BatchEntry, BatchQuery, EvmNameResolver, NameResolver, PaymentIdResolver, Validatable,
    },
};

use std::sync::Arc;

use crate::{
    ServiceFactory,
    runtime::dispatcher::{Dispatcher, PaymentIdDispatcher},
    service::factory::ResolverFactory,
};

/// Creates the provider's resolver factory and the two dispatchers sharing it.
pub async fn build_dispatchers<P, C>(config: &C) -> anyhow::Result<(Dispatcher, PaymentIdDispatcher)>
where
    P: ServiceFactory<dyn ResolverFactory, Config = C>,
{
    let factory = P::from_config(config).await?;
    Ok(build_with_factory(factory))
}

#[must_use]
pub fn build_with_factory(factory: Arc<dyn ResolverFactory>) -> (Dispatcher, PaymentIdDispatcher) {
    (
        Dispatcher::new(factory.clone()),
        PaymentIdDispatcher::new(factory),
    )
}

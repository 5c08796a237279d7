use std::sync::Arc;

use async_trait::async_trait;
use engine::{
    EvmNameResolver, NameResolver, PaymentIdResolver, Protocol, ResolverError, ResolverFactory,
    ResolverOptions, ServiceFactory,
};
use tracing::debug;

use crate::{
    Config,
    libs::gateway_client::{Client, ClientConfig, api::Network},
    services::resolver::{GatewayResolver, PaymentIdService},
};

pub mod resolver;

/// Hands out gateway-backed resolvers sharing one HTTP client.
pub struct Provider {
    client: Client,
    evm_rpc_url: Option<String>,
}

impl Provider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::from_config(ClientConfig {
            host: config.api_url.clone(),
            http_config: config.http_config(),
        })?;

        Ok(Self {
            client,
            evm_rpc_url: config.evm_rpc_url.clone(),
        })
    }
}

#[async_trait]
impl ServiceFactory<dyn ResolverFactory> for Provider {
    type Config = Config;

    async fn from_config(config: &Config) -> anyhow::Result<Arc<dyn ResolverFactory>> {
        Ok(Arc::new(Self::new(config)?))
    }
}

impl ResolverFactory for Provider {
    fn evm(&self, options: &ResolverOptions) -> Result<Arc<dyn EvmNameResolver>, ResolverError> {
        let rpc_url = options.rpc_url.clone().or_else(|| self.evm_rpc_url.clone());
        debug!(rpc_url = ?rpc_url, "creating evm resolver");

        Ok(Arc::new(GatewayResolver::new(
            self.client.clone(),
            Network::Evm,
            rpc_url,
        )))
    }

    fn name_service(
        &self,
        protocol: Protocol,
        _options: &ResolverOptions,
    ) -> Result<Arc<dyn NameResolver>, ResolverError> {
        let network = Network::from_protocol(protocol).ok_or_else(|| {
            ResolverError::Transport(format!("No gateway route for the {protocol} protocol"))
        })?;

        Ok(Arc::new(GatewayResolver::new(
            self.client.clone(),
            network,
            None,
        )))
    }

    fn payment_id(&self) -> Result<Arc<dyn PaymentIdResolver>, ResolverError> {
        Ok(Arc::new(PaymentIdService::new(self.client.clone())))
    }
}

#[cfg(test)]
mod tests {
    use engine::{Dispatcher, Method, ResolutionRequest};
    use mockito::{Matcher, Server};
    use serde_json::json;

    use super::*;

    fn config(api_url: String) -> Config {
        Config {
            api_url,
            evm_rpc_url: Some("https://eth.example".to_owned()),
            connect_timeout_ms: 1_000,
        }
    }

    #[tokio::test]
    async fn test_from_config() {
        let factory = <Provider as ServiceFactory<dyn ResolverFactory>>::from_config(&config(
            "https://gateway.example".to_owned(),
        ))
        .await;
        assert!(factory.is_ok());

        let factory = <Provider as ServiceFactory<dyn ResolverFactory>>::from_config(&config(
            String::new(),
        ))
        .await;
        assert!(factory.is_err());
    }

    #[test]
    fn test_name_service_rejects_payment_id() {
        let provider = Provider::new(&config("https://gateway.example".to_owned())).unwrap();
        let result = provider.name_service(Protocol::PaymentId, &ResolverOptions::default());
        assert!(matches!(result, Err(ResolverError::Transport(_))));
    }

    #[tokio::test]
    async fn test_dispatch_through_gateway() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/evm/contenthash")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("name".into(), "vitalik.eth".into()),
                Matcher::UrlEncoded("rpcUrl".into(), "https://eth.example".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"code": 0, "data": "ipfs://bafy"}"#)
            .create_async()
            .await;

        let provider = Arc::new(Provider::new(&config(server.url())).unwrap());
        let dispatcher = Dispatcher::new(provider);

        let outcome = dispatcher
            .run(
                ResolutionRequest::new(Protocol::Evm, Method::GetContentHash)
                    .with_domain("vitalik.eth"),
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(outcome.value(), Some(&json!("ipfs://bafy")));
    }

    #[tokio::test]
    async fn test_gateway_rejection_becomes_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/sol/address")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"code": 1, "msg": ""}"#)
            .create_async()
            .await;

        let provider = Arc::new(Provider::new(&config(server.url())).unwrap());
        let dispatcher = Dispatcher::new(provider);

        let outcome = dispatcher
            .run(
                ResolutionRequest::new(Protocol::Solana, Method::GetAddress)
                    .with_domain("bonfida.sol"),
            )
            .await
            .unwrap();

        assert_eq!(outcome.message(), Some(engine::UNKNOWN_ERROR));
    }
}

use serde::Deserialize;

use crate::{
    enums::{Method, Protocol, TimeoutPreset},
    error::ValidationError,
    model::request::ResolutionRequest,
    registry::ProtocolRegistry,
};

/// A named sample input for one protocol.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TestCase {
    pub key: String,
    pub title: String,
    pub protocol: Protocol,
    pub domain: String,
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rpc_url: Option<String>,
    #[serde(default)]
    pub chain_id: Option<i64>,
}

impl TestCase {
    fn builtin(
        key: &str,
        title: &str,
        protocol: Protocol,
        domain: &str,
        address: &str,
        description: &str,
    ) -> Self {
        Self {
            key: key.to_owned(),
            title: title.to_owned(),
            protocol,
            domain: domain.to_owned(),
            address: address.to_owned(),
            description: description.to_owned(),
            rpc_url: None,
            chain_id: None,
        }
    }
}

/// Sample cases shipped with the harness, in display order.
#[must_use]
pub fn builtin_cases() -> Vec<TestCase> {
    vec![
        TestCase::builtin(
            "evm",
            "EVM Test",
            Protocol::Evm,
            "vitalik.eth",
            "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045",
            "Testing EVM name resolution with timeout parameter",
        ),
        TestCase::builtin(
            "arb",
            "Arbitrum Test",
            Protocol::Evm,
            "registry.arb",
            "0x8d27d6235d9d8EFc9Eef0505e745dB67D5cD2918",
            "Testing Arbitrum name resolution",
        ),
        TestCase::builtin(
            "lens",
            "Lens Protocol Test",
            Protocol::Evm,
            "bts_official.lens",
            "0xd80EFA68b50D21E548B9Cdb092eBc6e5BcA113E7",
            "Testing Lens Protocol name resolution",
        ),
        TestCase::builtin(
            "crypto",
            ".crypto Test",
            Protocol::Evm,
            "beresnev.crypto",
            "0x6ec0deed30605bcd19342f3c30201db263291589",
            "Testing .crypto name resolution",
        ),
        TestCase::builtin(
            "solana",
            "Solana Test",
            Protocol::Solana,
            "bonfida.sol",
            "Crf8hzfthWGbGbLTVCiqRqV5MVnbpHB1L9KQMd6gsinb",
            "Testing Solana name resolution with timeout parameter",
        ),
        TestCase::builtin(
            "sei",
            "Sei Test",
            Protocol::Sei,
            "allen.sei",
            "sei1tmew60aj394kdfff0t54lfaelu3p8j8lz93pmf",
            "Testing Sei name resolution with timeout parameter",
        ),
        TestCase::builtin(
            "injective",
            "Injective Test",
            Protocol::Injective,
            "allen.inj",
            "inj1xw0d9lcjjnqq4v3lqk8ek9r0cxwpr4s8dxy44h",
            "Testing Injective name resolution with timeout parameter",
        ),
    ]
}

/// Live selection state of the harness.
///
/// The (protocol, method) pair is kept valid against the registry at all
/// times; [`Selection::snapshot`] freezes it into a request.
#[derive(Debug, Clone)]
pub struct Selection {
    case: TestCase,
    protocol: Protocol,
    method: Method,
    timeout_ms: i64,
    pub custom_domain: String,
    pub custom_address: String,
    pub custom_chain_id: String,
}

impl Selection {
    #[must_use]
    pub fn new(case: TestCase, registry: &ProtocolRegistry) -> Self {
        let protocol = case.protocol;
        Self {
            case,
            protocol,
            method: registry.first_method(protocol),
            timeout_ms: TimeoutPreset::Normal.millis(),
            custom_domain: String::new(),
            custom_address: String::new(),
            custom_chain_id: String::new(),
        }
    }

    #[must_use]
    pub fn case(&self) -> &TestCase {
        &self.case
    }

    #[must_use]
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    #[must_use]
    pub fn timeout_ms(&self) -> i64 {
        self.timeout_ms
    }

    /// Switches to another case, taking over its protocol.
    pub fn select_case(&mut self, case: TestCase, registry: &ProtocolRegistry) {
        let protocol = case.protocol;
        self.case = case;
        self.set_protocol(protocol, registry);
    }

    /// Changes the active protocol. A method the new protocol does not
    /// support is replaced by the protocol's first method.
    pub fn set_protocol(&mut self, protocol: Protocol, registry: &ProtocolRegistry) {
        self.protocol = protocol;
        if !registry.supports(protocol, self.method) {
            self.method = registry.first_method(protocol);
        }
    }

    /// Selects a method, refusing pairs the registry does not allow.
    pub fn select_method(
        &mut self,
        method: Method,
        registry: &ProtocolRegistry,
    ) -> Result<(), ValidationError> {
        registry.validate(self.protocol, method)?;
        self.method = method;
        Ok(())
    }

    pub fn set_timeout_ms(&mut self, timeout_ms: i64) {
        self.timeout_ms = timeout_ms;
    }

    pub fn set_timeout_preset(&mut self, preset: TimeoutPreset) {
        self.timeout_ms = preset.millis();
    }

    /// Freezes the current selection. Non-empty overrides win over the case
    /// defaults; an unparsable chain id override counts as absent.
    #[must_use]
    pub fn snapshot(&self) -> ResolutionRequest {
        let domain = pick(&self.custom_domain, &self.case.domain);
        let address = pick(&self.custom_address, &self.case.address);
        let chain_id = if self.custom_chain_id.trim().is_empty() {
            self.case.chain_id
        } else {
            self.custom_chain_id.trim().parse::<i64>().ok()
        };

        ResolutionRequest::new(self.protocol, self.method)
            .with_domain(domain)
            .with_address(address)
            .with_chain_id(chain_id)
            .with_timeout_ms(self.timeout_ms)
            .with_rpc_url(self.case.rpc_url.clone())
    }
}

fn pick(custom: &str, fallback: &str) -> String {
    if custom.is_empty() {
        fallback.to_owned()
    } else {
        custom.to_owned()
    }
}

use engine::Protocol;
use strum::{AsRefStr, Display};

/// Name service family as addressed by the gateway's route prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Network {
    Evm,
    Sol,
    Sei,
    Inj,
}

impl Network {
    /// Route prefix for a protocol. PaymentID has its own routes.
    #[must_use]
    pub fn from_protocol(protocol: Protocol) -> Option<Self> {
        match protocol {
            Protocol::Evm => Some(Self::Evm),
            Protocol::Solana => Some(Self::Sol),
            Protocol::Sei => Some(Self::Sei),
            Protocol::Injective => Some(Self::Inj),
            _ => None,
        }
    }
}

pub enum Api {
    Address(Network),
    Name(Network),
    Metadata,
    ContentHash,
    BatchNames,
    PaymentIdAddress,
}

impl Api {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Address(network) => match network {
                Network::Evm => "/evm/address",
                Network::Sol => "/sol/address",
                Network::Sei => "/sei/address",
                Network::Inj => "/inj/address",
            },
            Self::Name(network) => match network {
                Network::Evm => "/evm/name",
                Network::Sol => "/sol/name",
                Network::Sei => "/sei/name",
                Network::Inj => "/inj/name",
            },
            Self::Metadata => "/evm/metadata",
            Self::ContentHash => "/evm/contenthash",
            Self::BatchNames => "/evm/batch-names",
            Self::PaymentIdAddress => "/paymentid/address",
        }
    }
}

impl From<Api> for String {
    fn from(item: Api) -> Self {
        item.as_str().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes() {
        assert_eq!(Api::Address(Network::Sol).as_str(), "/sol/address");
        assert_eq!(Api::Name(Network::Inj).as_str(), "/inj/name");
        assert_eq!(String::from(Api::BatchNames), "/evm/batch-names");
        assert_eq!(Api::PaymentIdAddress.as_str(), "/paymentid/address");
    }

    #[test]
    fn test_network_from_protocol() {
        assert_eq!(Network::from_protocol(Protocol::Evm), Some(Network::Evm));
        assert_eq!(Network::from_protocol(Protocol::Sei), Some(Network::Sei));
        assert_eq!(Network::from_protocol(Protocol::PaymentId), None);
        assert_eq!(Network::Sol.to_string(), "sol");
    }
}

use std::fmt::Formatter;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, FromRepr};

use crate::model::outcome::ResolutionOutcome;

/// Naming system family served by its own resolver.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[non_exhaustive]
pub enum Protocol {
    #[default]
    #[strum(serialize = "EVM")]
    #[serde(rename = "EVM", alias = "evm")]
    Evm,
    #[serde(alias = "solana")]
    Solana,
    #[serde(alias = "sei")]
    Sei,
    #[serde(alias = "injective")]
    Injective,
    #[strum(serialize = "PaymentID")]
    #[serde(rename = "PaymentID", alias = "paymentid")]
    PaymentId,
}

/// Resolution operation exposed by the resolvers.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
#[serde(rename_all = "camelCase")]
pub enum Method {
    GetAddress,
    GetDomainName,
    BatchGetDomainNameByChainId,
    GetMetadata,
    GetContentHash,
}

impl Method {
    /// Reverse lookups take an address as input, the rest take a domain.
    #[must_use]
    pub fn takes_address(self) -> bool {
        matches!(self, Self::GetDomainName | Self::BatchGetDomainNameByChainId)
    }
}

/// Target chains for PaymentID resolution, keyed by their numeric id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumIter, FromRepr)]
#[repr(u8)]
pub enum PaymentChain {
    Bitcoin = 0,
    #[default]
    #[strum(serialize = "Ethereum (EVM)")]
    Ethereum = 1,
    Solana = 2,
    Tron = 3,
    Aptos = 4,
    Sui = 5,
}

impl PaymentChain {
    #[must_use]
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Looks up a chain by id, `None` for anything outside `0..=5`.
    #[must_use]
    pub fn from_id(id: i64) -> Option<Self> {
        u8::try_from(id).ok().and_then(Self::from_repr)
    }
}

/// Named timeout values offered by the harness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum TimeoutPreset {
    /// Intentionally short to provoke a timeout.
    VeryShort,
    #[default]
    Normal,
    Long,
    /// Non-positive value, forwarded to the resolver unchanged.
    Invalid,
}

impl TimeoutPreset {
    #[must_use]
    pub fn millis(self) -> i64 {
        match self {
            Self::VeryShort => 100,
            Self::Normal => 5_000,
            Self::Long => 15_000,
            Self::Invalid => -1,
        }
    }
}

/// Coarse classification of a finished resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// Resolver returned a value.
    Found,
    /// Resolver answered but has no mapping.
    NotFound,
    /// Validation or resolver error.
    Failed,
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Found => write!(f, "found"),
            Self::NotFound => write!(f, "not_found"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl From<&ResolutionOutcome> for OutcomeStatus {
    fn from(outcome: &ResolutionOutcome) -> Self {
        match outcome {
            ResolutionOutcome::Success { value: Some(_), .. } => Self::Found,
            ResolutionOutcome::Success { value: None, .. } => Self::NotFound,
            ResolutionOutcome::Failure { .. } => Self::Failed,
        }
    }
}

use std::path::Path;

use anyhow::bail;
use engine::{TestCase, TimeoutPreset, Validatable, builtin_cases};
use serde::Deserialize;
use tools::toml;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    pub gateway: gateway::Config,
    /// Extra cases appended to the built-in presets.
    #[serde(default)]
    pub cases: Vec<TestCase>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: i64,
}

fn default_timeout_ms() -> i64 {
    TimeoutPreset::Normal.millis()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: default_timeout_ms(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        toml::parse_file::<Self>(path)?.validate()
    }

    pub fn validate(mut self) -> anyhow::Result<Self> {
        self.gateway.validate()?;

        let mut keys: Vec<String> = builtin_cases().into_iter().map(|c| c.key).collect();
        for case in &self.cases {
            if case.key.trim().is_empty() {
                bail!("Test case {:?} has an empty key", case.title);
            }
            if keys.contains(&case.key) {
                bail!("Duplicate test case key {:?}", case.key);
            }
            keys.push(case.key.clone());
        }

        Ok(self)
    }

    /// Built-in cases followed by the configured ones.
    #[must_use]
    pub fn all_cases(&self) -> Vec<TestCase> {
        let mut cases = builtin_cases();
        cases.extend(self.cases.iter().cloned());
        cases
    }

    pub fn find_case(&self, key: &str) -> anyhow::Result<TestCase> {
        let cases = self.all_cases();
        let known = cases
            .iter()
            .map(|c| c.key.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        match cases.iter().find(|c| c.key.eq_ignore_ascii_case(key)) {
            Some(case) => Ok(case.clone()),
            None => bail!("Unknown test case {key:?}, expected one of: {known}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use engine::Protocol;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_minimal() {
        let file = write_config("[gateway]\napi_url = \"https://gateway.example/\"\n");
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.general.default_timeout_ms, 5_000);
        assert_eq!(config.gateway.api_url, "https://gateway.example");
        assert_eq!(config.all_cases().len(), 7);
    }

    #[test]
    fn test_load_with_extra_cases() {
        let file = write_config(
            r#"
[general]
default_timeout_ms = 15000

[gateway]
api_url = "https://gateway.example"

[[cases]]
key = "bnb"
title = "BNB Batch Test"
protocol = "EVM"
domain = "spaceid.bnb"
address = "0xb5932a6b7d50a966aec6c74c97385412fb497540"
chain_id = 56
rpc_url = "https://bsc-dataseed.bnbchain.org"
"#,
        );
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.general.default_timeout_ms, 15_000);
        let case = config.find_case("BNB").unwrap();
        assert_eq!(case.protocol, Protocol::Evm);
        assert_eq!(case.chain_id, Some(56));
        assert_eq!(config.all_cases().len(), 8);
    }

    #[test]
    fn test_duplicate_case_key_rejected() {
        let file = write_config(
            r#"
[gateway]
api_url = "https://gateway.example"

[[cases]]
key = "sei"
title = "Another Sei"
protocol = "Sei"
domain = "x.sei"
address = "sei1x"
"#,
        );
        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Duplicate test case key"));
    }

    #[test]
    fn test_unknown_case() {
        let file = write_config("[gateway]\napi_url = \"https://gateway.example\"\n");
        let config = Config::load(file.path()).unwrap();
        let err = config.find_case("nope").unwrap_err();
        assert!(err.to_string().contains("evm, arb"));
    }

    #[test]
    fn test_missing_gateway_fails() {
        let file = write_config("[general]\ndefault_timeout_ms = 1\n");
        assert!(Config::load(file.path()).is_err());
    }
}

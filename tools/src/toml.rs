use std::{fs, path::Path};

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Reads a TOML file from disk and deserializes it into `T`.
///
/// # Errors
/// Fails with a message naming the file when it cannot be read or is not valid
/// TOML for `T`.
///
/// # Examples
/// ```no_run
/// use serde::Deserialize;
/// use tools::toml::parse_file;
///
/// #[derive(Deserialize)]
/// struct Config {
///     api_url: String,
/// }
///
/// let config: anyhow::Result<Config> = parse_file("config.toml");
/// ```
pub fn parse_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Could not open file {:?}", path.display()))?;

    parse_str(&contents).with_context(|| format!("Could not parse TOML in file {:?}", path.display()))
}

/// Deserializes TOML text into `T`.
pub fn parse_str<T: DeserializeOwned>(contents: &str) -> anyhow::Result<T> {
    Ok(toml::from_str(contents)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        name: String,
        timeout_ms: i64,
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"evm\"\ntimeout_ms = -1").unwrap();

        let sample: Sample = parse_file(file.path()).unwrap();
        assert_eq!(
            sample,
            Sample {
                name: "evm".to_owned(),
                timeout_ms: -1,
            }
        );
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = parse_file::<Sample>("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(parse_str::<Sample>("name = ").is_err());
        assert!(parse_str::<Sample>("name = \"x\"").is_err());
    }
}

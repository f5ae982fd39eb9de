//! Policy loading and validation errors

use super::preset::Dialect;
use crate::shared::constants::policy::SCHEMA_VERSION;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric policy field outside its accepted bounds
    #[error("policy field '{field}' is {value}, expected {min}..={max} ({hint})")]
    OutOfRange {
        field: &'static str,
        value: usize,
        min: usize,
        max: usize,
        hint: &'static str,
    },

    #[error("policy file has no 'version' field; start it with 'version: {}'", SCHEMA_VERSION)]
    MissingVersion,

    #[error("policy schema version {found} is not supported (this build reads version {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error(
        "unknown dialect '{0}' (known: {})",
        Dialect::ALL.iter().map(|d| d.as_str()).collect::<Vec<_>>().join(", ")
    )]
    UnknownDialect(String),

    /// An empty prefix would mark every name as synthetic
    #[error("synthetic_prefixes contains an empty prefix")]
    EmptySyntheticPrefix,

    #[error("cannot read policy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed policy YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = ConfigError::OutOfRange {
            field: "max_scope_depth",
            value: 0,
            min: 1,
            max: 1_000_000,
            hint: "a tree needs one level below the root",
        };

        let msg = err.to_string();
        assert!(msg.starts_with("policy field 'max_scope_depth' is 0"));
        assert!(msg.contains("1..=1000000"));
    }

    #[test]
    fn test_version_messages_name_schema() {
        assert!(ConfigError::MissingVersion.to_string().ends_with("'version: 1'"));

        let msg = ConfigError::UnsupportedVersion { found: 2, expected: 1 }.to_string();
        assert_eq!(msg, "policy schema version 2 is not supported (this build reads version 1)");
    }

    #[test]
    fn test_unknown_dialect_lists_known_ones() {
        let msg = ConfigError::UnknownDialect("cobol".to_string()).to_string();
        assert!(msg.contains("'cobol'"));
        assert!(msg.contains("yak, go, java, javascript"));
    }
}

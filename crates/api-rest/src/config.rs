//! REST server configuration.
//!
//! Resolved once at process startup from environment values; handlers never read the
//! environment.

use std::net::{AddrParseError, SocketAddr};

/// Listen address used when `TOOLBOX_REST_ADDR` is unset or blank.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:5600";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid TOOLBOX_REST_ADDR '{value}': {source}")]
    InvalidAddr {
        value: String,
        source: AddrParseError,
    },
}

/// Parse the REST listen address from an optional environment value.
///
/// Empty or whitespace-only values fall back to [`DEFAULT_REST_ADDR`].
pub fn rest_addr_from_env_value(value: Option<String>) -> Result<SocketAddr, ConfigError> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_REST_ADDR.to_string());

    value
        .parse()
        .map_err(|source| ConfigError::InvalidAddr { value, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset_or_blank() {
        let expected: SocketAddr = DEFAULT_REST_ADDR.parse().unwrap();
        assert_eq!(rest_addr_from_env_value(None).unwrap(), expected);
        assert_eq!(
            rest_addr_from_env_value(Some("   ".into())).unwrap(),
            expected
        );
    }

    #[test]
    fn parses_explicit_address() {
        let addr = rest_addr_from_env_value(Some(" 127.0.0.1:8080 ".into())).unwrap();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn rejects_malformed_address() {
        let err = rest_addr_from_env_value(Some("localhost".into())).unwrap_err();
        assert!(err.to_string().contains("localhost"));
    }
}

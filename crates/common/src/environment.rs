//! Which futures API the bot talks to.

use std::str::FromStr;

use crate::error::ConfigError;

/// Environment variable selecting the default base URL.
pub const ENVIRONMENT_VAR: &str = "FUTURES_ENVIRONMENT";

/// USDT-M futures environment. The bot targets the testnet unless told otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FuturesEnvironment {
    Production,
    #[default]
    Testnet,
}

impl FuturesEnvironment {
    /// REST API base URL.
    pub fn rest_base_url(&self) -> &'static str {
        match self {
            Self::Production => "https://fapi.binance.com",
            Self::Testnet => "https://testnet.binancefuture.com",
        }
    }

    /// Read `FUTURES_ENVIRONMENT`; unset or unrecognised means testnet.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(ENVIRONMENT_VAR).map(|value| value.parse()) {
            Some(Ok(environment)) => environment,
            Some(Err(err)) => {
                tracing::warn!(error = %err, "Falling back to testnet");
                Self::Testnet
            }
            None => Self::Testnet,
        }
    }
}

impl FromStr for FuturesEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" | "mainnet" => Ok(Self::Production),
            "testnet" | "test" => Ok(Self::Testnet),
            _ => Err(ConfigError::InvalidValue {
                key: ENVIRONMENT_VAR,
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_urls() {
        assert_eq!(
            FuturesEnvironment::Production.rest_base_url(),
            "https://fapi.binance.com"
        );
        assert_eq!(
            FuturesEnvironment::Testnet.rest_base_url(),
            "https://testnet.binancefuture.com"
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            " Mainnet ".parse::<FuturesEnvironment>().unwrap(),
            FuturesEnvironment::Production
        );
        assert!(matches!(
            "staging".parse::<FuturesEnvironment>(),
            Err(ConfigError::InvalidValue {
                key: ENVIRONMENT_VAR,
                ..
            })
        ));
    }

    #[test]
    fn test_lookup_defaults_to_testnet() {
        assert_eq!(
            FuturesEnvironment::from_lookup(|_| None),
            FuturesEnvironment::Testnet
        );
        assert_eq!(
            FuturesEnvironment::from_lookup(|_| Some("staging".into())),
            FuturesEnvironment::Testnet
        );
        assert_eq!(
            FuturesEnvironment::from_lookup(|_| Some("prod".into())),
            FuturesEnvironment::Production
        );
    }
}

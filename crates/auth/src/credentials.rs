//! Secure API credential management.
//!
//! Uses the `secrecy` crate to prevent accidental logging of secret keys
//! and ensures memory is zeroed on drop.

use crate::error::AuthError;
use secrecy::{ExposeSecret, SecretString};

/// API credentials for authenticated requests.
///
/// The API key travels in the `X-MBX-APIKEY` header. The secret is only ever
/// used as the HMAC key and is never transmitted.
#[derive(Clone)]
pub struct ApiCredentials {
    api_key: String,
    secret_key: SecretString,
}

impl ApiCredentials {
    /// Load credentials from environment variables.
    ///
    /// Looks for:
    /// - `BINANCE_API_KEY` - The API key (public)
    /// - `BINANCE_SECRET_KEY` - The secret key (private)
    ///
    /// # Errors
    /// Returns `AuthError::MissingEnvVar` if either variable is not set,
    /// or `AuthError::EmptyCredential` if one of them is blank.
    pub fn from_env() -> Result<Self, AuthError> {
        // Load .env file if present (ignores errors if file doesn't exist)
        dotenvy::dotenv().ok();

        let api_key = std::env::var("BINANCE_API_KEY")
            .map_err(|_| AuthError::MissingEnvVar("BINANCE_API_KEY".into()))?;

        let secret_key = std::env::var("BINANCE_SECRET_KEY")
            .map_err(|_| AuthError::MissingEnvVar("BINANCE_SECRET_KEY".into()))?;

        Self::try_new(api_key, secret_key)
    }

    /// Create credentials from explicit values.
    ///
    /// Useful for testing or when credentials come from other sources.
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key,
            secret_key: SecretString::from(secret_key),
        }
    }

    /// Create credentials, rejecting a blank key or secret.
    pub fn try_new(api_key: String, secret_key: String) -> Result<Self, AuthError> {
        if api_key.trim().is_empty() {
            return Err(AuthError::EmptyCredential("api key"));
        }
        if secret_key.is_empty() {
            return Err(AuthError::EmptyCredential("api secret"));
        }
        Ok(Self::new(api_key, secret_key))
    }

    /// Get the API key (public, safe to log).
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Expose the secret key for signing.
    ///
    /// **WARNING**: Only use this for cryptographic operations.
    /// Never log or display the return value.
    pub fn expose_secret(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_new() {
        let creds = ApiCredentials::new("my_api_key".into(), "my_secret".into());
        assert_eq!(creds.api_key(), "my_api_key");
        assert_eq!(creds.expose_secret(), "my_secret");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = ApiCredentials::new("my_api_key".into(), "super_secret_key".into());
        let debug_str = format!("{:?}", creds);

        assert!(debug_str.contains("my_api_key"));
        assert!(!debug_str.contains("super_secret_key"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_try_new_rejects_blank_key() {
        let err = ApiCredentials::try_new("  ".into(), "secret".into()).unwrap_err();
        assert!(matches!(err, AuthError::EmptyCredential("api key")));
    }

    #[test]
    fn test_try_new_rejects_empty_secret() {
        let err = ApiCredentials::try_new("key".into(), String::new()).unwrap_err();
        assert!(matches!(err, AuthError::EmptyCredential("api secret")));
    }

    #[test]
    fn test_try_new_accepts_valid_pair() {
        let creds = ApiCredentials::try_new("key".into(), "secret".into()).unwrap();
        assert_eq!(creds.api_key(), "key");
    }
}

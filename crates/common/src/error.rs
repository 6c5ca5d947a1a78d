use thiserror::Error;

/// Errors raised while loading bot configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for the expected shape.
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// API key or secret absent from both file and environment.
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    /// A value is present but malformed.
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    /// Credentials were rejected by the auth layer.
    #[error(transparent)]
    Auth(#[from] auth::AuthError),
}

//! Shared configuration and logging setup for the futures bot.

mod config;
mod environment;
mod error;
mod logging;

pub use config::{BotConfig, DEFAULT_CONFIG_PATH};
pub use environment::{FuturesEnvironment, ENVIRONMENT_VAR};
pub use error::ConfigError;
pub use logging::{init_logging, LogConfig};

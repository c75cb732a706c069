//! # Courseflow Config
//!
//! TOML configuration with `${VAR}` environment expansion. Session
//! credentials and API keys are expected to arrive via environment
//! references rather than literals in the file.

mod error;
mod loader;
mod schema;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{
    AdvisorConfig, CanvasConfig, Config, NotificationFrequency, NotificationsConfig, ServerConfig,
    SyncConfig,
};

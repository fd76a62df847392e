//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, apply command-line overrides)
//!     → validation.rs (semantic checks)
//!     → ShortenerConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, read_config, ConfigError};
pub use schema::{
    DatabaseConfig, FallbackConfig, ListenerConfig, LogFormat, LoggingConfig, ObservabilityConfig,
    RedirectConfig, ShortenerConfig, SourceConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};

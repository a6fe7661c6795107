//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → ServerConfig (immutable)
//!     → shared into subsystems at startup
//! ```
//!
//! # Design Decisions
//! - Config is resolved once at startup and never mutated afterward
//! - All fields have defaults so a missing file or empty section still works
//! - An unusable static files directory degrades to the built-in default
//!   instead of failing startup

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, ServerConfig, StaticFilesConfig, TimeoutConfig};

//! Management console backend.
//!
//! Serves a small versioned HTTP API (server version, inventory refresh,
//! environment and instance power control) and the bundled single-page
//! frontend for every GET the API does not claim.

pub mod api;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;

//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, catch-all entry point)
//!     → routing layer (route table dispatch)
//!     → api handlers, or static_files.rs for unmatched GETs
//!     → Send to client
//! ```

pub mod server;
pub mod static_files;

pub use server::{AppState, HttpServer};

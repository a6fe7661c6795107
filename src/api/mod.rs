//! Management API subsystem.
//!
//! # Data Flow
//! ```text
//! dispatch (matched route + extracted params)
//!     → handlers.rs (one handler per operation, owns status + body)
//!     → registry.rs (in-memory environment inventory)
//!     → JSON response
//! ```
//!
//! # Design Decisions
//! - Handlers receive the full request plus the router's parameter map and
//!   own their response entirely; the dispatch layer never inspects it
//! - Inventory lives in memory behind an RwLock; refresh re-pulls it from
//!   the configured source

pub mod handlers;
pub mod registry;

pub use registry::{Environment, EnvironmentRegistry, Instance, PowerState};

//! Lifecycle management subsystem.
//!
//! # Design Decisions
//! - Ordered startup: config first, then core, then listener
//! - Shutdown is cooperative: a broadcast signal all long-running tasks
//!   subscribe to

pub mod shutdown;

pub use shutdown::Shutdown;

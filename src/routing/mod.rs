//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (scan table in declared order)
//!     → pattern.rs (segment-wise match, parameter extraction)
//!     → Return: matched route + params, or no match
//!
//! Table Construction (at startup):
//!     literal descriptor rows
//!     → pattern.rs (template parse)
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes declared as literal data, parsed once at startup, immutable after
//! - Enumerated segment constraints are part of the match predicate, so an
//!   out-of-enumeration value falls through instead of erroring
//! - First match wins; table order encodes priority
//! - The static frontend fallback is deliberately not a table entry and only
//!   runs when no explicit route claims a GET

pub mod pattern;
pub mod router;
pub mod table;

pub use pattern::{api_endpoint, PathParams, Pattern, PatternError, API_VERSION};
pub use router::{Match, Router};
pub use table::{Operation, RouteDescriptor, RouteTable};

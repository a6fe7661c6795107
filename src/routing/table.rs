//! Declarative route table.
//!
//! All server endpoints are declared here as literal data and parsed into
//! matchable patterns once at startup. Insertion order is match-priority
//! order; the six rows do not overlap, but the order is still preserved so
//! dispatch stays predictable and the static fallback is always tried last.

use axum::http::Method;

use crate::routing::pattern::{api_endpoint, Pattern, PatternError};

/// Management operations the API exposes, one per route.
///
/// The matched table row selects the variant; the HTTP layer maps it to the
/// handler owning that operation's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Version,
    Refresh,
    EnvAll,
    EnvSingle,
    EnvPowerToggle,
    InstancePowerToggle,
}

/// A single route: a named method + pattern pair bound to an operation.
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    pub name: &'static str,
    pub method: Method,
    pub pattern: Pattern,
    pub operation: Operation,
}

/// Ordered, immutable route set.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    /// Build the full set of API routes.
    pub fn standard() -> Result<Self, PatternError> {
        use Operation::*;

        let rows = [
            ("Version", Method::GET, api_endpoint("version"), Version),
            ("Refresh", Method::POST, api_endpoint("refresh"), Refresh),
            (
                "EnvAll",
                Method::GET,
                api_endpoint("env/{group:summary|details}"),
                EnvAll,
            ),
            (
                "EnvSingle",
                Method::GET,
                api_endpoint("env/{env-id}/{group:summary|details}"),
                EnvSingle,
            ),
            (
                "EnvPowerToggle",
                Method::POST,
                api_endpoint("env/{env-id}/{state:start|stop}"),
                EnvPowerToggle,
            ),
            (
                "InstancePowerToggle",
                Method::POST,
                api_endpoint("instance/{instance-id}/{state:start|stop}"),
                InstancePowerToggle,
            ),
        ];

        let mut routes = Vec::with_capacity(rows.len());
        for (name, method, template, operation) in rows {
            routes.push(RouteDescriptor {
                name,
                method,
                pattern: Pattern::parse(&template)?,
                operation,
            });
        }
        Ok(Self { routes })
    }

    /// Routes in declared (priority) order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Evaluate routes in table order against (method, path)
//! - Return the first matching route with its extracted parameters
//! - Report no-match explicitly so the caller can fall through to static
//!   serving (GET) or a not-found response
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - First match wins; no later rule is tried once one matches
//! - O(n) scan; n is six, a lookup structure would not pay for itself

use axum::http::Method;

use crate::routing::pattern::PathParams;
use crate::routing::table::{RouteDescriptor, RouteTable};

/// A successful dispatch: the matched route and its extracted parameters.
#[derive(Debug)]
pub struct Match<'a> {
    pub route: &'a RouteDescriptor,
    pub params: PathParams,
}

/// Request dispatcher over an immutable route table.
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
}

impl Router {
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    /// Select the first route matching the request method and path.
    ///
    /// A rule matches iff its method equals the request method, every literal
    /// segment equals the corresponding path segment, and every constrained
    /// capture's value is inside its enumeration. `None` means no explicit
    /// route claims the request.
    pub fn dispatch(&self, method: &Method, path: &str) -> Option<Match<'_>> {
        self.table.iter().find_map(|route| {
            if route.method != *method {
                return None;
            }
            route
                .pattern
                .matches(path)
                .map(|params| Match { route, params })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::table::Operation;

    fn router() -> Router {
        Router::new(RouteTable::standard().unwrap())
    }

    #[test]
    fn test_all_declared_routes_dispatch() {
        let router = router();
        let cases = [
            (Method::GET, "/api/v1/version", Operation::Version),
            (Method::POST, "/api/v1/refresh", Operation::Refresh),
            (Method::GET, "/api/v1/env/summary", Operation::EnvAll),
            (Method::GET, "/api/v1/env/42/details", Operation::EnvSingle),
            (Method::POST, "/api/v1/env/42/start", Operation::EnvPowerToggle),
            (
                Method::POST,
                "/api/v1/instance/i-7/stop",
                Operation::InstancePowerToggle,
            ),
        ];
        for (method, path, operation) in cases {
            let matched = router
                .dispatch(&method, path)
                .unwrap_or_else(|| panic!("{method} {path} did not dispatch"));
            assert_eq!(matched.route.operation, operation);
        }
    }

    #[test]
    fn test_power_toggle_extracts_params() {
        let router = router();
        let matched = router.dispatch(&Method::POST, "/api/v1/env/42/start").unwrap();
        assert_eq!(matched.route.name, "EnvPowerToggle");
        assert_eq!(matched.params.get("env-id").unwrap(), "42");
        assert_eq!(matched.params.get("state").unwrap(), "start");
    }

    #[test]
    fn test_method_must_agree() {
        let router = router();
        assert!(router.dispatch(&Method::POST, "/api/v1/version").is_none());
        assert!(router.dispatch(&Method::GET, "/api/v1/refresh").is_none());
    }

    #[test]
    fn test_group_outside_enumeration_falls_through() {
        let router = router();
        assert!(router.dispatch(&Method::GET, "/api/v1/env/everything").is_none());
        assert!(router
            .dispatch(&Method::GET, "/api/v1/env/42/everything")
            .is_none());
    }

    #[test]
    fn test_state_outside_enumeration_falls_through() {
        let router = router();
        assert!(router.dispatch(&Method::POST, "/api/v1/env/42/pause").is_none());
        assert!(router
            .dispatch(&Method::POST, "/api/v1/instance/i-7/pause")
            .is_none());
    }

    #[test]
    fn test_trailing_slash_dispatches_identically() {
        let router = router();
        let a = router.dispatch(&Method::GET, "/api/v1/version").unwrap();
        let b = router.dispatch(&Method::GET, "/api/v1/version/").unwrap();
        assert_eq!(a.route.name, b.route.name);
    }

    #[test]
    fn test_dispatch_is_idempotent() {
        let router = router();
        for _ in 0..3 {
            let matched = router.dispatch(&Method::GET, "/api/v1/env/7/summary").unwrap();
            assert_eq!(matched.route.name, "EnvSingle");
            assert_eq!(matched.params.get("env-id").unwrap(), "7");
        }
    }

    #[test]
    fn test_unrelated_paths_do_not_match() {
        let router = router();
        assert!(router.dispatch(&Method::GET, "/").is_none());
        assert!(router.dispatch(&Method::GET, "/index.html").is_none());
        assert!(router.dispatch(&Method::GET, "/some/spa/route").is_none());
        assert!(router.dispatch(&Method::GET, "/api/v2/version").is_none());
    }
}

//! URL template parsing and matching.
//!
//! # Responsibilities
//! - Parse route templates into per-segment matchers
//! - Match request paths against parsed templates
//! - Extract named parameters from matched paths
//!
//! # Design Decisions
//! - Three segment kinds: literal, free capture, enumerated capture
//! - Enumerations restrict what the segment *matches*, not what the handler
//!   later accepts; an out-of-set value means the whole pattern does not match
//! - A trailing slash on the request path is ignored
//! - No regex; splitting on '/' keeps matching O(segments)

use std::collections::HashMap;

/// API compatibility version, embedded in every generated route pattern.
pub const API_VERSION: &str = "1";

/// Build a versioned API endpoint path from a bare resource suffix.
///
/// `api_endpoint("refresh")` yields `/api/v1/refresh`. The suffix is taken
/// verbatim; callers own its URL syntax. Called only at table construction.
pub fn api_endpoint(suffix: &str) -> String {
    format!("/api/v{}/{}", API_VERSION, suffix)
}

/// Error raised when a route template cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("unclosed parameter brace in segment `{0}`")]
    UnclosedBrace(String),

    #[error("empty parameter name in segment `{0}`")]
    EmptyName(String),

    #[error("empty alternative in enumeration for parameter `{0}`")]
    EmptyAlternative(String),
}

/// One segment of a parsed URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the request segment exactly.
    Literal(String),
    /// Matches any request segment, captured under the given name.
    Free(String),
    /// Matches only the listed values, captured under the given name.
    Enumerated(String, Vec<String>),
}

/// Named parameters extracted from a matched request path.
pub type PathParams = HashMap<String, String>;

/// A parsed URL template, matchable against request paths.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parse a template such as `/api/v1/env/{env-id}/{group:summary|details}`.
    ///
    /// `{name}` captures any value, `{name:a|b}` captures only the listed
    /// alternatives. Everything else is a literal segment.
    pub fn parse(template: &str) -> Result<Self, PatternError> {
        let mut segments = Vec::new();
        for part in template.split('/').filter(|s| !s.is_empty()) {
            segments.push(parse_segment(part)?);
        }
        Ok(Self {
            raw: template.to_string(),
            segments,
        })
    }

    /// The original template string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match a request path, returning extracted parameters on success.
    ///
    /// Paths with and without a trailing slash match identically. All
    /// captures, constrained or not, land in the returned map.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let given: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if given.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::new();
        for (segment, value) in self.segments.iter().zip(given) {
            match segment {
                Segment::Literal(lit) => {
                    if lit != value {
                        return None;
                    }
                }
                Segment::Free(name) => {
                    params.insert(name.clone(), value.to_string());
                }
                Segment::Enumerated(name, allowed) => {
                    if !allowed.iter().any(|a| a == value) {
                        return None;
                    }
                    params.insert(name.clone(), value.to_string());
                }
            }
        }
        Some(params)
    }
}

fn parse_segment(part: &str) -> Result<Segment, PatternError> {
    let Some(inner) = part.strip_prefix('{') else {
        return Ok(Segment::Literal(part.to_string()));
    };
    let inner = inner
        .strip_suffix('}')
        .ok_or_else(|| PatternError::UnclosedBrace(part.to_string()))?;

    let (name, enumeration) = match inner.split_once(':') {
        Some((name, enumeration)) => (name, Some(enumeration)),
        None => (inner, None),
    };
    if name.is_empty() {
        return Err(PatternError::EmptyName(part.to_string()));
    }

    match enumeration {
        None => Ok(Segment::Free(name.to_string())),
        Some(enumeration) => {
            let allowed: Vec<String> = enumeration.split('|').map(str::to_string).collect();
            if allowed.iter().any(String::is_empty) {
                return Err(PatternError::EmptyAlternative(name.to_string()));
            }
            Ok(Segment::Enumerated(name.to_string(), allowed))
        }
    }
}

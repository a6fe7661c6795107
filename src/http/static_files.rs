//! Static asset serving for the bundled frontend.
//!
//! Any GET the API router does not claim lands here, so the single-page
//! application owns client-side routing: unmatched paths are looked up under
//! the static root and missing files answer 404, leaving the SPA free to
//! render its own routes from `index.html`.

use std::path::{Path, PathBuf};

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;

use crate::config::StaticFilesConfig;

/// Fallback directory when no static root is configured or the configured
/// one is unusable.
pub const DEFAULT_STATIC_DIR: &str = "./frontend/dist";

/// Resolve the static root once at startup.
///
/// A configured directory that does not exist degrades to the built-in
/// default with a warning rather than aborting startup.
pub fn resolve_root(config: &StaticFilesConfig) -> PathBuf {
    match config.dir.as_deref() {
        Some(dir) if !dir.is_empty() => {
            let path = PathBuf::from(dir);
            if path.is_dir() {
                path
            } else {
                tracing::warn!(
                    configured = dir,
                    default = DEFAULT_STATIC_DIR,
                    "Configured static files directory is not usable, using default"
                );
                PathBuf::from(DEFAULT_STATIC_DIR)
            }
        }
        _ => PathBuf::from(DEFAULT_STATIC_DIR),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SanitizeError {
    #[error("invalid path")]
    InvalidPath,

    #[error("utf-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Join a request path onto the static root, rejecting traversal attempts.
///
/// A path that would resolve outside the root is reported as invalid and the
/// caller answers not-found; it is never served.
pub fn sanitize_path(base: &Path, tail: &str) -> Result<PathBuf, SanitizeError> {
    let mut buf = base.to_path_buf();
    let decoded = percent_decode_str(tail).decode_utf8()?;

    for seg in decoded.split('/').filter(|s| !s.is_empty()) {
        if seg.starts_with("..") || seg.contains('\\') {
            return Err(SanitizeError::InvalidPath);
        }
        buf.push(seg);
    }
    Ok(buf)
}

/// Serve the file under `root` named by the request path.
///
/// Directory targets fall back to their `index.html`, matching how the SPA
/// bundle is laid out. Absent files, directories without an index, and
/// rejected paths all answer 404.
pub async fn serve(root: &Path, path: &str) -> Response {
    let full = match sanitize_path(root, path) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(path, error = %e, "Rejected static file path");
            return not_found();
        }
    };

    let full = match tokio::fs::metadata(&full).await {
        Ok(meta) if meta.is_dir() => full.join("index.html"),
        _ => full,
    };

    match tokio::fs::read(&full).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&full).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref())], bytes).into_response()
        }
        Err(_) => not_found(),
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "not found").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> &Path {
        s.as_ref()
    }

    #[test]
    fn test_sanitize_joins_under_base() {
        let base = p("/var/www");
        assert_eq!(
            sanitize_path(base, "/foo.html").unwrap(),
            p("/var/www/foo.html")
        );
        assert_eq!(
            sanitize_path(base, "/some/spa/route").unwrap(),
            p("/var/www/some/spa/route")
        );
    }

    #[test]
    fn test_sanitize_rejects_escapes() {
        let base = p("/var/www");
        sanitize_path(base, "/../foo.html").expect_err("dot dot");
        sanitize_path(base, "/../../etc/passwd").expect_err("dot dot deep");
        sanitize_path(base, "/%2e%2e/etc/passwd").expect_err("encoded dot dot");
        sanitize_path(base, "/C:\\/foo.html").expect_err("backslash");
    }

    #[test]
    fn test_resolve_root_defaults_when_unset() {
        let config = StaticFilesConfig { dir: None };
        assert_eq!(resolve_root(&config), PathBuf::from(DEFAULT_STATIC_DIR));
    }

    #[test]
    fn test_resolve_root_degrades_when_missing() {
        let config = StaticFilesConfig {
            dir: Some("/definitely/not/a/real/dir".to_string()),
        };
        assert_eq!(resolve_root(&config), PathBuf::from(DEFAULT_STATIC_DIR));
    }
}

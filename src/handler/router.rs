//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method
//! validation, path classification, and dispatching.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

/// Routing outcome for a request path.
///
/// A pure function of the path string: exactly one variant is chosen per
/// request and nothing else about the request is inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Probe path (.well-known, DevTools, extensions): canned 404, kept out
    /// of the access log
    SuppressedNotFound,
    /// Exactly /manifest.json
    Manifest,
    /// Exactly /favicon.ico
    Favicon,
    /// Anything else: generic static file serving
    Delegate,
}

/// Classify a request path. First match wins.
pub fn classify_path(path: &str) -> RouteDecision {
    if path.starts_with("/.well-known/") {
        return RouteDecision::SuppressedNotFound;
    }
    if path.contains("devtools") || path.contains("chrome-extension") {
        return RouteDecision::SuppressedNotFound;
    }
    if path == "/manifest.json" {
        return RouteDecision::Manifest;
    }
    if path == "/favicon.ico" {
        return RouteDecision::Favicon;
    }
    RouteDecision::Delegate
}

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let uri = req.uri();
    let path = uri.path().to_string();
    let query = uri.query().map(ToString::to_string);
    let is_head = *method == Method::HEAD;

    let response = match check_http_method(method) {
        Some(resp) => resp,
        None => {
            let ctx = RequestContext {
                path: &path,
                is_head,
            };
            dispatch(&ctx, &state).await
        }
    };

    let access_log = state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed);
    if access_log {
        let mut entry =
            AccessLogEntry::new(peer_addr.to_string(), method.to_string(), path.clone());
        entry.query = query;
        entry.http_version = http_version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = usize::try_from(
            response.body().size_hint().exact().unwrap_or(0),
        )
        .unwrap_or(usize::MAX);
        entry.referer = header_value(&req, "referer");
        entry.user_agent = header_value(&req, "user-agent");
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Dispatch a classified request to the branch that serves it
async fn dispatch(ctx: &RequestContext<'_>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    match classify_path(ctx.path) {
        RouteDecision::SuppressedNotFound => http::build_not_found_response("Not Found"),
        RouteDecision::Manifest => {
            serve_root_file(
                state,
                "manifest.json",
                "application/manifest+json",
                "no-cache",
                "Manifest file not found",
                ctx.is_head,
            )
            .await
        }
        RouteDecision::Favicon => {
            serve_root_file(
                state,
                "favicon.ico",
                "image/x-icon",
                "public, max-age=86400",
                "Favicon file not found",
                ctx.is_head,
            )
            .await
        }
        RouteDecision::Delegate => static_files::serve(ctx, state).await,
    }
}

/// Serve a well-known file from the serving root with fixed headers.
///
/// The file is read before any status is committed, so an absent file yields
/// a single clean 404 rather than a 200 followed by an error.
async fn serve_root_file(
    state: &Arc<AppState>,
    file_name: &str,
    content_type: &str,
    cache_control: &str,
    missing_message: &'static str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let file_path = state.root.join(file_name);
    match tokio::fs::read(&file_path).await {
        Ok(content) => http::build_file_response(content, content_type, Some(cache_control), is_head),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            http::build_not_found_response(missing_message)
        }
        Err(e) => {
            logger::log_request_error(&e);
            http::build_500_response()
        }
    }
}

/// Check HTTP method and return early response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

fn http_version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        _ => "1.1",
    }
}

fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_prefix() {
        assert_eq!(
            classify_path("/.well-known/acme-challenge/token"),
            RouteDecision::SuppressedNotFound
        );
        assert_eq!(classify_path("/.well-known/"), RouteDecision::SuppressedNotFound);
        // Prefix match only: no trailing slash means no match on rule 1
        assert_eq!(classify_path("/.well-known"), RouteDecision::Delegate);
    }

    #[test]
    fn test_tooling_substrings() {
        assert_eq!(
            classify_path("/json/devtools/page/1"),
            RouteDecision::SuppressedNotFound
        );
        assert_eq!(
            classify_path("/chrome-extension/abc/content.js"),
            RouteDecision::SuppressedNotFound
        );
        // Substring matches anywhere in the path
        assert_eq!(
            classify_path("/assets/devtools.css"),
            RouteDecision::SuppressedNotFound
        );
        // Case-sensitive
        assert_eq!(classify_path("/DevTools"), RouteDecision::Delegate);
    }

    #[test]
    fn test_exact_matches() {
        assert_eq!(classify_path("/manifest.json"), RouteDecision::Manifest);
        assert_eq!(classify_path("/favicon.ico"), RouteDecision::Favicon);
        // Exact match only
        assert_eq!(classify_path("/manifest.json/extra"), RouteDecision::Delegate);
        assert_eq!(classify_path("/static/favicon.ico"), RouteDecision::Delegate);
    }

    #[test]
    fn test_delegate_fallthrough() {
        assert_eq!(classify_path("/"), RouteDecision::Delegate);
        assert_eq!(classify_path("/index.html"), RouteDecision::Delegate);
        assert_eq!(classify_path("/css/app.css"), RouteDecision::Delegate);
    }

    #[test]
    fn test_priority_order_first_match_wins() {
        // Rule 1 fires before the substring rule
        assert_eq!(
            classify_path("/.well-known/devtools"),
            RouteDecision::SuppressedNotFound
        );
        // Substring rule fires before exact-match rules would be reached
        assert_eq!(
            classify_path("/devtools/manifest.json"),
            RouteDecision::SuppressedNotFound
        );
    }
}

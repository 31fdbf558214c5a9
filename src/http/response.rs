//! HTTP response building module
//!
//! Provides builders for the response shapes the router produces, decoupled
//! from specific business logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build a plain-text 404 response with an explanatory body.
///
/// Used for the canned branches (probe paths, missing manifest/favicon) whose
/// body text is part of the routing contract.
pub fn build_not_found_response(message: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(message)))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from(message)))
        })
}

/// Build generic 404 Not Found response (static file delegate)
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("500 Internal Server Error")))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from("500 Internal Server Error")))
        })
}

/// Build a 200 file response with optional Cache-Control
pub fn build_file_response(
    data: Vec<u8>,
    content_type: &str,
    cache_control: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(data)
    };

    let mut builder = Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length);

    if let Some(cache) = cache_control {
        builder = builder.header("Cache-Control", cache);
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build generic HTML response (directory listings)
pub fn build_html_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_body_and_headers() {
        let resp = build_not_found_response("Not Found");
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
    }

    #[test]
    fn test_file_response_headers() {
        let resp = build_file_response(
            b"{}".to_vec(),
            "application/manifest+json",
            Some("no-cache"),
            false,
        );
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "application/manifest+json");
        assert_eq!(resp.headers()["Cache-Control"], "no-cache");
        assert_eq!(resp.headers()["Content-Length"], "2");
    }

    #[test]
    fn test_head_has_empty_body() {
        use hyper::body::Body;
        let resp = build_file_response(b"bytes".to_vec(), "text/plain", None, true);
        // Content-Length still reflects the full file
        assert_eq!(resp.headers()["Content-Length"], "5");
        assert_eq!(resp.body().size_hint().exact(), Some(0));
    }

    #[test]
    fn test_405_allows_get_head() {
        let resp = build_405_response();
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers()["Allow"], "GET, HEAD");
    }
}

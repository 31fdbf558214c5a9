//! Static file serving module
//!
//! The delegate branch of the router: resolves request paths against the
//! serving root, guards against traversal, and serves files, index files,
//! or a generated directory listing.

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve a request path from the serving root
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let Some(target) = resolve_path(state, ctx.path) else {
        return http::build_404_response();
    };

    if target.is_dir() {
        // Prefer an index file when the directory has one
        for index_file in &state.config.routes.index_files {
            let candidate = target.join(index_file);
            if candidate.is_file() {
                return serve_file(&candidate, ctx.is_head).await;
            }
        }
        return serve_listing(&target, ctx.path, ctx.is_head).await;
    }

    serve_file(&target, ctx.is_head).await
}

/// Resolve a request path to a filesystem path under the serving root.
///
/// Returns `None` when the path does not exist or escapes the root.
fn resolve_path(state: &AppState, path: &str) -> Option<PathBuf> {
    let relative = path.trim_start_matches('/');
    let joined = state.root.join(relative);

    // Canonicalization resolves `..` and symlinks; a missing file is an
    // ordinary 404, no need to log
    let canonical = joined.canonicalize().ok()?;
    if !canonical.starts_with(&state.root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            canonical.display()
        ));
        return None;
    }

    Some(canonical)
}

/// Read and serve a single file with a content type inferred from extension
async fn serve_file(file_path: &Path, is_head: bool) -> Response<Full<Bytes>> {
    match fs::read(file_path).await {
        Ok(content) => {
            let content_type =
                mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
            http::build_file_response(content, content_type, None, is_head)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => http::build_404_response(),
        Err(e) => {
            logger::log_request_error(&e);
            http::build_500_response()
        }
    }
}

/// Serve a generated HTML listing for a directory
async fn serve_listing(dir: &Path, request_path: &str, is_head: bool) -> Response<Full<Bytes>> {
    match render_directory_listing(dir, request_path).await {
        Ok(html) => http::build_html_response(html, is_head),
        Err(e) => {
            logger::log_request_error(&e);
            http::build_404_response()
        }
    }
}

/// Render a directory listing, entries sorted by name, directories marked
/// with a trailing slash
async fn render_directory_listing(dir: &Path, request_path: &str) -> io::Result<String> {
    let mut entries = fs::read_dir(dir).await?;
    let mut items: Vec<(String, bool)> = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let is_dir = entry
            .file_type()
            .await
            .map(|file_type| file_type.is_dir())
            .unwrap_or(false);
        let name = entry.file_name().to_string_lossy().into_owned();
        items.push((name, is_dir));
    }

    items.sort_by(|a, b| a.0.cmp(&b.0));

    // Relative hrefs need the directory URL to end with a slash
    let base = if request_path.ends_with('/') {
        request_path.to_string()
    } else {
        format!("{request_path}/")
    };

    let title = format!("Directory listing for {}", escape_html(request_path));
    let mut body = format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n<h1>{title}</h1>\n<hr>\n<ul>\n"
    );

    for (name, is_dir) in items {
        let display = if is_dir {
            format!("{name}/")
        } else {
            name.clone()
        };
        let href = format!("{base}{display}");
        body.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            escape_html(&href),
            escape_html(&display)
        ));
    }

    body.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Ok(body)
}

/// Escape text for inclusion in HTML content and attributes
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, LoggingConfig, RoutesConfig, ServerConfig};
    use std::sync::atomic::AtomicBool;

    fn temp_root(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("devserver-static-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn test_state(root: &Path) -> AppState {
        AppState {
            config: Config {
                server: ServerConfig {
                    host: "127.0.0.1".to_string(),
                    port: 0,
                    workers: None,
                    root: root.display().to_string(),
                },
                logging: LoggingConfig {
                    level: "info".to_string(),
                    access_log: false,
                    access_log_format: "common".to_string(),
                    access_log_file: None,
                    error_log_file: None,
                },
                routes: RoutesConfig::default(),
            },
            root: root.canonicalize().unwrap(),
            cached_access_log: AtomicBool::new(false),
        }
    }

    #[test]
    fn test_resolve_existing_file() {
        let root = temp_root("resolve");
        std::fs::write(root.join("page.html"), "<p>hi</p>").unwrap();
        let state = test_state(&root);

        let resolved = resolve_path(&state, "/page.html").unwrap();
        assert!(resolved.ends_with("page.html"));
        assert!(resolved.starts_with(&state.root));
    }

    #[test]
    fn test_resolve_missing_file_is_none() {
        let root = temp_root("missing");
        let state = test_state(&root);
        assert!(resolve_path(&state, "/nope.txt").is_none());
    }

    #[test]
    fn test_resolve_blocks_traversal() {
        let root = temp_root("traversal");
        let state = test_state(&root);
        // /etc/passwd exists on the test machine but lies outside the root
        assert!(resolve_path(&state, "/../../../../etc/passwd").is_none());
    }

    #[tokio::test]
    async fn test_listing_sorted_with_dir_slash() {
        let root = temp_root("listing");
        std::fs::write(root.join("b.txt"), "b").unwrap();
        std::fs::write(root.join("a.txt"), "a").unwrap();
        std::fs::create_dir_all(root.join("sub")).unwrap();

        let html = render_directory_listing(&root, "/").await.unwrap();
        let a_pos = html.find("a.txt").unwrap();
        let b_pos = html.find("b.txt").unwrap();
        assert!(a_pos < b_pos);
        assert!(html.contains("sub/"));
        assert!(html.contains("href=\"/a.txt\""));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}

//! Logger module
//!
//! Provides logging utilities for the development server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats and probe-path suppression
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;
use std::path::Path;

/// Paths containing any of these substrings never produce an access log line,
/// no matter which branch served them. Keeps certificate probes and browser
/// tooling noise out of the console.
const SUPPRESSED_LOG_MARKERS: [&str; 3] = [".well-known", "devtools", "chrome-extension"];

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Whether access logging should be skipped for this request path
pub fn suppresses_access_log(path: &str) -> bool {
    SUPPRESSED_LOG_MARKERS
        .iter()
        .any(|marker| path.contains(marker))
}

/// Write to info/access log
fn write_info(message: &str) {
    if writer::is_initialized() {
        writer::get().write_info(message);
    } else {
        println!("{message}");
    }
}

/// Write to error log
fn write_error(message: &str) {
    if writer::is_initialized() {
        writer::get().write_error(message);
    } else {
        eprintln!("{message}");
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    if writer::is_initialized() {
        writer::get().write_access(message);
    } else {
        println!("{message}");
    }
}

pub fn log_server_start(addr: &SocketAddr, root: &Path, config: &Config) {
    write_info("======================================");
    write_info(&format!(
        "Development server running at: http://{addr}"
    ));
    write_info(&format!("Serving files from: {}", root.display()));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("404s for .well-known and DevTools probes are filtered from logs");
    write_info("Press Ctrl+C to stop the server");
    write_info("======================================\n");
}

pub fn log_server_stop() {
    write_info("\nServer stopped");
}

/// Connection-layer failure that is not a client disconnect
pub fn log_connection_error(err: &impl std::fmt::Display) {
    write_error(&format!("[WARN] Connection error: {err}"));
}

/// Per-request failure that is not a client disconnect or missing file
pub fn log_request_error(err: &impl std::fmt::Display) {
    write_error(&format!("[WARN] Unexpected error while handling request: {err}"));
}

/// Listener-layer failure; the accept loop continues regardless
pub fn log_server_error(err: &impl std::fmt::Display) {
    write_error(&format!("[WARN] Server error while accepting connection: {err}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry, honoring the suppression list
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    if suppresses_access_log(&entry.path) {
        return;
    }
    write_access(&entry.format(format));
}

//! Local development static file server.
//!
//! Serves a directory over HTTP with special handling for browser-tooling
//! probe paths (`.well-known`, DevTools, extensions), `manifest.json` and
//! `favicon.ico`, and suppresses the connection errors that routine browser
//! behavior produces.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

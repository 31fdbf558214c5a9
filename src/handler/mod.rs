//! Request handling module
//!
//! Path classification, canned responses, and the static file delegate.

pub mod router;
pub mod static_files;

pub use router::{classify_path, handle_request, RouteDecision};

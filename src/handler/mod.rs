//! Request handler module
//!
//! Per-request path resolution and static file serving with SPA fallback.

pub mod router;
pub mod spa;

pub use router::handle_request;

//! Static file server with single-page-application fallback.
//!
//! Files are served from a configured root directory. A request whose path
//! does not resolve to a file on disk receives the root document instead,
//! so URLs handled by a client-side router keep working on hard reloads.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

//! HTTP protocol layer module
//!
//! Protocol-level plumbing shared by the request handlers, decoupled from
//! the path-resolution logic.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

//! `ETag` generation and conditional request handling.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Compute a quoted `ETag` for a response body.
pub fn etag_for(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// Whether the client's `If-None-Match` header matches the computed `ETag`.
///
/// Handles comma-separated candidate lists and the `*` wildcard. A match
/// means the cached copy is current and a 304 should be sent.
pub fn if_none_match(header: Option<&str>, etag: &str) -> bool {
    header.is_some_and(|candidates| {
        candidates.split(',').any(|candidate| {
            let candidate = candidate.trim();
            candidate == etag || candidate == "*"
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etag_shape() {
        let etag = etag_for(b"hello world");
        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        assert!(etag.len() > 2);
    }

    #[test]
    fn test_etag_deterministic() {
        assert_eq!(etag_for(b"same content"), etag_for(b"same content"));
        assert_ne!(etag_for(b"content a"), etag_for(b"content b"));
    }

    #[test]
    fn test_if_none_match() {
        let etag = "\"abc123\"";
        assert!(if_none_match(Some("\"abc123\""), etag));
        assert!(if_none_match(Some("\"xyz\", \"abc123\""), etag));
        assert!(if_none_match(Some("*"), etag));
        assert!(!if_none_match(Some("\"different\""), etag));
        assert!(!if_none_match(None, etag));
    }
}

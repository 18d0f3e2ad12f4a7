//! Single-range `Range` header parsing (RFC 7233, bytes unit only).

/// A byte range resolved against a known body size. Both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

/// Outcome of parsing a `Range` header against a body of known size.
#[derive(Debug)]
pub enum RangeOutcome {
    /// A single satisfiable range was requested; respond with 206.
    Partial(ByteRange),
    /// The requested range cannot be satisfied; respond with 416.
    Unsatisfiable,
    /// No usable range (absent, malformed, or multipart); serve the full body.
    Full,
}

/// Parse a `Range` header value.
///
/// Supported forms:
/// - `bytes=start-end`
/// - `bytes=start-` (open ended)
/// - `bytes=-suffix` (final `suffix` bytes)
///
/// Multipart ranges and non-`bytes` units fall back to the full body.
pub fn parse(header: Option<&str>, size: usize) -> RangeOutcome {
    let Some(spec) = header.and_then(|h| h.strip_prefix("bytes=")) else {
        return RangeOutcome::Full;
    };
    if spec.contains(',') {
        return RangeOutcome::Full;
    }
    let Some((start_str, end_str)) = spec.split_once('-') else {
        return RangeOutcome::Full;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    // No byte of an empty body is addressable.
    if size == 0 {
        return RangeOutcome::Unsatisfiable;
    }

    // Suffix form: "bytes=-N" selects the final N bytes.
    if start_str.is_empty() {
        let Ok(suffix) = end_str.parse::<usize>() else {
            return RangeOutcome::Full;
        };
        if suffix == 0 {
            return RangeOutcome::Unsatisfiable;
        }
        return RangeOutcome::Partial(ByteRange {
            start: size.saturating_sub(suffix),
            end: size - 1,
        });
    }

    let Ok(start) = start_str.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if start >= size {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if end_str.is_empty() {
        size - 1
    } else {
        let Ok(end) = end_str.parse::<usize>() else {
            return RangeOutcome::Full;
        };
        end.min(size - 1)
    };

    if start > end {
        return RangeOutcome::Unsatisfiable;
    }
    RangeOutcome::Partial(ByteRange { start, end })
}

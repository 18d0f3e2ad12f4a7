//! HTTP response builders shared by the request handlers.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build a 200 response carrying a file body.
///
/// For HEAD requests the body is dropped but Content-Length still reflects
/// the full file size.
pub fn file(data: Bytes, content_type: &str, etag: &str, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .body(Full::new(body))
        .unwrap_or_else(|e| build_error_fallback("200", &e))
}

/// Build a 206 Partial Content response.
pub fn partial(
    data: Bytes,
    content_type: &str,
    etag: &str,
    range: crate::http::range::ByteRange,
    total_size: usize,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = range.end - range.start + 1;
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(206)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header(
            "Content-Range",
            format!("bytes {}-{}/{total_size}", range.start, range.end),
        )
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .body(Full::new(body))
        .unwrap_or_else(|e| build_error_fallback("206", &e))
}

/// Build a 304 Not Modified response.
pub fn not_modified(etag: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("ETag", etag)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| build_error_fallback("304", &e))
}

/// Build a 404 Not Found response.
pub fn not_found() -> Response<Full<Bytes>> {
    plain_text(404, "404 Not Found")
}

/// Build a 403 Forbidden response.
pub fn forbidden() -> Response<Full<Bytes>> {
    plain_text(403, "403 Forbidden")
}

/// Build a 500 Internal Server Error response.
pub fn internal_error() -> Response<Full<Bytes>> {
    plain_text(500, "500 Internal Server Error")
}

/// Build a 416 Range Not Satisfiable response.
pub fn range_not_satisfiable(total_size: usize) -> Response<Full<Bytes>> {
    Response::builder()
        .status(416)
        .header("Content-Type", "text/plain")
        .header("Content-Range", format!("bytes */{total_size}"))
        .body(Full::new(Bytes::from("416 Range Not Satisfiable")))
        .unwrap_or_else(|e| build_error_fallback("416", &e))
}

fn plain_text(status: u16, message: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .header("Content-Length", message.len())
        .body(Full::new(Bytes::from(message)))
        .unwrap_or_else(|e| build_error_fallback(message, &e))
}

/// A builder failure should never leave the connection without a response.
fn build_error_fallback(status: &str, error: &hyper::http::Error) -> Response<Full<Bytes>> {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
    Response::new(Full::new(Bytes::new()))
}

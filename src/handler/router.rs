//! Request entry point for the static responder.
//!
//! Extracts what the responder needs from the request, resolves the path
//! against the site root, and serves the result. No method constraint is
//! enforced; every method reaches the responder and HEAD responses omit
//! the body.

use std::convert::Infallible;
use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use tokio::fs;

use crate::config::Config;
use crate::handler::spa::{self, Resolution};
use crate::http::range::RangeOutcome;
use crate::http::{cache, mime, range, response};
use crate::logger::{self, AccessLogEntry};

/// Per-request data extracted from the HTTP request.
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub range: Option<String>,
}

/// Main entry point for HTTP request handling.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    cfg: Arc<Config>,
    peer: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let http_version = match req.version() {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    };
    let referer = header_value(&req, "referer");
    let user_agent = header_value(&req, "user-agent");

    let ctx = RequestContext {
        path: &path,
        is_head: method == Method::HEAD,
        if_none_match: header_value(&req, "if-none-match"),
        range: header_value(&req, "range"),
    };

    let resp = serve(&ctx, &cfg).await;

    if cfg.logging.access_log {
        let entry = AccessLogEntry {
            remote_addr: peer.ip().to_string(),
            time: chrono::Local::now(),
            method: method.to_string(),
            path,
            query,
            http_version: http_version.to_string(),
            status: resp.status().as_u16(),
            body_bytes: content_length(&resp),
            referer,
            user_agent,
            elapsed_us: u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
        };
        logger::log_access(&entry, &cfg.logging.access_log_format);
    }

    Ok(resp)
}

/// Resolve the request path and serve the resulting file.
async fn serve(ctx: &RequestContext<'_>, cfg: &Config) -> Response<Full<Bytes>> {
    match spa::resolve(&cfg.site, ctx.path) {
        Resolution::File(path) | Resolution::Fallback(path) => send_file(ctx, &path).await,
        Resolution::Missing => response::not_found(),
    }
}

/// Read a resolved file and build the response: conditional requests first,
/// then range requests, then the full body.
async fn send_file(ctx: &RequestContext<'_>, path: &Path) -> Response<Full<Bytes>> {
    let data = match fs::read(path).await {
        Ok(data) => data,
        Err(e) => return read_error(path, &e),
    };

    let content_type = mime::content_type_for(path.extension().and_then(|e| e.to_str()));
    let etag = cache::etag_for(&data);

    if cache::if_none_match(ctx.if_none_match.as_deref(), &etag) {
        return response::not_modified(&etag);
    }

    match range::parse(ctx.range.as_deref(), data.len()) {
        RangeOutcome::Partial(r) => {
            let body = if ctx.is_head {
                Bytes::new()
            } else {
                Bytes::from(data[r.start..=r.end].to_vec())
            };
            response::partial(body, content_type, &etag, r, data.len(), ctx.is_head)
        }
        RangeOutcome::Unsatisfiable => response::range_not_satisfiable(data.len()),
        RangeOutcome::Full => response::file(Bytes::from(data), content_type, &etag, ctx.is_head),
    }
}

/// Map a read failure onto the facility's standard status codes. The file
/// existed a moment ago, so `NotFound` here means it vanished underneath us.
fn read_error(path: &Path, e: &io::Error) -> Response<Full<Bytes>> {
    match e.kind() {
        io::ErrorKind::NotFound => response::not_found(),
        io::ErrorKind::PermissionDenied => {
            logger::log_warning(&format!("Permission denied reading {}: {e}", path.display()));
            response::forbidden()
        }
        _ => {
            logger::log_error(&format!("Failed to read {}: {e}", path.display()));
            response::internal_error()
        }
    }
}

fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn content_length(resp: &Response<Full<Bytes>>) -> usize {
    resp.headers()
        .get(hyper::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

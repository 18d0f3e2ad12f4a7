// Connection handling
// Serves one HTTP/1.1 connection per spawned task.

use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;

use crate::config::Config;
use crate::handler;
use crate::logger;

/// Serve an accepted connection in a background task.
///
/// The connection gets keep-alive when configured and an idle timeout
/// derived from the read/write timeouts; requests are dispatched to the
/// static responder.
pub fn spawn(stream: tokio::net::TcpStream, peer: std::net::SocketAddr, cfg: Arc<Config>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let idle_secs = std::cmp::max(cfg.performance.read_timeout, cfg.performance.write_timeout);
        let idle = std::time::Duration::from_secs(idle_secs);

        let mut builder = http1::Builder::new();
        if cfg.performance.keep_alive_timeout > 0 {
            builder.keep_alive(true);
        }

        let service_cfg = Arc::clone(&cfg);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let cfg = Arc::clone(&service_cfg);
                async move { handler::handle_request(req, cfg, peer).await }
            }),
        );

        match tokio::time::timeout(idle, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => logger::log_connection_error(&e),
            Err(_) => {
                logger::log_warning(&format!("Connection from {peer} timed out after {idle_secs}s"));
            }
        }
    });
}

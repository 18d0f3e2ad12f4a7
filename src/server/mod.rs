// Server module entry point
// Listener binding, accept loop, and graceful shutdown.

pub mod connection;
pub mod listener;
pub mod signal;

use std::sync::Arc;

use crate::config::Config;
use crate::logger;

/// Bind the configured address and serve until a shutdown signal arrives.
///
/// A bind failure is returned to the caller, which terminates the process
/// with a non-zero exit status.
pub async fn run(cfg: Arc<Config>) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;

    let tcp_listener = listener::bind(addr).map_err(|e| {
        logger::log_error(&format!("Failed to bind {addr}: {e}"));
        e
    })?;

    logger::log_server_start(&addr, &cfg);

    let shutdown = signal::shutdown_signal();

    loop {
        tokio::select! {
            accepted = tcp_listener.accept() => {
                match accepted {
                    Ok((stream, peer)) => connection::spawn(stream, peer, Arc::clone(&cfg)),
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }
            () = shutdown.notified() => {
                logger::log_shutdown();
                break;
            }
        }
    }

    Ok(())
}

// Signal handling module
// SIGTERM and SIGINT trigger a graceful stop of the accept loop.

use std::sync::Arc;
use tokio::sync::Notify;

/// Register shutdown signal handlers and return the notifier the accept
/// loop waits on. In-flight connections finish in their own tasks.
#[cfg(unix)]
pub fn shutdown_signal() -> Arc<Notify> {
    use tokio::signal::unix::{signal, SignalKind};

    let notify = Arc::new(Notify::new());
    let tx = Arc::clone(&notify);

    tokio::spawn(async move {
        let mut sigterm =
            signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
        let mut sigint =
            signal(SignalKind::interrupt()).expect("Failed to register SIGINT handler");

        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
        tx.notify_waiters();
    });

    notify
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn shutdown_signal() -> Arc<Notify> {
    let notify = Arc::new(Notify::new());
    let tx = Arc::clone(&notify);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tx.notify_waiters();
        }
    });

    notify
}

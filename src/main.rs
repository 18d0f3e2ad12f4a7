use std::process;
use std::sync::Arc;

use spa_server::config::Config;
use spa_server::logger;
use spa_server::server;

fn main() {
    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("[FATAL] Failed to load configuration: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = logger::init(&cfg) {
        eprintln!("[FATAL] Failed to initialize logger: {e}");
        process::exit(1);
    }

    // Worker thread count is configurable; default is one per CPU core.
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.listen.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = match runtime_builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("[FATAL] Failed to build runtime: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(server::run(Arc::new(cfg))) {
        logger::log_error(&format!("Server terminated: {e}"));
        process::exit(1);
    }
}

//! Item API entry point: resolve configuration once, size the runtime from
//! it, then serve until Ctrl+C.

use std::process::ExitCode;

use server::startup;
use tracing::{error, info};

fn main() -> ExitCode {
    startup::init_environment();
    std::panic::set_hook(Box::new(|info| {
        error!(event = "panic", message = %info, "unhandled panic");
    }));

    let cfg = match startup::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "no usable configuration");
            return ExitCode::FAILURE;
        }
    };

    let rt = match startup::build_runtime(&cfg.server) {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        pid = std::process::id(),
        threads = ?cfg.server.worker_threads,
        "item api starting"
    );

    match rt.block_on(server::run(cfg)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "item api exited with error");
            ExitCode::FAILURE
        }
    }
}

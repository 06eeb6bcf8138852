//! loadtest - memory-pressure demo service
//!
//! ```text
//! GET / ──▶ allocate 10 MiB ──▶ fill random ──▶ XXH3-128 ──▶ {"hash": "..."}
//! ```
//!
//! Usage: `loadtest [--env <name>] [--port <port>]`
//!
//! `--env` selects `config/<name>.yaml` (default `dev`), `--port` overrides
//! `gateway.port`.

use std::sync::Arc;

use anyhow::Context;
use loadtest::config::AppConfig;
use loadtest::gateway::{self, AppState};
use loadtest::logging::init_logging;
use loadtest::workload::{BUFFER_SIZE, HashSeed};

const GIT_HASH: &str = env!("LOADTEST_GIT_HASH");

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> anyhow::Result<Option<u16>> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            let port = args[i + 1]
                .parse()
                .with_context(|| format!("invalid --port value '{}'", args[i + 1]))?;
            return Ok(Some(port));
        }
    }
    Ok(None)
}

fn main() -> anyhow::Result<()> {
    let env = get_env();
    let mut app_config =
        AppConfig::load(&env).with_context(|| format!("failed to load '{}' config", env))?;
    if let Some(port) = get_port_override()? {
        app_config.gateway.port = port;
    }

    let _log_guard = init_logging(&app_config)?;

    tracing::info!(
        "starting loadtest {} ({}) in {} mode",
        env!("CARGO_PKG_VERSION"),
        GIT_HASH,
        env
    );

    let seed = HashSeed::random();
    tracing::info!(
        buffer_bytes = BUFFER_SIZE,
        "per-request buffer: {} MiB",
        BUFFER_SIZE / (1024 * 1024)
    );

    let state = Arc::new(AppState::new(seed, app_config.gateway.max_in_flight));

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    rt.block_on(gateway::run_server(&app_config.gateway, state))
}

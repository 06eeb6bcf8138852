//! loadtest - memory-pressure demo service
//!
//! A single `GET /` endpoint that allocates a 10 MiB buffer, fills it with
//! random bytes and returns its 128-bit XXH3 digest as `{"hash": "..."}`.
//! Each in-flight request holds its own buffer, which makes the process a
//! convenient way to exercise container memory limits.
//!
//! # Modules
//!
//! - [`workload`] - Buffer allocation, random fill, digest
//! - [`gateway`] - axum router, handler and server bootstrap
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing subscriber setup

pub mod config;
pub mod gateway;
pub mod logging;
pub mod workload;

pub use config::{AppConfig, ConfigError, GatewayConfig};
pub use gateway::AppState;
pub use workload::{BUFFER_SIZE, DIGEST_HEX_LEN, Digest, HashSeed, WorkloadError};

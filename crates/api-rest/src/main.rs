//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the toolbox REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging when you only want the REST server (with
//! OpenAPI/Swagger UI). The workspace's main `toolbox-run` binary also loads `.env` first.

use api_rest::config::rest_addr_from_env_value;
use api_rest::server::{init_tracing, serve, shutdown_signal};

/// Main entry point for the toolbox REST API server
///
/// # Environment Variables
/// - `TOOLBOX_REST_ADDR`: Server address (default: "0.0.0.0:5600")
/// - `RUST_LOG`: Log filter (default adds `api_rest=info`)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the server address is malformed or cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(&["api_rest=info"])?;

    let addr = rest_addr_from_env_value(std::env::var("TOOLBOX_REST_ADDR").ok())?;
    serve(addr, shutdown_signal()).await
}

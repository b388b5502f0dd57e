use api_rest::config::rest_addr_from_env_value;

/// Main entry point for the toolbox service
///
/// Loads `.env` if present, then serves the REST API (with Swagger UI) until
/// interrupted.
///
/// # Environment Variables
/// - `TOOLBOX_REST_ADDR`: REST server address (default: "0.0.0.0:5600")
/// - `RUST_LOG`: Log filter (default adds `toolbox_run=info` and `api_rest=info`)
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, binding or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    api_rest::server::init_tracing(&["toolbox_run=info", "api_rest=info"])?;

    let rest_addr = rest_addr_from_env_value(std::env::var("TOOLBOX_REST_ADDR").ok())?;
    api_rest::server::serve(rest_addr, api_rest::server::shutdown_signal()).await
}

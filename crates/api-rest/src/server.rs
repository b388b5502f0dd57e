//! Process startup shared by the `toolbox-run` and `toolbox-api-rest` binaries.

use std::future::Future;
use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` filter with each of `directives` added as a default.
pub fn env_filter(directives: &[&str]) -> anyhow::Result<EnvFilter> {
    let mut filter = EnvFilter::from_default_env();
    for directive in directives {
        filter = filter.add_directive(directive.parse()?);
    }
    Ok(filter)
}

/// Installs the global fmt subscriber.
///
/// # Errors
/// Returns an error if a directive is malformed.
pub fn init_tracing(directives: &[&str]) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(env_filter(directives)?)
        .with(tracing_subscriber::fmt::layer())
        .init();
    Ok(())
}

/// Binds `addr` and serves [`crate::router`] until `shutdown` resolves.
pub async fn serve<F>(addr: SocketAddr, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::info!("++ Starting toolbox REST on {}", addr);
    tracing::info!("++ Swagger UI at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, crate::router())
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("-- Toolbox REST stopped");
    Ok(())
}

/// Resolves on ctrl-c. If the handler cannot be installed it never resolves.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {:?}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accepts_crate_directives() {
        let filter = env_filter(&["api_rest=info", "toolbox_run=debug"]).unwrap();
        let rendered = filter.to_string();
        assert!(rendered.contains("api_rest=info"));
        assert!(rendered.contains("toolbox_run=debug"));
    }

    #[test]
    fn filter_rejects_malformed_directive() {
        assert!(env_filter(&["api_rest=loud"]).is_err());
    }

    #[tokio::test]
    async fn serve_stops_on_shutdown() {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        serve(addr, async {}).await.unwrap();
    }
}

mod api;
mod middleware;

use std::sync::Arc;

use axum::extract::Request;
use consign_index::IndexCache;
use consign_site::SiteUrls;
use tower::Layer;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, rate_limit_state, AppState},
    middleware::edge_routing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(consign_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // The index is built once, off the async workers, before serving.
    let cache = IndexCache::new(config.data_path.clone());
    let index = tokio::task::spawn_blocking(move || cache.get()).await?;
    tracing::info!(
        env = %config.env,
        stores = index.store_count(),
        states = index.states().len(),
        "store index ready"
    );

    let urls = Arc::new(SiteUrls::from_config(&config));
    let app = build_app(
        AppState {
            index,
            urls: Arc::clone(&urls),
            nearby_limit: config.nearby_cities_limit,
        },
        rate_limit_state(&config),
    );
    let service = axum::middleware::from_fn_with_state(urls, edge_routing).layer(app);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(
        listener,
        axum::ServiceExt::<Request>::into_make_service(service),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}

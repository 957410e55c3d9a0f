use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vela_api::{app, AppState};
use vela_connect::app_config::Config;
use vela_connect::{CompletionClient, ShopifyClient};
use vela_core::extract::OrderIdExtractor;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vela_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("Failed to load config");
    let port = config.server.port;
    tracing::info!("Starting Vela API on port {}", port);

    // One connection pool shared by both upstream clients.
    let http = reqwest::Client::new();
    let state = AppState {
        extractor: Arc::new(OrderIdExtractor::new()),
        orders: Arc::new(ShopifyClient::new(http.clone(), config.shopify)),
        composer: Arc::new(CompletionClient::new(http, config.llm)),
    };

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}

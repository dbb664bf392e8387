//! URL Guard server binary.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use urlguard::{build_router, AppState, ForestClassifier, PredictionService, ServiceConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::from_env();

    // A missing or corrupt artifact is fatal: the service must not accept
    // requests it cannot answer.
    let classifier = match ForestClassifier::load(&config.model_path) {
        Ok(classifier) => classifier,
        Err(err) => {
            tracing::error!("cannot load model from {}: {}", config.model_path, err);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "loaded forest with {} trees from {}",
        classifier.num_trees(),
        config.model_path
    );

    let state = AppState {
        service: Arc::new(PredictionService::new(Arc::new(classifier))),
    };
    let app = build_router(state);

    tracing::info!("URL classifier listening on {}", config.listen_addr);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

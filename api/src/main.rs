// Root Network explorer API server entry point

mod config;
mod db;
mod entity;
mod error;
mod handlers;
mod models;
mod services;

use std::net::SocketAddr;
use std::time::Duration;

use axum::routing::{get, Router};
use http::{header, Method};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::ApiConfig;
use db::DbPool;
use handlers::{
    get_address_extrinsics, get_address_native_transfers, get_address_report,
    get_address_token_transfers, get_address_transactions, get_block, get_block_extrinsics,
    get_block_transactions, get_blocks, get_chain_summary, get_event, get_events, get_extrinsic,
    get_extrinsics, get_token, get_tokens, get_transaction, get_transactions, health_check,
    readiness_check, AppState,
};

fn load_env() {
    dotenv::dotenv().ok();
}

#[tokio::main]
async fn main() {
    load_env();
    // Configure logging with tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load API configuration from environment
    let config = ApiConfig::from_env();
    tracing::info!(
        "Configuration loaded (native asset id {})",
        config.native_asset_id
    );

    // Establish database connection pool
    let db_pool = DbPool::new(&config)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Connected to database");

    let app_state = AppState::new(db_pool, &config);

    // Configure CORS policy
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::ACCESS_CONTROL_REQUEST_METHOD,
        ])
        .expose_headers([
            header::CONTENT_TYPE,
            header::CONTENT_LENGTH,
            header::CONTENT_DISPOSITION,
        ])
        .max_age(Duration::from_secs(3600));

    // Set up API routes
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/blocks", get(get_blocks))
        .route("/blocks/{number}", get(get_block))
        .route("/blocks/{number}/extrinsics", get(get_block_extrinsics))
        .route("/blocks/{number}/transactions", get(get_block_transactions))
        .route("/extrinsics", get(get_extrinsics))
        .route("/extrinsics/{id}", get(get_extrinsic))
        .route("/events", get(get_events))
        .route("/events/{event_id}", get(get_event))
        .route("/tokens", get(get_tokens))
        .route("/tokens/{contract_address}", get(get_token))
        .route("/transactions", get(get_transactions))
        .route("/transactions/{hash}", get(get_transaction))
        .route("/addresses/{address}/extrinsics", get(get_address_extrinsics))
        .route("/addresses/{address}/transactions", get(get_address_transactions))
        .route(
            "/addresses/{address}/native-transfers",
            get(get_address_native_transfers),
        )
        .route(
            "/addresses/{address}/token-transfers",
            get(get_address_token_transfers),
        )
        .route("/addresses/{address}/report", get(get_address_report))
        .route("/chain/summary", get(get_chain_summary))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(app_state);

    // Parse server address from config
    let addr: SocketAddr = config.server_addr().parse().expect("Invalid address");

    // Start HTTP server
    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}

use axum::{
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod db;
mod dto;
mod error;
mod handlers;
mod models;
mod mood;
mod sentiment;
mod services;
mod store;

use config::Config;
use services::model::ModelClient;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub model: ModelClient,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reflectica_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env();
    let config = Arc::new(config);

    // Database
    let db = db::create_pool(&config.database_url).await;

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations applied");

    let model = ModelClient::new(&config).expect("Failed to build completion client");

    // Completion-service health check, kept out of the request path
    if config.model_api_key.is_empty() {
        tracing::warn!("MODEL_API_KEY not set, skipping completion keep-alive worker");
    } else {
        services::model::spawn_keepalive_worker(model.clone(), config.model_keepalive_secs);
    }

    let state = AppState {
        db,
        config: config.clone(),
        model,
    };

    let api_routes = Router::new()
        .route("/api/turns", post(handlers::sessions::append_turn))
        .route("/api/sessions/end", post(handlers::sessions::end_session))
        .route(
            "/api/sessions/monthly/:user_id",
            get(handlers::dashboard::monthly_sessions),
        )
        .route(
            "/api/sessions/:session_id/transcript",
            get(handlers::sessions::session_transcript),
        )
        .route(
            "/api/dashboard/:user_id",
            get(handlers::dashboard::get_dashboard),
        )
        .route("/api/users/:user_id", delete(handlers::users::delete_user_data));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    let allowed_origins: Vec<axum::http::HeaderValue> = {
        let mut origins = vec![config
            .frontend_url
            .parse::<axum::http::HeaderValue>()
            .unwrap()];
        // In dev, also allow LAN access (e.g. testing from another device)
        if let Ok(extra) = std::env::var("CORS_EXTRA_ORIGINS") {
            for o in extra.split(',') {
                if let Ok(hv) = o.trim().parse::<axum::http::HeaderValue>() {
                    origins.push(hv);
                }
            }
        }
        origins
    };
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true);

    let app = Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

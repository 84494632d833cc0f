use axum::{Router, routing::get};
use chrono::Duration as ChronoDuration;
use paineis_access::{AccessEngine, LoginFlow, SessionStore};
use paineis_server::{
    auth::{self, AppState, OAuthProviderClient, SqlRoleDirectory},
    config::ServerConfig,
    nav, pages,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    // Connection pool for the role directory
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let store = SessionStore::new();

    // Spawn periodic expired-session sweep
    let sweep_store = store.clone();
    let cleanup_interval_secs = config.session.cleanup_interval_seconds;
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(cleanup_interval_secs));
        loop {
            interval.tick().await;
            let purged = sweep_store.purge_expired();
            if purged > 0 {
                tracing::debug!(purged_sessions = purged, "Periodic session sweep");
            }
        }
    });

    // Identity provider client and role directory
    let provider = OAuthProviderClient::new(config.oauth)
        .expect("invalid identity provider configuration");
    let directory = SqlRoleDirectory::new(db_pool);

    let flow = LoginFlow::new(
        provider,
        directory,
        store,
        ChronoDuration::minutes(config.session.duration_minutes),
    );
    let engine = AccessEngine::new(pages::default_registry());

    let app_state = Arc::new(AppState::new(flow, engine, config.session));

    let app = Router::new()
        // Auth routes
        .route("/auth/login", get(auth::login))
        .route("/auth/callback", get(auth::callback))
        .route("/auth/logout", get(auth::logout))
        // Session-facing surface
        .route("/nav", get(nav::nav))
        .route("/pages/{page_id}", get(pages::page))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}

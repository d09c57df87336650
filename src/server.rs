use std::{net::SocketAddr, str::FromStr, sync::Arc, time::Duration};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use reqwest::Client;
use tower_http::cors::CorsLayer;

use crate::{api, config, error, info, session::SessionStore};

/// Default per-call timeout; multi-page operations override it per request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Shared state for all handlers: one HTTP client and the session store.
pub struct AppState {
    pub http: Client,
    pub sessions: SessionStore,
}

pub async fn start(addr: String) {
    let http = match Client::builder().timeout(REQUEST_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => error!("Failed to build HTTP client: {}", e),
    };

    let state = Arc::new(AppState {
        http,
        sessions: SessionStore::new(),
    });

    let origin = match config::frontend_url().parse::<HeaderValue>() {
        Ok(origin) => origin,
        Err(e) => error!("Invalid FRONTEND_URL for CORS: {}", e),
    };
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let app = Router::new()
        .route("/health", get(api::health))
        .route("/auth/login", get(api::login))
        .route("/auth/callback", get(api::callback))
        .route("/auth/logout", get(api::logout))
        .route("/auth/me", get(api::me))
        .route("/auth/status", get(api::status))
        .route("/artists/search", get(api::search_artists))
        .route("/playlist", post(api::create_playlist))
        .route(
            "/poster/scan",
            post(api::scan_poster).layer(DefaultBodyLimit::max(api::MAX_POSTER_BYTES + 1024)),
        )
        .layer(cors)
        .with_state(state);

    let addr = match SocketAddr::from_str(&addr) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", addr, e),
    };

    info!("Listening on {}", addr);
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}

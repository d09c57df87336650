use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::{
    error::Error, management::TokenManager, server::AppState, spotify,
    types::{Artist, SessionData},
};

const DEFAULT_SEARCH_LIMIT: u32 = 8;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub limit: Option<u32>,
}

/// Searches the catalog for artists matching the query string.
pub async fn search_artists(
    State(app): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let (sid, mut session) = app.sessions.load(&jar).await;

    let result = run_search(&app, &mut session, &params).await;

    app.sessions.save(&sid, session).await;
    let jar = app.sessions.cookie(jar, &sid);
    (jar, result.map(Json))
}

async fn run_search(
    app: &AppState,
    session: &mut SessionData,
    params: &SearchParams,
) -> Result<Vec<Artist>, Error> {
    let token = TokenManager::new(&app.http, session).get_valid_token().await?;
    spotify::artists::search_artists(
        &app.http,
        &token,
        &params.q,
        params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
    )
    .await
}

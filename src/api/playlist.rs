use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{management, server::AppState, types::PlaylistRequest};

/// Assembles a playlist from the requested artists and inserts it into the
/// caller's account.
pub async fn create_playlist(
    State(app): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<PlaylistRequest>,
) -> impl IntoResponse {
    let (sid, mut session) = app.sessions.load(&jar).await;

    let result = management::build_playlist(&app.http, &mut session, &request).await;

    app.sessions.save(&sid, session).await;
    let jar = app.sessions.cookie(jar, &sid);
    (jar, result.map(Json))
}

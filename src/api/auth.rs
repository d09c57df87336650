use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::{
    config,
    error::Error,
    management::TokenManager,
    server::AppState,
    spotify,
    types::{SessionData, TokenState, UserProfile},
};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Starts the login flow: stores a fresh CSRF nonce in the session and
/// redirects the browser to the provider's consent screen.
pub async fn login(
    State(app): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, Error> {
    let (sid, mut session) = app.sessions.load(&jar).await;

    let state = spotify::auth::generate_state();
    session.oauth_state = Some(state.clone());
    app.sessions.save(&sid, session).await;

    let url = spotify::auth::authorize_url(&state)?;
    let jar = app.sessions.cookie(jar, &sid);
    Ok((jar, Redirect::to(&url)))
}

/// Handles the provider redirect: checks the state nonce, exchanges the
/// code for tokens, stores them in the session, and sends the browser back
/// to the frontend.
pub async fn callback(
    State(app): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, Error> {
    let (sid, mut session) = app.sessions.load(&jar).await;

    // The nonce is one-shot: consumed before any outcome is known.
    let stored_state = session.oauth_state.take();
    app.sessions.save(&sid, session.clone()).await;

    if let Some(error) = params.error {
        return Err(Error::Validation(format!(
            "authorization error from provider: {}",
            error
        )));
    }
    match (&params.state, &stored_state) {
        (Some(got), Some(expected)) if got == expected => {}
        _ => return Err(Error::StateMismatch),
    }
    let Some(code) = params.code else {
        return Err(Error::Validation(
            "no authorization code received".to_string(),
        ));
    };

    let token = spotify::auth::exchange_code(&app.http, &code).await?;
    session.token = Some(TokenState::from_response(Utc::now().timestamp(), &token));
    app.sessions.save(&sid, session).await;

    let jar = app.sessions.cookie(jar, &sid);
    Ok((jar, Redirect::to(&config::frontend_url())))
}

/// Drops the session server-side and clears the cookie.
pub async fn logout(State(app): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    let (sid, _) = app.sessions.load(&jar).await;
    app.sessions.clear(&sid).await;

    let jar = app.sessions.remove_cookie(jar);
    (jar, Redirect::to(&config::frontend_url()))
}

/// Returns the authenticated user's profile.
pub async fn me(State(app): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    let (sid, mut session) = app.sessions.load(&jar).await;

    let result = fetch_profile(&app, &mut session).await;

    // The token may have refreshed and the user id may now be cached.
    app.sessions.save(&sid, session).await;
    let jar = app.sessions.cookie(jar, &sid);
    (jar, result.map(Json))
}

async fn fetch_profile(app: &AppState, session: &mut SessionData) -> Result<UserProfile, Error> {
    let token = TokenManager::new(&app.http, session).get_valid_token().await?;
    let profile = spotify::user::get_profile(&app.http, &token).await?;
    session.user_id = Some(profile.id.clone());
    Ok(profile)
}

/// Quick check: does this session hold a token at all? No refresh is
/// attempted.
pub async fn status(State(app): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    let (sid, session) = app.sessions.load(&jar).await;
    let jar = app.sessions.cookie(jar, &sid);
    (jar, Json(json!({ "authenticated": session.token.is_some() })))
}

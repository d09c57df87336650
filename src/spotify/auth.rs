use rand::{Rng, distr::Alphanumeric};
use reqwest::Client;

use crate::{config, error::Error, types::TokenResponse};

/// Generates the CSRF state nonce carried through the authorization
/// redirect and checked on the callback.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Builds the provider authorization URL the browser is redirected to.
///
/// `show_dialog=true` forces the consent screen even for returning users so
/// switching Spotify accounts stays possible.
pub fn authorize_url(state: &str) -> Result<String, Error> {
    let params = [
        ("client_id", config::spotify_client_id()),
        ("response_type", "code".to_string()),
        ("redirect_uri", config::spotify_redirect_uri()),
        ("scope", config::spotify_scope()),
        ("state", state.to_string()),
        ("show_dialog", "true".to_string()),
    ];

    let url = reqwest::Url::parse_with_params(&config::spotify_auth_url(), &params)
        .map_err(|e| Error::Validation(format!("invalid authorization URL: {}", e)))?;
    Ok(url.to_string())
}

/// Exchanges an authorization code for an access/refresh token pair.
///
/// The token endpoint authenticates the application itself via HTTP Basic
/// (client id and secret), not the user's bearer token.
///
/// # Errors
///
/// [`Error::Upstream`] with the provider's status and body when the exchange
/// is rejected (expired or reused code, redirect URI mismatch).
pub async fn exchange_code(client: &Client, code: &str) -> Result<TokenResponse, Error> {
    let redirect_uri = config::spotify_redirect_uri();
    let response = client
        .post(config::spotify_token_url())
        .basic_auth(config::spotify_client_id(), Some(config::spotify_client_secret()))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Upstream { status, body });
    }

    Ok(response.json::<TokenResponse>().await?)
}

/// Exchanges a refresh token for a fresh access token.
///
/// Any non-success response means the stored refresh token is no longer
/// good for anything; the caller can only send the user back through login.
pub async fn refresh_token(client: &Client, refresh_token: &str) -> Result<TokenResponse, Error> {
    let response = client
        .post(config::spotify_token_url())
        .basic_auth(config::spotify_client_id(), Some(config::spotify_client_secret()))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(Error::AuthenticationRequired(
            "token refresh failed; please log in again".to_string(),
        ));
    }

    Ok(response.json::<TokenResponse>().await?)
}

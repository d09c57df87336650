//! Configuration management for the Lineuplist backend.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and a `.env` file in the working directory. Required
//! credentials have no defaults and are checked once at startup via
//! [`require`]; endpoint URLs and server settings fall back to sensible
//! defaults so a development setup only needs the four secrets.

use std::env;

/// Loads environment variables from a `.env` file in the working directory.
///
/// Missing files are not an error: deployments commonly inject configuration
/// through the process environment instead.
pub fn load_env() {
    let _ = dotenv::dotenv();
}

/// Touches every required configuration value so that a missing variable
/// fails at startup instead of in the middle of a request.
pub fn require() {
    spotify_client_id();
    spotify_client_secret();
    spotify_redirect_uri();
    gemini_api_key();
}

/// Returns the address the HTTP server binds to.
///
/// # Example
///
/// ```
/// let addr = server_addr(); // e.g., "127.0.0.1:8000"
/// ```
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8000".to_string())
}

/// Returns the frontend origin users are redirected to after login/logout,
/// also used as the allowed CORS origin.
pub fn frontend_url() -> String {
    env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string())
}

/// Returns the Spotify API client ID for authentication.
///
/// # Panics
///
/// Panics if the `SPOTIFY_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_CLIENT_ID").expect("SPOTIFY_CLIENT_ID must be set")
}

/// Returns the Spotify API client secret for authentication.
///
/// # Panics
///
/// Panics if the `SPOTIFY_CLIENT_SECRET` environment variable is not set.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> String {
    env::var("SPOTIFY_CLIENT_SECRET").expect("SPOTIFY_CLIENT_SECRET must be set")
}

/// Returns the Spotify OAuth redirect URI.
///
/// Must match the redirect URI registered in the Spotify application
/// settings.
///
/// # Panics
///
/// Panics if the `SPOTIFY_REDIRECT_URI` environment variable is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_REDIRECT_URI").expect("SPOTIFY_REDIRECT_URI must be set")
}

/// Returns the Gemini API key used for poster scanning.
///
/// # Panics
///
/// Panics if the `GEMINI_API_KEY` environment variable is not set.
pub fn gemini_api_key() -> String {
    env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set")
}

/// Returns the Spotify OAuth authorization URL.
pub fn spotify_auth_url() -> String {
    env::var("SPOTIFY_AUTH_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/authorize".to_string())
}

/// Returns the Spotify OAuth token exchange URL.
pub fn spotify_token_url() -> String {
    env::var("SPOTIFY_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

/// Returns the Spotify Web API base URL.
pub fn spotify_api_base() -> String {
    env::var("SPOTIFY_API_BASE").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

/// Returns the OAuth scope string requested during login.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_SCOPE").unwrap_or_else(|_| {
        "playlist-modify-public playlist-modify-private user-read-private user-read-email"
            .to_string()
    })
}

/// Returns the market (country code) used for track searches and album
/// listings.
pub fn spotify_market() -> String {
    env::var("SPOTIFY_MARKET").unwrap_or_else(|_| "US".to_string())
}

/// Returns the Gemini `generateContent` endpoint used for poster scanning.
pub fn gemini_api_url() -> String {
    env::var("GEMINI_API_URL").unwrap_or_else(|_| {
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
            .to_string()
    })
}

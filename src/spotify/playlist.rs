use reqwest::Client;
use serde_json::json;

use crate::{config, error::Error, spotify::http, types::CreatePlaylistResponse, warning};

/// Provider cap on URIs per insertion request.
pub const TRACK_BATCH_SIZE: usize = 100;

/// Creates a playlist owned by the authenticated user.
///
/// Tries the current-user endpoint first (it behaves more predictably under
/// restricted application review tiers), falling back to the user-scoped
/// endpoint on any non-success. Both attempts go through the 403-retry
/// primitive.
///
/// # Errors
///
/// [`Error::Upstream`] carrying the fallback's status and body when both
/// endpoints reject the creation.
pub async fn create_playlist(
    client: &Client,
    token: &str,
    user_id: &str,
    name: &str,
) -> Result<CreatePlaylistResponse, Error> {
    let body = json!({
        "name": name,
        "public": true,
        "description": "Created with Lineuplist",
    });

    let url = format!("{}/me/playlists", config::spotify_api_base());
    let response = http::post_with_auth_retry(client, &url, token, &body).await?;
    if response.status().is_success() {
        return Ok(response.json::<CreatePlaylistResponse>().await?);
    }
    warning!(
        "Playlist creation via /me/playlists returned {}; falling back to the user-scoped endpoint",
        response.status()
    );

    let fallback = format!("{}/users/{}/playlists", config::spotify_api_base(), user_id);
    let response = http::post_with_auth_retry(client, &fallback, token, &body).await?;
    if response.status().is_success() {
        return Ok(response.json::<CreatePlaylistResponse>().await?);
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(Error::Upstream { status, body })
}

/// Inserts track URIs into a playlist in batches of [`TRACK_BATCH_SIZE`]
/// and returns how many URIs landed in succeeded batches.
///
/// Best-effort and non-atomic: a failed batch is logged and does not roll
/// back earlier ones, and the caller only learns the aggregate count.
pub async fn add_tracks_to_playlist(
    client: &Client,
    token: &str,
    playlist_id: &str,
    uris: &[String],
) -> usize {
    let url = format!(
        "{}/playlists/{}/tracks",
        config::spotify_api_base(),
        playlist_id
    );

    let mut added = 0;
    for batch in uris.chunks(TRACK_BATCH_SIZE) {
        let body = json!({ "uris": batch });
        match http::post_with_auth_retry(client, &url, token, &body).await {
            Ok(response) if response.status().is_success() => added += batch.len(),
            Ok(response) => warning!(
                "Track insertion batch returned {}; {} URIs not added",
                response.status(),
                batch.len()
            ),
            Err(e) => warning!(
                "Track insertion batch failed: {}; {} URIs not added",
                e,
                batch.len()
            ),
        }
    }

    added
}

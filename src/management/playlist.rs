use reqwest::Client;

use crate::{
    config,
    error::Error,
    info,
    management::TokenManager,
    spotify, success,
    types::{PlaylistRequest, PlaylistSummary, SessionData, TrackCount},
    warning,
};

/// Per-artist override when present, otherwise the request's global count.
pub fn effective_count(request: &PlaylistRequest, artist_name: &str) -> TrackCount {
    request
        .per_artist_counts
        .get(artist_name)
        .copied()
        .unwrap_or(request.track_count)
}

/// Assembles a playlist for the given request.
///
/// Resolves the caller's user id (cached in the session after the first
/// profile lookup), creates the destination playlist, gathers tracks per
/// artist in request order, and inserts the combined sequence in one batched
/// call.
///
/// Playlist creation and token refresh failures are fatal; a single
/// artist failing to resolve or yield tracks only costs that artist's
/// contribution. The summary's `added` count may be lower than the number
/// of gathered URIs when insertion batches fail.
pub async fn build_playlist(
    http: &Client,
    session: &mut SessionData,
    request: &PlaylistRequest,
) -> Result<PlaylistSummary, Error> {
    let token = TokenManager::new(http, session).get_valid_token().await?;

    let user_id = match &session.user_id {
        Some(id) => id.clone(),
        None => {
            let profile = spotify::user::get_profile(http, &token).await?;
            session.user_id = Some(profile.id.clone());
            profile.id
        }
    };

    let playlist =
        spotify::playlist::create_playlist(http, &token, &user_id, &request.playlist_name).await?;
    info!("Created playlist '{}' ({})", playlist.name, playlist.id);

    let market = config::spotify_market();
    let mut uris: Vec<String> = Vec::new();
    for artist in &request.artists {
        let artist_id = match &artist.id {
            Some(id) => Some(id.clone()),
            None => match spotify::artists::resolve_artist_id(http, &token, &artist.name).await {
                Ok(id) => id,
                Err(e) => {
                    warning!("Artist resolution failed for '{}': {}; skipping", artist.name, e);
                    None
                }
            },
        };
        let Some(artist_id) = artist_id else {
            info!("No catalog match for '{}'; contributing no tracks", artist.name);
            continue;
        };

        let tracks = match effective_count(request, &artist.name) {
            TrackCount::All => {
                spotify::tracks::get_discography_tracks(http, &token, &artist_id, &market).await
            }
            TrackCount::Count(n) => {
                spotify::tracks::get_top_tracks(http, &token, &artist_id, n as usize, &market).await
            }
        };
        info!("Gathered {} tracks for '{}'", tracks.len(), artist.name);
        uris.extend(tracks);
    }

    let added = spotify::playlist::add_tracks_to_playlist(http, &token, &playlist.id, &uris).await;
    success!(
        "Playlist '{}' assembled: {} of {} tracks inserted",
        playlist.name,
        added,
        uris.len()
    );

    Ok(PlaylistSummary {
        name: playlist.name,
        added,
        url: playlist.external_urls.spotify,
    })
}

use reqwest::{Client, StatusCode};

use crate::{
    config,
    error::Error,
    spotify::http::{self, BackoffPolicy},
    types::{Artist, SearchArtistsResponse},
};

/// Searches the catalog for artists matching `query`.
///
/// Issues a single GET against the search endpoint and maps each hit to
/// `{id, name, genres, image}` where `genres` defaults to empty and `image`
/// is the first image URL, if any.
///
/// # Errors
///
/// [`Error::Upstream`] on any non-200 status, [`Error::RateLimited`] when the
/// backoff cap is exceeded, or a transport error.
pub async fn search_artists(
    client: &Client,
    token: &str,
    query: &str,
    limit: u32,
) -> Result<Vec<Artist>, Error> {
    let url = format!("{}/search", config::spotify_api_base());
    let params = [
        ("q", query.to_string()),
        ("type", "artist".to_string()),
        ("limit", limit.to_string()),
    ];

    let response =
        http::get_with_backoff(client, &url, &params, token, &BackoffPolicy::default(), None)
            .await?;

    if response.status() != StatusCode::OK {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Upstream { status, body });
    }

    let parsed = response.json::<SearchArtistsResponse>().await?;
    Ok(parsed
        .artists
        .items
        .into_iter()
        .map(|artist| Artist {
            id: artist.id,
            name: artist.name,
            genres: artist.genres,
            image: artist.images.first().map(|image| image.url.clone()),
        })
        .collect())
}

/// Resolves an artist name to a catalog id by taking the top search hit.
///
/// Best-effort fuzzy resolution with no similarity threshold: an ambiguous
/// name resolves to whatever the catalog ranks first. Returns `None` when
/// the search comes back empty.
pub async fn resolve_artist_id(
    client: &Client,
    token: &str,
    name: &str,
) -> Result<Option<String>, Error> {
    let hits = search_artists(client, token, name, 1).await?;
    Ok(hits.into_iter().next().map(|artist| artist.id))
}

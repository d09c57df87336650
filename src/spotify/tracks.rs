use std::{collections::HashSet, time::Duration};

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    error::Error,
    spotify::http::{self, BackoffPolicy},
    types::{AlbumsPage, ArtistDetail, SeveralAlbumsResponse, TrackObject, TrackSearchResponse},
    warning,
};

const SEARCH_PAGE_SIZE: u32 = 50;
const BROAD_QUERY_OFFSETS: [u32; 2] = [0, 50];

const ALBUM_PAGE_SIZE: u32 = 50;

/// Provider cap on ids per album-detail request.
const ALBUM_BATCH_SIZE: usize = 20;

/// Proactive delay between page and batch fetches, independent of the
/// reactive 429 backoff.
const PACING_DELAY_MS: u64 = 100;

/// Multi-page traversals get a longer per-request timeout than the client
/// default.
const DISCOGRAPHY_TIMEOUT: Duration = Duration::from_secs(30);

/// Merges search batches into a ranked URI list.
///
/// Batches are consumed in the order given, deduplicating by track URI with
/// first-seen-wins, so earlier batches take priority over later ones.
/// Survivors are filtered to tracks whose artist-credit list contains
/// `artist_id` (same-named artists show up in broad searches), stably sorted
/// by descending popularity, and truncated to `limit`.
pub fn merge_ranked(batches: Vec<Vec<TrackObject>>, artist_id: &str, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut merged: Vec<TrackObject> = Vec::new();
    for batch in batches {
        for track in batch {
            if seen.insert(track.uri.clone()) {
                merged.push(track);
            }
        }
    }

    merged.retain(|track| track.artists.iter().any(|credit| credit.id == artist_id));
    merged.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    merged.into_iter().take(limit).map(|track| track.uri).collect()
}

/// Gathers up to `limit` of an artist's most popular track URIs.
///
/// Fetches the artist's display name, then runs one strict
/// (`artist:"NAME"`) and two broad (`NAME`, offsets 0 and 50) track searches
/// concurrently, merging them through [`merge_ranked`] with the strict
/// results considered first.
///
/// Never fails: a failed artist lookup or search query contributes an empty
/// batch with a log line, so a single artist cannot abort playlist assembly.
pub async fn get_top_tracks(
    client: &Client,
    token: &str,
    artist_id: &str,
    limit: usize,
    market: &str,
) -> Vec<String> {
    let name = match artist_display_name(client, token, artist_id).await {
        Ok(name) => name,
        Err(e) => {
            warning!(
                "Artist lookup failed for {}: {}; contributing no tracks",
                artist_id,
                e
            );
            return Vec::new();
        }
    };

    // Strict query first so its hits win deduplication against broad results.
    let mut queries = vec![(format!("artist:\"{}\"", name), 0)];
    for offset in BROAD_QUERY_OFFSETS {
        queries.push((name.clone(), offset));
    }

    let mut handles = Vec::new();
    for (query, offset) in queries {
        let client = client.clone();
        let token = token.to_string();
        let market = market.to_string();
        handles.push(tokio::spawn(async move {
            search_tracks(&client, &token, &query, offset, &market).await
        }));
    }

    let mut batches = Vec::new();
    for handle in handles {
        match handle.await {
            Ok(Ok(tracks)) => batches.push(tracks),
            Ok(Err(e)) => warning!("Track search failed for '{}': {}", name, e),
            Err(e) => warning!("Task join error: {}", e),
        }
    }

    merge_ranked(batches, artist_id, limit)
}

/// Gathers every track URI from an artist's albums and singles.
///
/// Pages through the album listing following `next` links, collects all
/// album ids, then fetches full album details in batches of
/// [`ALBUM_BATCH_SIZE`] and flattens the track URIs found. A failed page
/// ends the traversal and a failed batch is skipped, each with a log line;
/// partial discography beats total failure.
pub async fn get_discography_tracks(
    client: &Client,
    token: &str,
    artist_id: &str,
    market: &str,
) -> Vec<String> {
    let album_ids = collect_album_ids(client, token, artist_id, market).await;

    let mut uris = Vec::new();
    for batch in album_ids.chunks(ALBUM_BATCH_SIZE) {
        let url = format!("{}/albums", config::spotify_api_base());
        let params = [("ids", batch.join(",")), ("market", market.to_string())];

        match http::get_with_backoff(
            client,
            &url,
            &params,
            token,
            &BackoffPolicy::default(),
            Some(DISCOGRAPHY_TIMEOUT),
        )
        .await
        {
            Ok(response) if response.status() == StatusCode::OK => {
                match response.json::<SeveralAlbumsResponse>().await {
                    Ok(parsed) => {
                        for album in parsed.albums.into_iter().flatten() {
                            uris.extend(album.tracks.items.into_iter().map(|track| track.uri));
                        }
                    }
                    Err(e) => warning!(
                        "Album batch response unreadable: {}; skipping {} albums",
                        e,
                        batch.len()
                    ),
                }
            }
            Ok(response) => warning!(
                "Album batch fetch returned {}; skipping {} albums",
                response.status(),
                batch.len()
            ),
            Err(e) => warning!(
                "Album batch fetch failed: {}; skipping {} albums",
                e,
                batch.len()
            ),
        }

        sleep(Duration::from_millis(PACING_DELAY_MS)).await;
    }

    uris
}

/// Follows the album listing's `next` links until exhausted and returns all
/// album ids seen, in page order.
async fn collect_album_ids(
    client: &Client,
    token: &str,
    artist_id: &str,
    market: &str,
) -> Vec<String> {
    let mut album_ids: Vec<String> = Vec::new();
    let mut url = format!(
        "{}/artists/{}/albums",
        config::spotify_api_base(),
        artist_id
    );
    // The next link already carries the query string.
    let mut params: Vec<(&str, String)> = vec![
        ("include_groups", "album,single".to_string()),
        ("market", market.to_string()),
        ("limit", ALBUM_PAGE_SIZE.to_string()),
    ];

    loop {
        let response = match http::get_with_backoff(
            client,
            &url,
            &params,
            token,
            &BackoffPolicy::default(),
            Some(DISCOGRAPHY_TIMEOUT),
        )
        .await
        {
            Ok(response) if response.status() == StatusCode::OK => response,
            Ok(response) => {
                warning!(
                    "Album page fetch for {} returned {}; keeping {} albums gathered so far",
                    artist_id,
                    response.status(),
                    album_ids.len()
                );
                break;
            }
            Err(e) => {
                warning!(
                    "Album page fetch for {} failed: {}; keeping {} albums gathered so far",
                    artist_id,
                    e,
                    album_ids.len()
                );
                break;
            }
        };

        let page = match response.json::<AlbumsPage>().await {
            Ok(page) => page,
            Err(e) => {
                warning!("Album page response unreadable: {}", e);
                break;
            }
        };

        album_ids.extend(page.items.into_iter().map(|album| album.id));

        match page.next {
            Some(next) => {
                url = next;
                params.clear();
            }
            None => break,
        }

        sleep(Duration::from_millis(PACING_DELAY_MS)).await;
    }

    album_ids
}

async fn artist_display_name(client: &Client, token: &str, artist_id: &str) -> Result<String, Error> {
    let url = format!("{}/artists/{}", config::spotify_api_base(), artist_id);
    let response =
        http::get_with_backoff(client, &url, &[], token, &BackoffPolicy::default(), None).await?;

    if response.status() != StatusCode::OK {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Upstream { status, body });
    }

    Ok(response.json::<ArtistDetail>().await?.name)
}

async fn search_tracks(
    client: &Client,
    token: &str,
    query: &str,
    offset: u32,
    market: &str,
) -> Result<Vec<TrackObject>, Error> {
    let url = format!("{}/search", config::spotify_api_base());
    let params = [
        ("q", query.to_string()),
        ("type", "track".to_string()),
        ("limit", SEARCH_PAGE_SIZE.to_string()),
        ("offset", offset.to_string()),
        ("market", market.to_string()),
    ];

    let response =
        http::get_with_backoff(client, &url, &params, token, &BackoffPolicy::default(), None)
            .await?;

    if response.status() != StatusCode::OK {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Upstream { status, body });
    }

    Ok(response.json::<TrackSearchResponse>().await?.tracks.items)
}

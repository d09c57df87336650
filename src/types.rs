use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Subtracted from the provider-declared lifetime so a token is treated as
/// expired slightly before it truly is.
pub const EXPIRY_BUFFER_SECS: i64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenState {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: i64,
}

impl TokenState {
    pub fn from_response(now: i64, resp: &TokenResponse) -> Self {
        TokenState {
            access_token: resp.access_token.clone(),
            refresh_token: resp.refresh_token.clone(),
            expires_at: now + resp.expires_in - EXPIRY_BUFFER_SECS,
        }
    }

    /// Overwrites this state in place; the old refresh token survives when
    /// the provider omits a new one.
    pub fn apply(&mut self, now: i64, resp: &TokenResponse) {
        self.access_token = resp.access_token.clone();
        if let Some(refresh) = &resp.refresh_token {
            self.refresh_token = Some(refresh.clone());
        }
        self.expires_at = now + resp.expires_in - EXPIRY_BUFFER_SECS;
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_in: i64,
}

/// Everything the server remembers about one browser session.
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    pub token: Option<TokenState>,
    pub oauth_state: Option<String>,
    pub user_id: Option<String>,
}

/// Per-artist track-count policy: a fixed top-N, or the whole discography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "TrackCountRepr")]
pub enum TrackCount {
    Count(u32),
    All,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TrackCountRepr {
    Count(u32),
    Keyword(String),
}

impl TryFrom<TrackCountRepr> for TrackCount {
    type Error = String;

    fn try_from(repr: TrackCountRepr) -> Result<Self, Self::Error> {
        match repr {
            TrackCountRepr::Count(0) => Err("track count must be positive".to_string()),
            TrackCountRepr::Count(n) => Ok(TrackCount::Count(n)),
            TrackCountRepr::Keyword(word) if word.eq_ignore_ascii_case("all") => {
                Ok(TrackCount::All)
            }
            TrackCountRepr::Keyword(word) => Err(format!(
                "invalid track count '{}' (expected a number or \"all\")",
                word
            )),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRef {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistRequest {
    pub playlist_name: String,
    pub artists: Vec<ArtistRef>,
    pub track_count: TrackCount,
    #[serde(default)]
    pub per_artist_counts: HashMap<String, TrackCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistSummary {
    pub name: String,
    pub added: usize,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

// Wire shapes below mirror the Spotify Web API JSON they deserialize from.

#[derive(Debug, Clone, Deserialize)]
pub struct SearchArtistsResponse {
    pub artists: ArtistItems,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistItems {
    pub items: Vec<ArtistObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistDetail {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackSearchResponse {
    pub tracks: TrackItems,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackItems {
    pub items: Vec<TrackObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackObject {
    pub uri: String,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub artists: Vec<ArtistLink>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistLink {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumsPage {
    pub items: Vec<AlbumRef>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumRef {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeveralAlbumsResponse {
    // Unknown ids come back as JSON nulls inside the array.
    #[serde(default)]
    pub albums: Vec<Option<AlbumDetail>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumDetail {
    #[serde(default)]
    pub tracks: AlbumTracks,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlbumTracks {
    #[serde(default)]
    pub items: Vec<TrackRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackRef {
    pub uri: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

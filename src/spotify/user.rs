use reqwest::{Client, StatusCode};

use crate::{
    config,
    error::Error,
    spotify::http::{self, BackoffPolicy},
    types::{ProfileResponse, UserProfile},
};

/// Fetches the authenticated user's profile.
pub async fn get_profile(client: &Client, token: &str) -> Result<UserProfile, Error> {
    let url = format!("{}/me", config::spotify_api_base());
    let response =
        http::get_with_backoff(client, &url, &[], token, &BackoffPolicy::default(), None).await?;

    if response.status() != StatusCode::OK {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Upstream { status, body });
    }

    let profile = response.json::<ProfileResponse>().await?;
    Ok(UserProfile {
        id: profile.id,
        display_name: profile.display_name,
        email: profile.email,
        image: profile.images.first().map(|image| image.url.clone()),
    })
}

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde_json::{Value, json};

use crate::{error::Error, server::AppState, vision};

/// Upload cap for poster images.
pub const MAX_POSTER_BYTES: usize = 10 * 1024 * 1024;

/// Accepts a multipart poster upload and returns the artist names the
/// vision model can read off it.
pub async fn scan_poster(
    State(app): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Value>, Error> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Validation(format!("malformed multipart body: {}", e)))?
    {
        let Some(mime) = field.content_type().map(|mime| mime.to_string()) else {
            continue;
        };
        if !mime.starts_with("image/") {
            return Err(Error::Validation(format!(
                "unsupported content type '{}'; expected an image",
                mime
            )));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::Validation(format!("failed to read upload: {}", e)))?;
        if data.len() > MAX_POSTER_BYTES {
            return Err(Error::Validation(format!(
                "poster too large ({} bytes, limit {})",
                data.len(),
                MAX_POSTER_BYTES
            )));
        }

        let artists = vision::extract_artists(&app.http, &data, &mime).await?;
        return Ok(Json(json!({ "artists": artists })));
    }

    Err(Error::Validation("no image part in upload".to_string()))
}

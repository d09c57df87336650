//! Poster scanning via the Gemini vision API.
//!
//! The contract with the model is deliberately narrow: send image bytes and
//! a MIME type, get back a JSON array of performer names. Everything else
//! (prompting, response unwrapping, markdown tolerance) lives here.

use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;
use serde_json::{Value, json};

use crate::{config, error::Error};

const PROMPT: &str = "Look at this festival poster image. Extract and return ONLY a JSON array \
of artist and band names you can see. Ignore sponsor names, presenter text, \
stage names, dates, and locations. Return only the performer names. \
Example format: [\"Arctic Monkeys\", \"Tame Impala\", \"Bicep\"]. \
Return nothing else, just the JSON array.";

const VISION_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends the poster image to the vision model and returns the artist names
/// it can read off it.
///
/// # Errors
///
/// [`Error::Upstream`] on a non-success model response,
/// [`Error::ExtractionFailed`] when the reply contains no parseable artist
/// list, or a transport error.
pub async fn extract_artists(
    client: &Client,
    image: &[u8],
    mime: &str,
) -> Result<Vec<String>, Error> {
    let payload = json!({
        "contents": [{
            "parts": [
                { "text": PROMPT },
                { "inline_data": { "mime_type": mime, "data": STANDARD.encode(image) } },
            ]
        }]
    });

    let response = client
        .post(config::gemini_api_url())
        .query(&[("key", config::gemini_api_key())])
        .json(&payload)
        .timeout(VISION_TIMEOUT)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Upstream { status, body });
    }

    let body: Value = response.json().await?;
    let text = body["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .ok_or_else(|| Error::ExtractionFailed("no text in model response".to_string()))?;

    parse_artist_list(text)
}

/// Pulls the JSON array out of the model's reply, tolerating markdown fences
/// and prose around it. Non-string entries are dropped; string entries are
/// trimmed and empty ones discarded.
pub fn parse_artist_list(text: &str) -> Result<Vec<String>, Error> {
    let (Some(start), Some(end)) = (text.find('['), text.rfind(']')) else {
        return Err(Error::ExtractionFailed(
            "no JSON array in model response".to_string(),
        ));
    };
    if end < start {
        return Err(Error::ExtractionFailed(
            "no JSON array in model response".to_string(),
        ));
    }

    let entries: Vec<Value> = serde_json::from_str(&text[start..=end])
        .map_err(|e| Error::ExtractionFailed(e.to_string()))?;

    Ok(entries
        .into_iter()
        .filter_map(|entry| entry.as_str().map(|name| name.trim().to_string()))
        .filter(|name| !name.is_empty())
        .collect())
}

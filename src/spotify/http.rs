use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tokio::time::sleep;

use crate::{error::Error, warning};

/// Assumed `Retry-After` when the provider sends a 429 without one.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 2;

/// Safety margin added on top of the server-supplied retry delay.
pub const RETRY_MARGIN_SECS: u64 = 1;

const AUTH_PROPAGATION_DELAY_SECS: u64 = 1;

/// Bounds for the rate-limit retry loop in [`get_with_backoff`].
///
/// `max_attempts` counts requests, not retries: the default of 3 allows two
/// sleeps before the last response is handed back to the caller. `cap_secs`
/// is the longest single wait this process will tolerate; anything above it
/// turns the 429 into a hard [`Error::RateLimited`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    pub max_attempts: u32,
    pub cap_secs: u64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        BackoffPolicy {
            max_attempts: 3,
            cap_secs: 10,
        }
    }
}

/// Outcome of one rate-limit classification step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep this many seconds, then reissue the request.
    Sleep(u64),
    /// The wait would exceed the cap; fail without sleeping.
    Abort { wait_secs: u64 },
    /// Attempts exhausted; hand the last response back to the caller.
    GiveUp,
}

impl BackoffPolicy {
    /// Classifies a 429 observed on `attempt` (1-based) given the
    /// server-supplied `Retry-After` seconds, if any.
    pub fn on_rate_limit(&self, attempt: u32, retry_after: Option<u64>) -> RetryDecision {
        let wait = retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS) + RETRY_MARGIN_SECS;
        if wait > self.cap_secs {
            RetryDecision::Abort { wait_secs: wait }
        } else if attempt >= self.max_attempts {
            RetryDecision::GiveUp
        } else {
            RetryDecision::Sleep(wait)
        }
    }
}

/// Issues a GET with bearer authorization, retrying on 429 according to
/// `policy`.
///
/// Any status other than 429 is returned as-is, including non-success ones;
/// classifying those is the caller's business. When retries run out before
/// the cap is hit, the last (still-429) response is returned rather than an
/// error, again leaving the policy decision to the caller.
///
/// # Arguments
///
/// * `query` - Query parameters; pass `&[]` when the URL already carries them
///   (pagination `next` links do)
/// * `timeout` - Optional per-request override of the client's default
///   timeout, used by multi-page operations
///
/// # Errors
///
/// [`Error::RateLimited`] when the server asks for a longer wait than the
/// policy cap allows, or a transport error from the underlying client.
pub async fn get_with_backoff(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
    token: &str,
    policy: &BackoffPolicy,
    timeout: Option<Duration>,
) -> Result<Response, Error> {
    let mut attempt: u32 = 1;

    loop {
        let mut request = client.get(url).query(query).bearer_auth(token);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;

        if response.status() != StatusCode::TOO_MANY_REQUESTS {
            return Ok(response);
        }

        match policy.on_rate_limit(attempt, retry_after_secs(&response)) {
            RetryDecision::Sleep(wait) => {
                warning!(
                    "Rate limited (429) on {}; retrying in {}s (attempt {}/{})",
                    url,
                    wait,
                    attempt,
                    policy.max_attempts
                );
                sleep(Duration::from_secs(wait)).await;
                attempt += 1;
            }
            RetryDecision::Abort { wait_secs } => {
                warning!(
                    "Rate limited (429) on {}; requested wait of {}s exceeds the {}s cap, giving up",
                    url,
                    wait_secs,
                    policy.cap_secs
                );
                return Err(Error::RateLimited { wait_secs });
            }
            RetryDecision::GiveUp => {
                warning!(
                    "Rate limited (429) on {}; retries exhausted after {} attempts",
                    url,
                    attempt
                );
                return Ok(response);
            }
        }
    }
}

/// Issues a POST with bearer authorization and a JSON body, retrying exactly
/// once after one second when the first response is a 403.
///
/// The provider's token grant is sometimes not yet visible to all backend
/// replicas for a brief window after authorization; one delayed retry covers
/// that. The second response is returned as-is, including a second 403.
///
/// # Errors
///
/// Only transport errors; status classification is left to the caller.
pub async fn post_with_auth_retry(
    client: &Client,
    url: &str,
    token: &str,
    body: &Value,
) -> Result<Response, Error> {
    let response = client.post(url).bearer_auth(token).json(body).send().await?;
    if response.status() != StatusCode::FORBIDDEN {
        return Ok(response);
    }

    warning!(
        "403 on {}; token grant may not have propagated yet, retrying once in {}s",
        url,
        AUTH_PROPAGATION_DELAY_SECS
    );
    sleep(Duration::from_secs(AUTH_PROPAGATION_DELAY_SECS)).await;

    let response = client.post(url).bearer_auth(token).json(body).send().await?;
    Ok(response)
}

fn retry_after_secs(response: &Response) -> Option<u64> {
    response
        .headers()
        .get("retry-after")?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

//! Server-side session store, scoped to a browser cookie.
//!
//! Entries live in process memory only (tokens are intentionally not
//! persisted) and expire one week after creation regardless of activity or
//! token expiry. Handlers load a working copy of the session data, hand it to
//! whatever needs it, and save it back explicitly once the request settles.

use std::{collections::HashMap, sync::Arc};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};
use tokio::sync::Mutex;

use crate::types::SessionData;

pub const SESSION_COOKIE: &str = "lineuplist_session";

const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7;

struct Entry {
    data: SessionData,
    expires_at: i64,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, Entry>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session referenced by the request cookie, creating a fresh
    /// one when the cookie is absent, unknown, or past its one-week window.
    /// The returned data is a working copy; mutations only stick after
    /// [`save`](Self::save).
    pub async fn load(&self, jar: &CookieJar) -> (String, SessionData) {
        let now = Utc::now().timestamp();
        let mut sessions = self.inner.lock().await;
        sessions.retain(|_, entry| entry.expires_at > now);

        if let Some(id) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) {
            if let Some(entry) = sessions.get(&id) {
                return (id, entry.data.clone());
            }
        }

        let id = new_session_id();
        sessions.insert(
            id.clone(),
            Entry {
                data: SessionData::default(),
                expires_at: now + SESSION_TTL_SECS,
            },
        );
        (id, SessionData::default())
    }

    /// Writes mutated session data back. A session that expired between load
    /// and save is dropped silently; the next request starts clean.
    pub async fn save(&self, id: &str, data: SessionData) {
        let mut sessions = self.inner.lock().await;
        if let Some(entry) = sessions.get_mut(id) {
            entry.data = data;
        }
    }

    pub async fn clear(&self, id: &str) {
        self.inner.lock().await.remove(id);
    }

    /// Attaches the session cookie to the response jar.
    pub fn cookie(&self, jar: CookieJar, id: &str) -> CookieJar {
        let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();
        jar.add(cookie)
    }

    pub fn remove_cookie(&self, jar: CookieJar) -> CookieJar {
        jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build())
    }
}

fn new_session_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

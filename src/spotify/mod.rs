//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API: OAuth token
//! exchange and refresh, artist and track lookups, and playlist management.
//! It handles all HTTP communication with the catalog service, including the
//! resilience policies the rest of the application relies on.
//!
//! ## Core Modules
//!
//! - [`http`] - The remote-call primitives everything else is built on: a
//!   GET that backs off on 429 responses honoring `Retry-After` up to a
//!   configurable cap, and a POST that retries once after 1 second on 403 to
//!   ride out token-grant propagation delays.
//! - [`auth`] - Authorization-code flow plumbing: authorize-URL
//!   construction with a CSRF state nonce, code-for-token exchange, and
//!   refresh-token exchange, both authenticated with HTTP Basic client
//!   credentials.
//! - [`artists`] - Artist search and best-effort name-to-id resolution.
//! - [`tracks`] - Track gathering: concurrent strict/broad searches merged
//!   into a popularity-ranked top-N, and exhaustive discography traversal
//!   via album pagination and batched detail fetches.
//! - [`playlist`] - Playlist creation (with a fallback endpoint) and batched
//!   best-effort track insertion.
//! - [`user`] - Profile lookup for the authenticated user.
//!
//! ## Error Handling
//!
//! Functions here return [`crate::error::Error`]; transient conditions (429
//! within the cap, a first 403) are absorbed by the primitives, anything
//! else is classified and surfaced to the caller. The track-gathering
//! functions are the exception: they swallow failures into empty results so
//! one artist cannot abort a whole playlist assembly.

pub mod artists;
pub mod auth;
pub mod http;
pub mod playlist;
pub mod tracks;
pub mod user;

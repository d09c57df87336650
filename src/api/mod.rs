//! # API Module
//!
//! HTTP route handlers for the Lineuplist backend. Handlers are thin
//! delegators: they load the cookie-scoped session, hand a working copy to
//! the management/catalog layers, save the session back, and translate
//! results into responses. All failure mapping lives in
//! [`crate::error::Error`]'s `IntoResponse` impl.
//!
//! ## Endpoints
//!
//! - [`login`] / [`callback`] / [`logout`] - OAuth authorization-code flow
//!   against the provider (state-nonce checked on the way back)
//! - [`me`] / [`status`] - profile fetch and a cheap authentication probe
//! - [`search_artists`] - artist search passthrough
//! - [`create_playlist`] - playlist assembly from an artist list
//! - [`scan_poster`] - poster image upload + vision extraction
//! - [`health`] - health check for monitoring

mod auth;
mod health;
mod playlist;
mod scan;
mod search;

pub use auth::{callback, login, logout, me, status};
pub use health::health;
pub use playlist::create_playlist;
pub use scan::{MAX_POSTER_BYTES, scan_poster};
pub use search::search_artists;

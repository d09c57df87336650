//! High-level coordination between the session, the token lifecycle, and
//! the catalog client: transparent token refresh and playlist assembly.

mod auth;
mod playlist;

pub use auth::TokenManager;
pub use playlist::{build_playlist, effective_count};

//! Lineuplist backend library
//!
//! This library implements an HTTP backend that authenticates a browser session
//! against the Spotify Web API and assembles playlists from lists of artist
//! names, optionally extracted from an uploaded festival-poster image via the
//! Gemini vision API.
//!
//! # Modules
//!
//! - `api` - HTTP route handlers (auth flow, search, playlist, poster scan)
//! - `config` - Configuration management and environment variables
//! - `error` - Error kinds and their HTTP response mapping
//! - `management` - Token lifecycle and playlist assembly orchestration
//! - `server` - Router wiring and server startup
//! - `session` - Cookie-scoped in-memory session store
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `vision` - Poster image artist extraction (Gemini)

pub mod api;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod session;
pub mod spotify;
pub mod types;
pub mod vision;

/// Prints an informational message with a blue bullet point.
///
/// Used for general status output during startup and request processing.
/// Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// info!("No catalog match for '{}'", name);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// success!("Playlist '{}' created with {} tracks", name, count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for unrecoverable startup failures (missing configuration, bind
/// errors). Request-path failures go through [`error::Error`] instead, which
/// answers the request rather than killing the server.
///
/// # Example
///
/// ```
/// error!("Failed to parse server address: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues: retry decisions, skipped artists, failed
/// batches. Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// warning!("Rate limited (429) on {}; retrying in {}s", url, wait);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

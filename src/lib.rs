//! Spotify Web Relay Library
//!
//! This library implements a small web front-end for a Spotify account. A browser
//! signs in through the OAuth authorization-code flow, after which the relay
//! fetches the user's profile, saved tracks, playlists and recommendations on
//! their behalf and renders them as plain HTML pages.
//!
//! # Modules
//!
//! - `api` - Route handlers for every page and action
//! - `config` - Environment loading and the `Settings` value
//! - `error` - The application error type and its HTTP mapping
//! - `management` - In-memory session store holding access tokens
//! - `server` - Router assembly and the listening loop
//! - `spotify` - OAuth handshake and the authorized Web API client
//! - `types` - Spotify response shapes
//! - `utils` - Cookie, encoding and id helpers
//! - `views` - Server-side HTML rendering
//!
//! # Example
//!
//! ```
//! use spotrelay::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> spotrelay::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::Settings::from_env()?;
//!     server::start_server(settings, false).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod views;

/// Boxed-error result used by startup code.
///
/// Request handling uses [`error::AppError`] instead; this alias only covers the
/// paths that run before the server accepts connections.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
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
/// Used when a login completes or a playlist edit goes through.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for failures that leave the server unable to start, such as an
/// unparsable bind address or a port already in use. Request-time failures go
/// through [`warning!`] and an error page instead.
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
/// Every error that is turned into an HTTP response is reported here first.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

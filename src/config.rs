//! Configuration management for the Spotify web relay.
//!
//! Values come from environment variables, optionally seeded from a `.env` file
//! in the platform-specific local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults for everything except the client credentials
//!
//! Unlike a CLI that reads each variable on demand, the server resolves all of
//! them once into a [`Settings`] value at startup and shares it with every
//! handler, so a missing secret is reported before the first request arrives.

use std::{env, path::PathBuf};

use thiserror::Error;

pub const ENV_SERVER_ADDRESS: &str = "SERVER_ADDRESS";
pub const ENV_CLIENT_ID: &str = "SPOTIFY_API_AUTH_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "SPOTIFY_API_AUTH_CLIENT_SECRET";
pub const ENV_REDIRECT_URI: &str = "SPOTIFY_API_REDIRECT_URI";
pub const ENV_AUTH_URL: &str = "SPOTIFY_API_AUTH_URL";
pub const ENV_TOKEN_URL: &str = "SPOTIFY_API_TOKEN_URL";
pub const ENV_API_URL: &str = "SPOTIFY_API_URL";
pub const ENV_PUBLIC_DIR: &str = "SPOTRELAY_PUBLIC_DIR";

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/callback";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Permissions requested on the consent screen.
pub const SPOTIFY_SCOPE: &str = "playlist-modify-public playlist-modify-private user-library-read";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{key} is not a valid URL: {reason}")]
    InvalidUrl { key: &'static str, reason: String },
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives under `spotrelay/.env` in the platform data directory:
/// - Linux: `~/.local/share/spotrelay/.env`
/// - macOS: `~/Library/Application Support/spotrelay/.env`
/// - Windows: `%LOCALAPPDATA%/spotrelay/.env`
///
/// The directory is created if needed. A missing `.env` file is not an error,
/// since every value can also come straight from the process environment.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(format!("{}: {}", path.display(), e)),
    }
}

/// Path of the `.env` file read by [`load_env`].
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotrelay/.env");
    path
}

/// Resolved runtime configuration shared by all handlers.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server_addr: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub public_dir: PathBuf,
}

impl Settings {
    /// Builds settings from the process environment.
    ///
    /// # Errors
    ///
    /// Fails if the client id or client secret is unset or blank, or if one of
    /// the URL settings does not parse. All other values fall back to the
    /// Spotify defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    ///
    /// [`Settings::from_env`] is this with `std::env::var`; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            let value = lookup(key).ok_or(ConfigError::Missing(key))?;
            if value.trim().is_empty() {
                return Err(ConfigError::Empty(key));
            }
            Ok(value)
        };
        let optional = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let url = |key: &'static str, default: &str| -> Result<String, ConfigError> {
            let value = optional(key, default);
            reqwest::Url::parse(&value).map_err(|e| ConfigError::InvalidUrl {
                key,
                reason: e.to_string(),
            })?;
            Ok(value)
        };

        Ok(Self {
            server_addr: optional(ENV_SERVER_ADDRESS, DEFAULT_SERVER_ADDRESS),
            client_id: required(ENV_CLIENT_ID)?,
            client_secret: required(ENV_CLIENT_SECRET)?,
            redirect_uri: url(ENV_REDIRECT_URI, DEFAULT_REDIRECT_URI)?,
            auth_url: url(ENV_AUTH_URL, DEFAULT_AUTH_URL)?,
            token_url: url(ENV_TOKEN_URL, DEFAULT_TOKEN_URL)?,
            api_url: trim_trailing_slash(url(ENV_API_URL, DEFAULT_API_URL)?),
            public_dir: PathBuf::from(optional(ENV_PUBLIC_DIR, DEFAULT_PUBLIC_DIR)),
        })
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let settings =
            Settings::from_lookup(lookup(&[(ENV_CLIENT_ID, "id"), (ENV_CLIENT_SECRET, "secret")]))
                .unwrap();

        assert_eq!(settings.server_addr, DEFAULT_SERVER_ADDRESS);
        assert_eq!(settings.redirect_uri, DEFAULT_REDIRECT_URI);
        assert_eq!(settings.auth_url, DEFAULT_AUTH_URL);
        assert_eq!(settings.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.public_dir, PathBuf::from("public"));
    }

    #[test]
    fn test_missing_secret() {
        let err = Settings::from_lookup(lookup(&[(ENV_CLIENT_ID, "id")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_CLIENT_SECRET)));
        assert_eq!(err.to_string(), "SPOTIFY_API_AUTH_CLIENT_SECRET must be set");
    }

    #[test]
    fn test_blank_client_id() {
        let err = Settings::from_lookup(lookup(&[(ENV_CLIENT_ID, "  "), (ENV_CLIENT_SECRET, "s")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Empty(ENV_CLIENT_ID)));
    }

    #[test]
    fn test_invalid_token_url() {
        let err = Settings::from_lookup(lookup(&[
            (ENV_CLIENT_ID, "id"),
            (ENV_CLIENT_SECRET, "secret"),
            (ENV_TOKEN_URL, "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { key: ENV_TOKEN_URL, .. }));
    }

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        let settings = Settings::from_lookup(lookup(&[
            (ENV_CLIENT_ID, "id"),
            (ENV_CLIENT_SECRET, "secret"),
            (ENV_API_URL, "http://127.0.0.1:9999/v1//"),
        ]))
        .unwrap();
        assert_eq!(settings.api_url, "http://127.0.0.1:9999/v1");
    }
}

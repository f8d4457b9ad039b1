//! # API Module
//!
//! Route handlers for the relay's pages and actions. Every handler reads the
//! shared [`AppState`] from an `Extension`, resolves the browser's session from
//! its cookie where a Spotify call is needed, and either renders a view or
//! redirects.
//!
//! ## Endpoints
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /` | [`index`] |
//! | `GET /health` | [`health`] |
//! | `GET /authorize` | [`authorize`] |
//! | `GET /callback` | [`callback`] |
//! | `GET /dashboard` | [`dashboard`] |
//! | `GET /recommendations` | [`recommendations`] |
//! | `GET /playlists` | [`playlists`] |
//! | `GET /playlist/{playlist_id}` | [`playlist`] |
//! | `POST /playlist/{playlist_id}/remove-track/{track_id}` | [`remove_track`] |
//!
//! ## Errors
//!
//! Page handlers return `Result<_, AppError>` and fall back to the `error`
//! view. The track-removal action answers failures with a plain-text 500
//! through [`crate::error::PlainTextError`].

mod auth;
mod health;
mod index;
mod library;
mod playlist;

use std::sync::Arc;

use axum::{
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};

pub use auth::{CallbackParams, authorize, callback};
pub use health::health;
pub use index::index;
pub use library::{RecommendationParams, dashboard, recommendations};
pub use playlist::{playlist, playlists, remove_track};

use crate::{
    config::Settings,
    error::AppError,
    management::{SessionId, SessionStore},
    spotify::SpotifyClient,
    types::AccessToken,
    utils,
};

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub spotify: SpotifyClient,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let spotify = SpotifyClient::new(reqwest::Client::new(), settings.api_url.clone());
        Self {
            settings: Arc::new(settings),
            spotify,
            sessions: SessionStore::new(),
        }
    }
}

/// A session that holds a token.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub session_id: SessionId,
    pub token: AccessToken,
    pub signed_in_at: DateTime<Utc>,
}

/// Resolves the session cookie to its stored token.
///
/// There is no local validity check; an expired token is only noticed when
/// Spotify answers 401.
pub async fn require_token(state: &AppState, headers: &HeaderMap) -> Result<Authenticated, AppError> {
    let session_id = utils::get_cookie_value(headers, utils::SESSION_COOKIE)
        .map(SessionId::from)
        .ok_or(AppError::NotAuthenticated)?;

    let session = state
        .sessions
        .session(&session_id)
        .await
        .ok_or(AppError::NotAuthenticated)?;

    Ok(Authenticated {
        session_id,
        token: session.token,
        signed_in_at: session.signed_in_at,
    })
}

/// `302 Found` to `location`.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

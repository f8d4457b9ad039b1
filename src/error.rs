//! Application error type and its mapping onto HTTP responses.
//!
//! Every handler returns `Result<_, AppError>`. Page routes rely on the
//! [`IntoResponse`] impl below, which renders the `error` view. Form actions
//! that must answer in plain text wrap the error in [`PlainTextError`].

use axum::{
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::{config::ConfigError, views, warning};

#[derive(Debug, Error)]
pub enum AppError {
    /// Network failure talking to Spotify.
    #[error("request to Spotify failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Spotify answered with a body that does not have the expected shape.
    #[error("unexpected response from Spotify: {0}")]
    Decode(#[from] serde_json::Error),

    /// Spotify answered with a non-2xx status.
    #[error("Spotify returned {status}: {message}")]
    Upstream { status: StatusCode, message: String },

    /// The browser has no session, or the session holds no token yet.
    #[error("not signed in")]
    NotAuthenticated,

    /// `/callback` was hit without a `code` parameter.
    #[error("authorization code missing from callback")]
    MissingCode,

    /// The user declined the consent screen.
    #[error("authorization was denied: {0}")]
    AuthorizationDenied(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Upstream { status, .. } if *status == StatusCode::UNAUTHORIZED => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Upstream { .. } | AppError::Http(_) | AppError::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::NotAuthenticated | AppError::AuthorizationDenied(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::MissingCode => StatusCode::BAD_REQUEST,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether signing in again is the likely fix.
    pub fn needs_login(&self) -> bool {
        self.status() == StatusCode::UNAUTHORIZED
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        warning!("{}", self);
        (self.status(), Html(views::error(&self))).into_response()
    }
}

/// Maps any [`AppError`] to `500 Internal Server Error` with a plain-text body.
#[derive(Debug)]
pub struct PlainTextError {
    pub message: &'static str,
    pub source: AppError,
}

impl IntoResponse for PlainTextError {
    fn into_response(self) -> Response {
        warning!("{}: {}", self.message, self.source);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.message,
        )
            .into_response()
    }
}

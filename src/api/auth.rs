use axum::{
    Extension,
    extract::Query,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    api::{AppState, found},
    error::AppError,
    info,
    management::SessionId,
    spotify, success,
    types::AccessToken,
    utils,
};

/// Sends the browser to Spotify's consent screen.
pub async fn authorize(Extension(state): Extension<AppState>) -> Result<Response, AppError> {
    let url = spotify::auth::authorize_url(&state.settings)?;
    info!("Redirecting to Spotify authorization");
    Ok(found(url.as_str()))
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    /// Set instead of `code` when the user declines.
    pub error: Option<String>,
}

/// Completes the authorization-code flow.
///
/// Exchanges `code` for an access token, stores it in a fresh session, sets
/// the session cookie and redirects to `/dashboard`. Any session the browser
/// already had is dropped, so a login always yields a new session id.
pub async fn callback(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
) -> Result<Response, AppError> {
    if let Some(error) = params.error {
        return Err(AppError::AuthorizationDenied(error));
    }
    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or(AppError::MissingCode)?;

    let token: AccessToken =
        spotify::auth::exchange_code(state.spotify.http(), &state.settings, &code)
            .await?
            .into();

    if let Some(previous) = utils::get_cookie_value(&headers, utils::SESSION_COOKIE) {
        state.sessions.remove(&SessionId::from(previous)).await;
    }
    let session_id = state.sessions.create(token).await;

    let active = state.sessions.len().await;
    success!("Signed in to Spotify ({} active sessions)", active);

    Ok((
        StatusCode::FOUND,
        [
            (header::LOCATION, "/dashboard".to_string()),
            (header::SET_COOKIE, utils::session_cookie(session_id.as_str())),
        ],
    )
        .into_response())
}

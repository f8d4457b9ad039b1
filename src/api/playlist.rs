use axum::{
    Extension,
    extract::Path,
    http::HeaderMap,
    response::{Html, Response},
};

use crate::{
    api::{AppState, found, require_token},
    error::{AppError, PlainTextError},
    spotify::{library, playlist as spotify_playlist},
    success, views,
};

const REMOVE_FAILED: &str = "Failed to remove track from playlist";

pub async fn playlists(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let auth = require_token(&state, &headers).await?;

    let playlists = spotify_playlist::list(&state.spotify, &auth.token).await?;
    let user = library::current_user(&state.spotify, &auth.token).await?;

    Ok(Html(views::playlists(&user, &playlists.items)))
}

/// Playlist detail page. Any failure, including a missing session, renders
/// the `error` view.
pub async fn playlist(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Path(playlist_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let auth = require_token(&state, &headers).await?;

    let details = spotify_playlist::get(&state.spotify, &auth.token, &playlist_id).await?;

    Ok(Html(views::tracks(&details)))
}

/// Removes one track and sends the browser back to the playlist page.
///
/// Failures answer `500` with a plain-text body instead of an HTML page.
pub async fn remove_track(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Path((playlist_id, track_id)): Path<(String, String)>,
) -> Result<Response, PlainTextError> {
    match remove(&state, &headers, &playlist_id, &track_id).await {
        Ok(snapshot) => {
            success!(
                "Removed track {} from playlist {} (snapshot {})",
                track_id,
                playlist_id,
                snapshot.as_deref().unwrap_or("-")
            );
            Ok(found(&format!("/playlist/{}", playlist_id)))
        }
        Err(source) => Err(PlainTextError {
            message: REMOVE_FAILED,
            source,
        }),
    }
}

async fn remove(
    state: &AppState,
    headers: &HeaderMap,
    playlist_id: &str,
    track_id: &str,
) -> Result<Option<String>, AppError> {
    let auth = require_token(state, headers).await?;
    spotify_playlist::remove_track(&state.spotify, &auth.token, playlist_id, track_id).await
}

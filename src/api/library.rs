use axum::{
    Extension,
    extract::Query,
    http::HeaderMap,
    response::Html,
};
use serde::Deserialize;

use crate::{
    api::{AppState, require_token},
    error::AppError,
    spotify::library::{self, SAVED_TRACKS_LIMIT},
    views,
};

/// Profile plus the 30 most recently saved tracks.
pub async fn dashboard(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let auth = require_token(&state, &headers).await?;

    let user = library::current_user(&state.spotify, &auth.token).await?;
    let tracks = library::saved_tracks(&state.spotify, &auth.token, SAVED_TRACKS_LIMIT).await?;

    Ok(Html(views::dashboard(
        &user,
        &tracks.items,
        Some(auth.signed_in_at),
    )))
}

#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub track: String,
}

pub async fn recommendations(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Query(params): Query<RecommendationParams>,
) -> Result<Html<String>, AppError> {
    let auth = require_token(&state, &headers).await?;

    let recommended =
        library::recommendations(&state.spotify, &auth.token, &params.artist, &params.track)
            .await?;

    Ok(Html(views::recommendation(&recommended.tracks)))
}

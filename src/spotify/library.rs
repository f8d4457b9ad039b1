use crate::{
    error::AppError,
    spotify::SpotifyClient,
    types::{AccessToken, Paging, Recommendations, SavedTrack, User},
};

/// Number of saved tracks shown on the dashboard.
pub const SAVED_TRACKS_LIMIT: u32 = 30;

/// Genre seed sent alongside the artist and track seeds.
pub const RECOMMENDATION_GENRE: &str = "rock";

/// `GET /me`
pub async fn current_user(client: &SpotifyClient, token: &AccessToken) -> Result<User, AppError> {
    client.get_json(token, "/me", &[]).await
}

/// `GET /me/tracks?limit=<limit>`, most recently saved first.
pub async fn saved_tracks(
    client: &SpotifyClient,
    token: &AccessToken,
    limit: u32,
) -> Result<Paging<SavedTrack>, AppError> {
    let limit = limit.to_string();
    client
        .get_json(token, "/me/tracks", &[("limit", limit.as_str())])
        .await
}

/// Retrieves tracks seeded by one artist, one track and the fixed genre.
///
/// Seeds are passed through as given; Spotify rejects empty or unknown ids
/// with a 400, which surfaces as [`AppError::Upstream`].
pub async fn recommendations(
    client: &SpotifyClient,
    token: &AccessToken,
    artist_id: &str,
    track_id: &str,
) -> Result<Recommendations, AppError> {
    client
        .get_json(
            token,
            "/recommendations",
            &[
                ("seed_artists", artist_id),
                ("seed_genres", RECOMMENDATION_GENRE),
                ("seed_tracks", track_id),
            ],
        )
        .await
}

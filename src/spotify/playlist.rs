use crate::{
    error::AppError,
    spotify::SpotifyClient,
    types::{AccessToken, Paging, PlaylistDetails, PlaylistSummary, RemoveTracksRequest},
};

/// `GET /me/playlists`, first page only.
pub async fn list(
    client: &SpotifyClient,
    token: &AccessToken,
) -> Result<Paging<PlaylistSummary>, AppError> {
    client.get_json(token, "/me/playlists", &[]).await
}

/// `GET /playlists/{id}`. The id is passed through unvalidated.
pub async fn get(
    client: &SpotifyClient,
    token: &AccessToken,
    playlist_id: &str,
) -> Result<PlaylistDetails, AppError> {
    client
        .get_json(token, &format!("/playlists/{}", playlist_id), &[])
        .await
}

/// Removes every occurrence of one track from a playlist.
///
/// Sends `DELETE /playlists/{id}/tracks` with
/// `{"tracks":[{"uri":"spotify:track:<track_id>"}]}` and returns the new
/// snapshot id when Spotify reports one.
pub async fn remove_track(
    client: &SpotifyClient,
    token: &AccessToken,
    playlist_id: &str,
    track_id: &str,
) -> Result<Option<String>, AppError> {
    let body = RemoveTracksRequest::single(track_id);
    let answer = client
        .delete_json(token, &format!("/playlists/{}/tracks", playlist_id), &body)
        .await?;

    Ok(answer["snapshot_id"].as_str().map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_body_shape() {
        let body = serde_json::to_string(&RemoveTracksRequest::single("4uLU6hMCjMI75M1A2tKUQC"))
            .unwrap();
        assert_eq!(
            body,
            r#"{"tracks":[{"uri":"spotify:track:4uLU6hMCjMI75M1A2tKUQC"}]}"#
        );
    }
}

use std::{net::SocketAddr, str::FromStr};

use axum::{
    Extension, Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{Res, api, api::AppState, config::Settings, info, warning};

/// Assembles every route. Paths no route matches are served from the
/// configured `public/` directory.
pub fn router(state: AppState) -> Router {
    let public = ServeDir::new(&state.settings.public_dir);

    Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health))
        .route("/authorize", get(api::authorize))
        .route("/callback", get(api::callback))
        .route("/dashboard", get(api::dashboard))
        .route("/recommendations", get(api::recommendations))
        .route("/playlists", get(api::playlists))
        .route("/playlist/{playlist_id}", get(api::playlist))
        .route(
            "/playlist/{playlist_id}/remove-track/{track_id}",
            post(api::remove_track),
        )
        .fallback_service(public)
        .layer(Extension(state))
}

/// Binds `settings.server_addr` and serves until the process is stopped.
///
/// With `open_browser` set, the landing page is opened in the default browser
/// once the listener is up.
pub async fn start_server(settings: Settings, open_browser: bool) -> Res<()> {
    let addr = SocketAddr::from_str(&settings.server_addr)
        .map_err(|e| format!("Failed to parse server address {}: {}", settings.server_addr, e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let url = format!("http://{}/", listener.local_addr()?);
    info!("Listening on {}", url);
    info!("Spotify redirect URI is {}", settings.redirect_uri);

    if open_browser && webbrowser::open(&url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        )
    }

    let app = router(AppState::new(settings));
    axum::serve(listener, app).await?;
    Ok(())
}

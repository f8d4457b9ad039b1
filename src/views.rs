//! Server-side HTML views.
//!
//! Each public function renders one page: `index`, `dashboard`,
//! `recommendation`, `playlists`, `tracks` and `error`. Everything that comes
//! from Spotify or from the request is escaped with [`escape_html`].

use chrono::{DateTime, Utc};

use crate::{
    error::AppError,
    types::{PlaylistDetails, PlaylistSummary, SavedTrack, Track, User},
    utils::{escape_html, format_added_at, format_duration},
};

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · spotrelay</title>
<link rel="stylesheet" href="/style.css">
</head>
<body>
<nav><a href="/">Home</a> <a href="/dashboard">Dashboard</a> <a href="/playlists">Playlists</a></nav>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape_html(title),
        body = body
    )
}

fn track_line(track: &Track) -> String {
    format!(
        r#"<span class="track-name">{name}</span> <span class="track-artists">{artists}</span> <span class="track-duration">{duration}</span>"#,
        name = escape_html(&track.name),
        artists = escape_html(&track.artist_names()),
        duration = format_duration(track.duration_ms),
    )
}

fn recommendation_link(track: &Track) -> String {
    let artist_id = track.artists.first().and_then(|a| a.id.as_deref());
    match (artist_id, track.id.as_deref()) {
        (Some(artist), Some(id)) => format!(
            r#" <a class="recommend" href="/recommendations?artist={}&amp;track={}">More like this</a>"#,
            escape_html(artist),
            escape_html(id)
        ),
        _ => String::new(),
    }
}

pub fn index() -> String {
    layout(
        "Welcome",
        r#"<h1>spotrelay</h1>
<p>Browse your saved tracks and playlists, and find something new.</p>
<p><a class="button" href="/authorize">Sign in with Spotify</a></p>"#,
    )
}

/// Profile header plus the list of saved tracks (`tracks.items` of `/me/tracks`).
pub fn dashboard(user: &User, tracks: &[SavedTrack], signed_in_at: Option<DateTime<Utc>>) -> String {
    let avatar = user
        .images
        .first()
        .map(|img| format!(r#"<img class="avatar" src="{}" alt="">"#, escape_html(&img.url)))
        .unwrap_or_default();

    let since = signed_in_at
        .map(|at| format!("<p class=\"muted\">Signed in at {}</p>", at.format("%H:%M UTC")))
        .unwrap_or_default();

    let items: String = tracks
        .iter()
        .map(|saved| {
            let added = saved
                .added_at
                .as_deref()
                .map(|at| format!(r#" <span class="muted">{}</span>"#, escape_html(&format_added_at(at))))
                .unwrap_or_default();
            format!(
                "<li>{}{}{}</li>\n",
                track_line(&saved.track),
                added,
                recommendation_link(&saved.track)
            )
        })
        .collect();

    let body = format!(
        r#"<header class="profile">{avatar}<h1>{name}</h1><p>{followers} followers</p>{since}</header>
<h2>Recently saved</h2>
<ol class="tracks">
{items}</ol>"#,
        avatar = avatar,
        name = escape_html(user.name()),
        followers = user.followers.total,
        since = since,
        items = items,
    );
    layout("Dashboard", &body)
}

pub fn recommendation(tracks: &[Track]) -> String {
    let items: String = tracks
        .iter()
        .map(|track| format!("<li>{}</li>\n", track_line(track)))
        .collect();

    let body = if tracks.is_empty() {
        "<h1>Recommendations</h1>\n<p>No recommendations for these seeds.</p>".to_string()
    } else {
        format!("<h1>Recommendations</h1>\n<ol class=\"tracks\">\n{}</ol>", items)
    };
    layout("Recommendations", &body)
}

pub fn playlists(user: &User, playlists: &[PlaylistSummary]) -> String {
    let items: String = playlists
        .iter()
        .map(|p| {
            format!(
                r#"<li><a href="/playlist/{id}">{name}</a> <span class="muted">{count} tracks</span></li>
"#,
                id = escape_html(&p.id),
                name = escape_html(&p.name),
                count = p.tracks.total,
            )
        })
        .collect();

    let body = format!(
        "<h1>{}'s playlists</h1>\n<ul class=\"playlists\">\n{}</ul>",
        escape_html(user.name()),
        items
    );
    layout("Playlists", &body)
}

/// Playlist detail page; every track with an id gets a remove button.
pub fn tracks(playlist: &PlaylistDetails) -> String {
    let items: String = playlist
        .tracks
        .items
        .iter()
        .filter_map(|item| item.track.as_ref())
        .map(|track| {
            let remove = track
                .id
                .as_deref()
                .map(|track_id| {
                    format!(
                        r#"<form method="post" action="/playlist/{pid}/remove-track/{tid}"><button type="submit">Remove</button></form>"#,
                        pid = escape_html(&playlist.id),
                        tid = escape_html(track_id),
                    )
                })
                .unwrap_or_default();
            format!("<li>{}{}</li>\n", track_line(track), remove)
        })
        .collect();

    let description = playlist
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| format!("<p>{}</p>\n", escape_html(d)))
        .unwrap_or_default();

    let body = format!(
        "<h1>{}</h1>\n{}<ol class=\"tracks\">\n{}</ol>\n<p><a href=\"/playlists\">Back to playlists</a></p>",
        escape_html(&playlist.name),
        description,
        items
    );
    layout(&playlist.name, &body)
}

pub fn error(err: &AppError) -> String {
    let hint = if err.needs_login() {
        r#"<p><a class="button" href="/authorize">Sign in again</a></p>"#
    } else {
        r#"<p><a href="/">Back to start</a></p>"#
    };

    let body = format!(
        "<h1>Something went wrong</h1>\n<p class=\"error\">{}</p>\n{}",
        escape_html(&err.to_string()),
        hint
    );
    layout("Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Artist, Followers};

    fn track(id: &str, name: &str) -> Track {
        Track {
            id: Some(id.to_string()),
            name: name.to_string(),
            uri: format!("spotify:track:{}", id),
            artists: vec![Artist {
                id: Some("artist1".to_string()),
                name: "Band & Co".to_string(),
            }],
            album: None,
            duration_ms: 185_000,
        }
    }

    #[test]
    fn test_dashboard_escapes_and_links() {
        let user = User {
            id: "u1".to_string(),
            display_name: Some("<script>".to_string()),
            email: None,
            country: None,
            followers: Followers { total: 7 },
            images: Vec::new(),
        };
        let saved = vec![SavedTrack {
            added_at: Some("2024-03-01T10:00:00Z".to_string()),
            track: track("t1", "Song"),
        }];

        let html = dashboard(&user, &saved, None);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("Band &amp; Co"));
        assert!(html.contains("3:05"));
        assert!(html.contains("2024-03-01"));
        assert!(html.contains("/recommendations?artist=artist1&amp;track=t1"));
    }

    #[test]
    fn test_error_page_offers_login_for_auth_errors() {
        let html = error(&AppError::NotAuthenticated);
        assert!(html.contains("href=\"/authorize\""));

        let html = error(&AppError::MissingCode);
        assert!(!html.contains("href=\"/authorize\""));
    }

    #[test]
    fn test_empty_recommendations() {
        assert!(recommendation(&[]).contains("No recommendations"));
    }
}

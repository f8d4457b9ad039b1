// Shared helpers for driving the router against a mocked Spotify.

#![allow(dead_code)]

use std::path::PathBuf;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use spotrelay::{
    api::AppState, config::Settings, management::SessionId, server, types::AccessToken, utils,
};
use tower::ServiceExt;
use wiremock::MockServer;

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";
pub const REDIRECT_URI: &str = "http://localhost:3000/callback";
pub const AUTH_URL: &str = "https://accounts.spotify.com/authorize";

pub fn settings_for(mock_uri: &str) -> Settings {
    Settings {
        server_addr: "127.0.0.1:0".to_string(),
        client_id: CLIENT_ID.to_string(),
        client_secret: CLIENT_SECRET.to_string(),
        redirect_uri: REDIRECT_URI.to_string(),
        auth_url: AUTH_URL.to_string(),
        token_url: format!("{}/api/token", mock_uri),
        api_url: format!("{}/v1", mock_uri),
        public_dir: PathBuf::from("public"),
    }
}

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
}

impl TestApp {
    pub fn new(settings: Settings) -> Self {
        let state = AppState::new(settings);
        let router = server::router(state.clone());
        Self { state, router }
    }

    pub fn with_mock(mock: &MockServer) -> Self {
        Self::new(settings_for(&mock.uri()))
    }

    /// Stores `token` in a new session and returns the matching `Cookie` value.
    pub async fn sign_in(&self, token: &str) -> String {
        let id = self.state.sessions.create(AccessToken::new(token)).await;
        format!("{}={}", utils::SESSION_COOKIE, id.as_str())
    }

    pub async fn token_for(&self, cookie_value: &str) -> Option<AccessToken> {
        self.state.sessions.get(&SessionId::from(cookie_value)).await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = builder.body(Body::empty()).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, cookie).await
    }

    pub async fn post(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(Method::POST, uri, cookie).await
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn location(&self) -> Option<&str> {
        self.header(header::LOCATION)
    }

    /// Value of the session cookie set by this response, if any.
    pub fn session_cookie(&self) -> Option<String> {
        let set_cookie = self.header(header::SET_COOKIE)?;
        let pair = set_cookie.split(';').next()?;
        let (name, value) = pair.split_once('=')?;
        (name == utils::SESSION_COOKIE).then(|| value.to_string())
    }
}

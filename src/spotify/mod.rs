//! # Spotify Integration Module
//!
//! Everything that talks to Spotify lives here:
//!
//! - [`auth`] - Building the consent-screen URL and exchanging the returned
//!   authorization code for an access token (client-secret flow, Basic auth).
//! - [`library`] - The signed-in user's profile, saved tracks and
//!   recommendations.
//! - [`playlist`] - Listing playlists, reading one playlist and removing a
//!   track from it.
//!
//! All resource calls go through [`SpotifyClient`], which prefixes the
//! configured API base URL, attaches `Authorization: Bearer <token>` and turns
//! non-2xx answers into [`AppError::Upstream`]. There is no retry, backoff or
//! token refresh; a failed call surfaces as an error page.
//!
//! ```text
//! Route handlers (crate::api)
//!          ↓
//! library / playlist helpers
//!          ↓
//! SpotifyClient (bearer auth, status check, JSON decode)
//!          ↓
//! Spotify Web API
//! ```

pub mod auth;
pub mod library;
pub mod playlist;

use reqwest::{Client, Response};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{error::AppError, types::AccessToken};

/// Authorized fetcher for the Spotify Web API.
///
/// Cloning is cheap; the inner `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
}

impl SpotifyClient {
    pub fn new(http: Client, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
        }
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_url, endpoint)
    }

    /// GETs `endpoint` (relative to the API base) and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// - [`AppError::Http`] on network failure
    /// - [`AppError::Upstream`] if Spotify answers with a non-2xx status
    /// - [`AppError::Decode`] if the body is not the expected shape
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(self.url(endpoint))
            .bearer_auth(token.as_str())
            .query(query)
            .send()
            .await?;

        decode_json(check_status(response).await?).await
    }

    /// DELETEs `endpoint` with a JSON body and returns the decoded answer.
    pub async fn delete_json<B: Serialize + ?Sized>(
        &self,
        token: &AccessToken,
        endpoint: &str,
        body: &B,
    ) -> Result<Value, AppError> {
        let response = self
            .http
            .delete(self.url(endpoint))
            .bearer_auth(token.as_str())
            .json(body)
            .send()
            .await?;

        decode_json(check_status(response).await?).await
    }
}

/// Passes 2xx responses through and converts anything else into
/// [`AppError::Upstream`], keeping Spotify's error message when it sent one.
pub(crate) async fn check_status(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AppError::Upstream {
        status,
        message: upstream_message(&body),
    })
}

pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let bytes = response.bytes().await?;
    // DELETE may answer 200 with an empty body
    if bytes.is_empty() {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

/// Extracts a readable message from a Spotify error body.
///
/// The Web API sends `{"error": {"status": 404, "message": "..."}}`, the
/// accounts service sends `{"error": "invalid_grant", "error_description": "..."}`.
pub fn upstream_message(body: &str) -> String {
    let json: Value = match serde_json::from_str(body) {
        Ok(json) => json,
        Err(_) if body.trim().is_empty() => return "no details".to_string(),
        Err(_) => return body.chars().take(200).collect(),
    };

    let error = &json["error"];
    if let Some(message) = error["message"].as_str() {
        return message.to_string();
    }
    if let Some(description) = json["error_description"].as_str() {
        return description.to_string();
    }
    if let Some(code) = error.as_str() {
        return code.to_string();
    }
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_web_api_shape() {
        let body = r#"{"error":{"status":401,"message":"The access token expired"}}"#;
        assert_eq!(upstream_message(body), "The access token expired");
    }

    #[test]
    fn test_upstream_message_accounts_shape() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid authorization code"}"#;
        assert_eq!(upstream_message(body), "Invalid authorization code");

        let body = r#"{"error":"invalid_client"}"#;
        assert_eq!(upstream_message(body), "invalid_client");
    }

    #[test]
    fn test_upstream_message_non_json() {
        assert_eq!(upstream_message(""), "no details");
        assert_eq!(upstream_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_url_joins_base_and_endpoint() {
        let client = SpotifyClient::new(Client::new(), "https://api.spotify.com/v1");
        assert_eq!(
            client.url("/me/tracks"),
            "https://api.spotify.com/v1/me/tracks"
        );
    }
}

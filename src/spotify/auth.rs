use reqwest::{Client, Url, header::AUTHORIZATION};

use crate::{
    config::{ConfigError, ENV_AUTH_URL, SPOTIFY_SCOPE, Settings},
    error::AppError,
    spotify::{check_status, decode_json},
    types::{AccessToken, TokenResponse},
    utils,
};

/// Builds the consent-screen URL for the authorization-code flow.
///
/// The query carries exactly `response_type=code`, the client id, the fixed
/// scope and the configured redirect URI. No `state` parameter is sent; the
/// session binding happens when the callback sets its cookie.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidUrl`] if the configured authorize URL does not
/// parse.
///
/// # Example
///
/// ```
/// let url = authorize_url(&settings)?;
/// // https://accounts.spotify.com/authorize?response_type=code&client_id=...
/// ```
pub fn authorize_url(settings: &Settings) -> Result<Url, ConfigError> {
    Url::parse_with_params(
        &settings.auth_url,
        &[
            ("response_type", "code"),
            ("client_id", settings.client_id.as_str()),
            ("scope", SPOTIFY_SCOPE),
            ("redirect_uri", settings.redirect_uri.as_str()),
        ],
    )
    .map_err(|e| ConfigError::InvalidUrl {
        key: ENV_AUTH_URL,
        reason: e.to_string(),
    })
}

/// Exchanges an authorization code for an access token.
///
/// Sends a form-encoded POST to the token endpoint with `code`,
/// `redirect_uri` and `grant_type=authorization_code`, authenticated with
/// `Authorization: Basic base64(client_id:client_secret)`.
///
/// # Errors
///
/// - [`AppError::Http`] if the token endpoint is unreachable
/// - [`AppError::Upstream`] if it rejects the code (`invalid_grant` etc.)
/// - [`AppError::Decode`] if the answer carries no `access_token`
pub async fn exchange_code(
    http: &Client,
    settings: &Settings,
    code: &str,
) -> Result<TokenResponse, AppError> {
    let res = http
        .post(&settings.token_url)
        .header(
            AUTHORIZATION,
            utils::basic_auth_header(&settings.client_id, &settings.client_secret),
        )
        .form(&[
            ("code", code),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await?;

    decode_json(check_status(res).await?).await
}

impl From<TokenResponse> for AccessToken {
    fn from(value: TokenResponse) -> Self {
        AccessToken::new(value.access_token)
    }
}

use axum::http::{HeaderMap, HeaderValue, header};
use spotrelay::utils::*;

fn cookie_headers(values: &[&str]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for value in values {
        headers.append(header::COOKIE, HeaderValue::from_str(value).unwrap());
    }
    headers
}

#[test]
fn test_generate_session_id() {
    let id = generate_session_id();

    // Should be exactly 32 characters
    assert_eq!(id.len(), 32);

    // Should contain only alphanumeric characters
    assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated ids should be different
    assert_ne!(id, generate_session_id());
}

#[test]
fn test_basic_auth_header() {
    assert_eq!(
        basic_auth_header("client-id", "client-secret"),
        "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ="
    );

    // Standard alphabet with padding, not the URL-safe one
    assert_eq!(basic_auth_header("a", "b?>"), "Basic YTpiPz4=");
}

#[test]
fn test_session_cookie_attributes() {
    let cookie = session_cookie("abc123");

    assert!(cookie.starts_with("spotrelay_session=abc123;"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("SameSite=Lax"));
}

#[test]
fn test_get_cookie_value() {
    let headers = cookie_headers(&["theme=dark; spotrelay_session=xyz; lang=en"]);
    assert_eq!(
        get_cookie_value(&headers, SESSION_COOKIE),
        Some("xyz".to_string())
    );
    assert_eq!(get_cookie_value(&headers, "missing"), None);

    // Cookie split across several headers
    let headers = cookie_headers(&["theme=dark", "spotrelay_session=second"]);
    assert_eq!(
        get_cookie_value(&headers, SESSION_COOKIE),
        Some("second".to_string())
    );

    // Empty value counts as absent
    let headers = cookie_headers(&["spotrelay_session="]);
    assert_eq!(get_cookie_value(&headers, SESSION_COOKIE), None);

    // Prefix of another cookie name does not match
    let headers = cookie_headers(&["spotrelay_session_old=nope"]);
    assert_eq!(get_cookie_value(&headers, SESSION_COOKIE), None);
}

#[test]
fn test_escape_html() {
    assert_eq!(
        escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
        "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
    );
    assert_eq!(escape_html("plain"), "plain");
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(0), "0:00");
    assert_eq!(format_duration(59_999), "0:59");
    assert_eq!(format_duration(215_000), "3:35");
    assert_eq!(format_duration(3_600_000), "60:00");
}

#[test]
fn test_format_added_at() {
    assert_eq!(format_added_at("2023-10-17T08:15:00Z"), "2023-10-17");

    // Unparsable input is passed through
    assert_eq!(format_added_at("yesterday"), "yesterday");
}

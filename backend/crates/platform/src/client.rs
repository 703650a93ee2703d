//! Client Request Metadata
//!
//! Extraction of client IP and User-Agent from request headers, used to
//! annotate session records for logging and display.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

/// Extract the client IP, honoring X-Forwarded-For
///
/// The first entry of `X-Forwarded-For` is the originating client when the
/// service sits behind a reverse proxy; otherwise fall back to the peer
/// address of the TCP connection.
pub fn extract_client_ip(headers: &HeaderMap, peer_ip: Option<IpAddr>) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|first| first.trim().parse().ok())
        .or(peer_ip)
}

/// Extract the User-Agent header, if present
pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_forwarded_for_takes_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );

        let peer = Some("127.0.0.1".parse().unwrap());
        assert_eq!(
            extract_client_ip(&headers, peer),
            Some("203.0.113.7".parse().unwrap())
        );
    }

    #[test]
    fn test_falls_back_to_peer_ip() {
        let headers = HeaderMap::new();
        let peer: Option<IpAddr> = Some("192.0.2.4".parse().unwrap());
        assert_eq!(extract_client_ip(&headers, peer), peer);
    }

    #[test]
    fn test_garbage_forwarded_for_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("not-an-ip"));

        let peer: Option<IpAddr> = Some("192.0.2.4".parse().unwrap());
        assert_eq!(extract_client_ip(&headers, peer), peer);
    }

    #[test]
    fn test_user_agent() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_user_agent(&headers), None);

        headers.insert(header::USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));
        assert_eq!(extract_user_agent(&headers), Some("Mozilla/5.0".to_string()));
    }
}

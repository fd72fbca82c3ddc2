//! Custom Axum extractors for request metadata.
//!
//! - [`ClientIp`]: best-effort client address from proxy headers
//! - [`UserAgent`]: the `User-Agent` header, if any
//!
//! Both are infallible; handlers that record session metadata (login, for
//! example) take them as plain parameters.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use std::net::{IpAddr, Ipv4Addr};

/// Client IP address.
///
/// Resolution order:
///
/// 1. First address in `X-Forwarded-For`
/// 2. `X-Real-IP`
/// 3. Loopback fallback
#[derive(Debug, Clone, Copy)]
pub struct ClientIp(pub IpAddr);

#[async_trait]
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(client_ip_from_headers(&parts.headers)))
    }
}

fn client_ip_from_headers(headers: &HeaderMap) -> IpAddr {
    if let Some(forwarded) = headers.get("X-Forwarded-For").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            if let Ok(ip) = first.trim().parse::<IpAddr>() {
                return ip;
            }
        }
    }

    if let Some(real) = headers.get("X-Real-IP").and_then(|v| v.to_str().ok()) {
        if let Ok(ip) = real.parse::<IpAddr>() {
            return ip;
        }
    }

    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

/// The `User-Agent` header, or "Unknown" when absent.
#[derive(Debug, Clone)]
pub struct UserAgent(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for UserAgent
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = parts
            .headers
            .get("User-Agent")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("Unknown")
            .to_string();

        Ok(Self(user_agent))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use axum::http::{header, Request};

    #[tokio::test]
    async fn client_ip_prefers_forwarded_for() {
        let req = Request::builder()
            .header("X-Forwarded-For", "203.0.113.9, 198.51.100.2")
            .header("X-Real-IP", "198.51.100.7")
            .body(())
            .expect("valid request");

        let (mut parts, ()) = req.into_parts();
        let ip = ClientIp::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ip.0.to_string(), "203.0.113.9");
    }

    #[tokio::test]
    async fn client_ip_falls_back_to_real_ip() {
        let req = Request::builder()
            .header("X-Real-IP", "198.51.100.7")
            .body(())
            .expect("valid request");

        let (mut parts, ()) = req.into_parts();
        let ip = ClientIp::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ip.0.to_string(), "198.51.100.7");
    }

    #[tokio::test]
    async fn client_ip_defaults_to_loopback() {
        let req = Request::builder().body(()).expect("valid request");

        let (mut parts, ()) = req.into_parts();
        let ip = ClientIp::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ip.0, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[tokio::test]
    async fn user_agent_from_header() {
        let req = Request::builder()
            .header(header::USER_AGENT, "Mozilla/5.0 (Test)")
            .body(())
            .expect("valid request");

        let (mut parts, ()) = req.into_parts();
        let ua = UserAgent::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ua.0, "Mozilla/5.0 (Test)");
    }

    #[tokio::test]
    async fn user_agent_defaults_to_unknown() {
        let req = Request::builder().body(()).expect("valid request");

        let (mut parts, ()) = req.into_parts();
        let ua = UserAgent::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ua.0, "Unknown");
    }
}

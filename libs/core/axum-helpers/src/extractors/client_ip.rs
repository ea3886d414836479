use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::request::Parts,
};
use std::{convert::Infallible, net::SocketAddr};

/// Best-effort address of the caller.
///
/// Looks at `X-Forwarded-For` (first hop), then `X-Real-IP`, then the socket
/// peer when the app was served with `into_make_service_with_connect_info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        if let Some(first) = header("x-forwarded-for").and_then(|v| v.split(',').next()) {
            return Ok(ClientIp(first.trim().to_string()));
        }

        if let Some(real) = header("x-real-ip") {
            return Ok(ClientIp(real.to_string()));
        }

        let ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        Ok(ClientIp(ip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> String {
        let (mut parts, _) = request.into_parts();
        ClientIp::from_request_parts(&mut parts, &()).await.unwrap().0
    }

    #[tokio::test]
    async fn test_forwarded_for_takes_first_hop() {
        let request = Request::builder()
            .header("x-forwarded-for", "10.0.0.1, 192.168.0.1")
            .header("x-real-ip", "172.16.0.1")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await, "10.0.0.1");
    }

    #[tokio::test]
    async fn test_real_ip_fallback() {
        let request = Request::builder().header("x-real-ip", "172.16.0.1").body(()).unwrap();
        assert_eq!(extract(request).await, "172.16.0.1");
    }

    #[tokio::test]
    async fn test_connect_info_fallback() {
        let mut request = Request::builder().body(()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 5555))));
        assert_eq!(extract(request).await, "127.0.0.1");
    }

    #[tokio::test]
    async fn test_unknown_without_any_source() {
        let request = Request::builder().body(()).unwrap();
        assert_eq!(extract(request).await, "unknown");
    }
}

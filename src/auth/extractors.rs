use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    Form, Json,
    extract::{ConnectInfo, FromRequest, FromRequestParts, Request},
    http::{header, request::Parts},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Where a request came from, for log lines only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub address: String,
    pub user_agent: Option<String>,
}

impl ClientInfo {
    #[cfg(test)]
    pub fn unknown() -> Self {
        Self {
            address: "unknown".to_string(),
            user_agent: None,
        }
    }
}

impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // First hop of X-Forwarded-For is the originating client, else the peer
        let address = header_value(parts, "x-forwarded-for")
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip().to_string())
            })
            .unwrap_or_else(|| "unknown".to_string());
        let user_agent = header_value(parts, "user-agent").map(ToString::to_string);

        Ok(Self {
            address,
            user_agent,
        })
    }
}

/// Request body read as JSON, or as `application/x-www-form-urlencoded`
/// when the request says so.
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(value) = Form::<T>::from_request(req, state).await?;
            Ok(Self(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state).await?;
            Ok(Self(value))
        }
    }
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use signup_audit_api::{LoginRequest, SignupRequest};

    async fn extract(request: Request<()>) -> ClientInfo {
        let (mut parts, ()) = request.into_parts();
        ClientInfo::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn uses_first_forwarded_address_and_user_agent() {
        let request = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .header("user-agent", "curl/8.0")
            .body(())
            .unwrap();

        let client = extract(request).await;
        assert_eq!(client.address, "203.0.113.7");
        assert_eq!(client.user_agent.as_deref(), Some("curl/8.0"));
    }

    #[tokio::test]
    async fn falls_back_to_unknown() {
        let client = extract(Request::builder().body(()).unwrap()).await;
        assert_eq!(client, ClientInfo::unknown());
    }

    #[tokio::test]
    async fn falls_back_to_peer_address() {
        let peer: SocketAddr = "198.51.100.4:51234".parse().unwrap();
        let request = Request::builder()
            .extension(ConnectInfo(peer))
            .body(())
            .unwrap();

        let client = extract(request).await;
        assert_eq!(client.address, "198.51.100.4");
    }

    #[tokio::test]
    async fn forwarded_header_wins_over_peer_address() {
        let peer: SocketAddr = "198.51.100.4:51234".parse().unwrap();
        let request = Request::builder()
            .header("x-forwarded-for", "203.0.113.7")
            .extension(ConnectInfo(peer))
            .body(())
            .unwrap();

        assert_eq!(extract(request).await.address, "203.0.113.7");
    }

    async fn read_body<T: DeserializeOwned>(
        content_type: &str,
        body: &'static str,
    ) -> Result<T, AppError> {
        let request = Request::builder()
            .method("POST")
            .header("content-type", content_type)
            .body(Body::from(body))
            .unwrap();
        JsonOrForm::<T>::from_request(request, &())
            .await
            .map(|JsonOrForm(value)| value)
    }

    #[tokio::test]
    async fn reads_urlencoded_bodies() {
        let login: LoginRequest = read_body(
            "application/x-www-form-urlencoded",
            "identifier=ada%40example.com&password=secret1",
        )
        .await
        .unwrap();
        assert_eq!(login.identifier.as_deref(), Some("ada@example.com"));
        assert_eq!(login.password.as_deref(), Some("secret1"));

        let signup: SignupRequest = read_body(
            "application/x-www-form-urlencoded",
            "email=a%40b.co&fullName=Ada+Lovelace",
        )
        .await
        .unwrap();
        assert_eq!(signup.full_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(signup.username, None);
    }

    #[tokio::test]
    async fn reads_json_bodies() {
        let login: LoginRequest =
            read_body("application/json", r#"{"identifier":"ada","password":"x"}"#)
                .await
                .unwrap();
        assert_eq!(login.identifier.as_deref(), Some("ada"));
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let err = read_body::<LoginRequest>("application/json", "{oops")
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().starts_with("Invalid JSON"));
    }
}

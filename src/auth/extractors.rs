use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use super::{claims::Claims, jwt::JwtKeys};
use crate::error::ApiError;

/// The authenticated caller, as vouched for by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl From<Claims> for Identity {
    fn from(c: Claims) -> Self {
        Self {
            id: c.sub,
            email: c.email.filter(|e| !e.is_empty()),
            name: c
                .user_metadata
                .and_then(|m| m.full_name)
                .filter(|n| !n.is_empty()),
        }
    }
}

/// Reads the bearer token out of the request headers and returns the
/// identity it carries, or `None` when absent or not valid.
pub fn identity_from_headers(keys: &JwtKeys, headers: &HeaderMap) -> Option<Identity> {
    let auth = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?;

    let (scheme, token) = auth.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    match keys.verify(token.trim()) {
        Ok(claims) => Some(claims.into()),
        Err(e) => {
            warn!(error = %e, "invalid or expired token");
            None
        }
    }
}

/// Extractor for handlers that require a caller identity.
pub struct AuthUser(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        identity_from_headers(&keys, &parts.headers)
            .map(AuthUser)
            .ok_or_else(|| ApiError::Unauthorized("Unauthorized".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use axum::http::HeaderValue;
    use time::Duration;

    fn keys() -> JwtKeys {
        JwtKeys::from(&JwtConfig {
            secret: "test-secret".into(),
            issuer: None,
            audience: None,
        })
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn missing_header_yields_none() {
        assert_eq!(identity_from_headers(&keys(), &HeaderMap::new()), None);
    }

    #[test]
    fn valid_bearer_yields_identity() {
        let who = Identity {
            id: Uuid::new_v4(),
            email: Some("a@b.c".into()),
            name: None,
        };
        let token = keys().sign(&who, Duration::minutes(5)).unwrap();
        let got = identity_from_headers(&keys(), &headers_with(&format!("bearer {token}")));
        assert_eq!(got, Some(who));
    }

    fn provider_token(secret: &str, payload: serde_json::Value) -> String {
        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &payload,
            &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn in_ten_minutes() -> i64 {
        (time::OffsetDateTime::now_utc() + Duration::minutes(10)).unix_timestamp()
    }

    #[test]
    fn token_with_audience_list_yields_identity() {
        let id = Uuid::new_v4();
        let token = provider_token(
            "test-secret",
            serde_json::json!({
                "sub": id,
                "exp": in_ten_minutes(),
                "aud": ["authenticated", "bookclub"],
                "email": "ada@club.test",
                "user_metadata": { "full_name": "Ada" }
            }),
        );
        let header = headers_with(&format!("Bearer {token}"));

        let got = identity_from_headers(&keys(), &header).unwrap();
        assert_eq!(got.id, id);
        assert_eq!(got.name.as_deref(), Some("Ada"));

        let scoped = JwtKeys::from(&JwtConfig {
            secret: "test-secret".into(),
            issuer: None,
            audience: Some("bookclub".into()),
        });
        assert_eq!(identity_from_headers(&scoped, &header).map(|i| i.id), Some(id));
    }

    #[test]
    fn token_with_null_user_metadata_yields_identity() {
        let id = Uuid::new_v4();
        let token = provider_token(
            "test-secret",
            serde_json::json!({
                "sub": id,
                "exp": in_ten_minutes(),
                "email": "bo@club.test",
                "user_metadata": null
            }),
        );
        let got = identity_from_headers(&keys(), &headers_with(&format!("Bearer {token}")));
        assert_eq!(
            got,
            Some(Identity {
                id,
                email: Some("bo@club.test".into()),
                name: None,
            })
        );
    }

    #[test]
    fn other_scheme_yields_none() {
        assert_eq!(identity_from_headers(&keys(), &headers_with("Basic abc")), None);
    }

    #[test]
    fn garbage_token_yields_none() {
        assert_eq!(
            identity_from_headers(&keys(), &headers_with("Bearer not.a.jwt")),
            None
        );
    }
}

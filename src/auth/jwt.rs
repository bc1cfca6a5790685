use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use super::claims::{Audience, Claims, UserMetadata};
use super::extractors::Identity;
use crate::{config::JwtConfig, state::AppState};

/// Verification keys for identity-provider tokens.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl From<&JwtConfig> for JwtKeys {
    fn from(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
        }
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        JwtKeys::from(&state.config.jwt)
    }
}

impl JwtKeys {
    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        match &self.audience {
            Some(aud) => validation.set_audience(std::slice::from_ref(aud)),
            None => validation.validate_aud = false,
        }
        if let Some(iss) = &self.issuer {
            validation.set_issuer(std::slice::from_ref(iss));
        }
        validation
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation())?;
        debug!(user_id = %data.claims.sub, "jwt verified");
        Ok(data.claims)
    }

    /// Issues a token the way the identity provider would. Used by local
    /// tooling and tests; production tokens come from the provider.
    pub fn sign(&self, identity: &Identity, ttl: TimeDuration) -> anyhow::Result<String> {
        let exp = OffsetDateTime::now_utc() + ttl;
        let claims = Claims {
            sub: identity.id,
            exp: exp.unix_timestamp().max(0) as usize,
            email: identity.email.clone(),
            user_metadata: Some(UserMetadata {
                full_name: identity.name.clone(),
            }),
            iss: self.issuer.clone(),
            aud: self.audience.clone().map(Audience::One),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        debug!(user_id = %identity.id, "jwt signed");
        Ok(token)
    }
}

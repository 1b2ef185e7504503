//! HMAC-signed bearer tokens (JWS compact, HS256).
//!
//! The signing key is required at construction; there is no ambient or
//! default key. The clock is injected so tests can shift token lifetimes
//! deterministically; expiry and not-before are checked against it rather
//! than the library's built-in wall clock.

use chrono::Duration;
use droplet_core::{Clock, TokenAuthority, TokenError, TokenPrincipal};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::clock::SystemClock;

const TOKEN_TTL_HOURS: i64 = 560;
const ISSUER: &str = "droplet-api";
const SUBJECT: &str = "client";
const AUDIENCE: &str = "droplet";

#[derive(Debug, Error)]
#[error("jwt signing key must not be empty")]
pub struct SigningKeyError;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(rename = "userId")]
    user_id: String,
    username: String,
    iss: String,
    sub: String,
    aud: Vec<String>,
    exp: i64,
    nbf: i64,
    iat: i64,
    jti: String,
}

pub struct JwtTokenAuthority<C = SystemClock> {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    clock: C,
}

impl JwtTokenAuthority<SystemClock> {
    pub fn new(secret: &Secret<String>) -> Result<Self, SigningKeyError> {
        Self::with_clock(secret, SystemClock)
    }
}

impl<C: Clock> JwtTokenAuthority<C> {
    pub fn with_clock(secret: &Secret<String>, clock: C) -> Result<Self, SigningKeyError> {
        let bytes = secret.expose_secret().as_bytes();
        if bytes.is_empty() {
            return Err(SigningKeyError);
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            clock,
        })
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // Any HMAC-family algorithm is acceptable; everything else is not.
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        // Expiry and not-before are checked against the injected clock below.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation
    }
}

impl<C: Clock> TokenAuthority for JwtTokenAuthority<C> {
    fn mint(&self, user_id: Uuid, username: &str) -> Result<String, TokenError> {
        let now = self.clock.now();
        let claims = Claims {
            user_id: user_id.to_string(),
            username: username.to_string(),
            iss: ISSUER.to_string(),
            sub: SUBJECT.to_string(),
            aud: vec![AUDIENCE.to_string()],
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
            nbf: now.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Unexpected(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<TokenPrincipal, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &Self::validation())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "failed to parse jwt token");
                TokenError::Invalid
            })?;

        let now = self.clock.now().timestamp();
        if now >= claims.exp {
            tracing::debug!("token expired");
            return Err(TokenError::Invalid);
        }
        if now < claims.nbf {
            tracing::debug!("token not yet valid");
            return Err(TokenError::Invalid);
        }

        let user_id = Uuid::parse_str(&claims.user_id).map_err(|e| {
            tracing::debug!(error = %e, "token carries a malformed user id");
            TokenError::Invalid
        })?;

        Ok(TokenPrincipal {
            user_id,
            username: claims.username,
        })
    }
}

//! src/authentication/token.rs

use crate::store::CredentialRecord;
use anyhow::Context;
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use uuid::Uuid;

/// Claims signed into a session token.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionClaims {
    /// display name of the subject
    pub user: String,
    /// id of the credential record
    pub sub: Uuid,
    /// issued at, seconds since epoch
    pub iat: i64,
    /// expiration, seconds since epoch
    pub exp: i64,
}

impl SessionClaims {
    pub fn for_record(record: &CredentialRecord, lifetime: TimeDelta) -> anyhow::Result<Self> {
        let issued_at = Utc::now();
        let expires_at = issued_at
            .checked_add_signed(lifetime)
            .context("Session expiry is out of range.")?;
        Ok(Self {
            user: record.display_name.clone(),
            sub: record.id,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }
}

/// Signer turning session claims into an opaque bearer token.
pub trait TokenIssuer: Send + Sync {
    fn sign(&self, claims: &SessionClaims) -> anyhow::Result<String>;
}

/// HS256 JSON web tokens.
pub struct JwtIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtIssuer {
    pub fn new(signing_secret: &Secret<String>) -> Self {
        let secret = signing_secret.expose_secret().as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 5;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Check the signature and expiry of a token and return its claims.
    pub fn decode(&self, token: &str) -> anyhow::Result<SessionClaims> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .context("Could not decode session token.")
    }
}

impl TokenIssuer for JwtIssuer {
    fn sign(&self, claims: &SessionClaims) -> anyhow::Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .context("Could not encode session token.")
    }
}

//! src/authentication/password.rs

use crate::configuration::HashingSettings;
use crate::telemetry::spawn_blocking_with_tracing;
use anyhow::Context;
use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash,
    PasswordHasher as _, PasswordVerifier, Version,
};
use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::Rng;
use secrecy::{ExposeSecret, Secret};

/// One-way hashing primitive for passwords.
///
/// `verify` answers `Ok(false)` for a wrong password. Errors are reserved
/// for digests that can not be processed at all.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: Secret<String>) -> anyhow::Result<Secret<String>>;

    async fn verify(
        &self,
        digest: Secret<String>,
        password_candidate: Secret<String>,
    ) -> anyhow::Result<bool>;
}

/// Argon2id hasher producing salted digests in PHC string format.
#[derive(Clone, Debug)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    pub fn new(settings: &HashingSettings) -> anyhow::Result<Self> {
        let params = Params::new(
            settings.memory_kib,
            settings.iterations,
            settings.parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid argon2 parameters: {}", e))?;
        Ok(Self { params })
    }

    /// Digest of a random throwaway password, hashed with the configured
    /// cost parameters. Verifying against it costs as much as verifying
    /// against a stored digest.
    pub fn fallback_digest(&self) -> anyhow::Result<Secret<String>> {
        let throwaway: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        compute_password_hash(Secret::new(throwaway), self.params.clone())
    }
}

#[async_trait]
impl PasswordHasher for Argon2Hasher {
    #[tracing::instrument(name = "Compute password hash", skip_all)]
    async fn hash(&self, password: Secret<String>) -> anyhow::Result<Secret<String>> {
        let params = self.params.clone();
        spawn_blocking_with_tracing(move || compute_password_hash(password, params))
            .await
            .context("Failed to spawn computation of password hash.")?
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(
        &self,
        digest: Secret<String>,
        password_candidate: Secret<String>,
    ) -> anyhow::Result<bool> {
        spawn_blocking_with_tracing(move || verify_password_hash(digest, password_candidate))
            .await
            .context("Failed to spawn blocking task.")?
    }
}

fn compute_password_hash(password: Secret<String>, params: Params) -> anyhow::Result<Secret<String>> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let password_hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();
    Ok(Secret::new(password_hash))
}

fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Secret<String>,
) -> anyhow::Result<bool> {
    let expected_password_hash = PasswordHash::new(expected_password_hash.expose_secret())
        .map_err(|e| anyhow::anyhow!("Failed to parse hash in PHC string format: {}", e))?;
    // the cost parameters are read back from the PHC string
    match Argon2::default().verify_password(
        password_candidate.expose_secret().as_bytes(),
        &expected_password_hash,
    ) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow::anyhow!("Failed to verify password: {}", e)),
    }
}

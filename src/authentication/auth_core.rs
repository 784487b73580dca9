//! src/authentication/auth_core.rs

use crate::authentication::{PasswordHasher, SessionClaims, TokenIssuer};
use crate::error::error_chain_fmt;
use crate::store::{CredentialRecord, CredentialStore};
use chrono::TimeDelta;
use secrecy::Secret;
use std::sync::Arc;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(thiserror::Error)]
pub enum AuthError {
    #[error("No credential record matches the given email.")]
    NotFound,
    #[error("The password does not match the stored credential.")]
    InvalidCredential,
    #[error("The credential store did not confirm the update.")]
    WriteFailed,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// A freshly signed bearer token.
#[derive(Debug)]
pub struct Session {
    pub token: String,
}

#[derive(Debug)]
pub struct ResetConfirmation {
    pub message: String,
}

const RESET_CONFIRMATION: &str = "Your password has been reset.";

/// Orchestrates the credential store, the password hasher and the token
/// issuer. Holds no mutable state, every call runs to completion on its own.
pub struct AuthCore {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
    issuer: Arc<dyn TokenIssuer>,
    session_lifetime: TimeDelta,
    // verified against when the email is unknown, must share the cost
    // parameters of real digests
    fallback_digest: Secret<String>,
}

impl AuthCore {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        issuer: Arc<dyn TokenIssuer>,
        session_lifetime: TimeDelta,
        fallback_digest: Secret<String>,
    ) -> Self {
        Self {
            store,
            hasher,
            issuer,
            session_lifetime,
            fallback_digest,
        }
    }

    /// Check `password` against the record stored for `email`.
    #[tracing::instrument(
        name = "Authenticate credentials",
        skip(self, password),
        fields(record_id = tracing::field::Empty)
    )]
    pub async fn authenticate(
        &self,
        email: &str,
        password: Secret<String>,
    ) -> AuthResult<CredentialRecord> {
        let record = self.store.find_by_email(email).await?;
        let expected_password_hash = match &record {
            Some(record) => record.password_digest.clone(),
            None => self.fallback_digest.clone(),
        };
        let is_valid = self.hasher.verify(expected_password_hash, password).await?;
        // record is only Some, if the store knows the email
        let record = record.ok_or(AuthError::NotFound)?;
        if !is_valid {
            return Err(AuthError::InvalidCredential);
        }
        tracing::Span::current().record("record_id", tracing::field::display(&record.id));
        Ok(record)
    }

    /// Authenticate and sign a session token for the record.
    #[tracing::instrument(name = "Issue session", skip(self, password))]
    pub async fn issue_session(&self, email: &str, password: Secret<String>) -> AuthResult<Session> {
        let record = self.authenticate(email, password).await?;
        let claims = SessionClaims::for_record(&record, self.session_lifetime)?;
        let token = self.issuer.sign(&claims)?;
        Ok(Session { token })
    }

    /// Replace the stored digest for `email` with a digest of `new_password`.
    ///
    /// The write only goes through if the digest read beforehand is still
    /// in place; a concurrent reset in between yields `WriteFailed`.
    #[tracing::instrument(
        name = "Reset credential",
        skip(self, new_password),
        fields(record_id = tracing::field::Empty)
    )]
    pub async fn reset_credential(
        &self,
        email: &str,
        new_password: Secret<String>,
    ) -> AuthResult<ResetConfirmation> {
        let record = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AuthError::NotFound)?;
        tracing::Span::current().record("record_id", tracing::field::display(&record.id));
        let new_digest = self.hasher.hash(new_password).await?;
        match self
            .store
            .update_digest(record.id, &record.password_digest, new_digest)
            .await?
        {
            Some(_) => Ok(ResetConfirmation {
                message: RESET_CONFIRMATION.to_string(),
            }),
            None => Err(AuthError::WriteFailed),
        }
    }
}

//! src/store/mod.rs

mod memory;
mod postgres;

pub use memory::InMemoryCredentialStore;
pub use postgres::PgCredentialStore;

use async_trait::async_trait;
use secrecy::Secret;
use uuid::Uuid;

/// A persisted credential record, keyed by `id` and unique by `email`.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub id: Uuid,
    pub email: String,
    pub password_digest: Secret<String>,
    pub display_name: String,
}

impl CredentialRecord {
    /// Build a fresh record with a newly assigned id.
    pub fn new(email: String, display_name: String, password_digest: Secret<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_digest,
            display_name,
        }
    }
}

/// Keyed record store holding credential records.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<CredentialRecord>>;

    /// Overwrite the digest of record `id`, but only if it still holds
    /// `expected_digest`. Returns the updated record, or `None` if nothing
    /// was written.
    async fn update_digest(
        &self,
        id: Uuid,
        expected_digest: &Secret<String>,
        new_digest: Secret<String>,
    ) -> anyhow::Result<Option<CredentialRecord>>;
}

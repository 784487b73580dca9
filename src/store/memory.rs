//! src/store/memory.rs

use crate::store::{CredentialRecord, CredentialStore};
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Credential store kept in process memory.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    records: RwLock<HashMap<Uuid, CredentialRecord>>,
}

impl InMemoryCredentialStore {
    /// Add a record, refusing a second record for the same email.
    pub async fn insert(&self, record: CredentialRecord) -> anyhow::Result<()> {
        let mut records = self.records.write().await;
        if records.values().any(|r| r.email == record.email) {
            anyhow::bail!("A credential record for `{}` already exists.", record.email);
        }
        records.insert(record.id, record);
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Option<CredentialRecord> {
        self.records.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<CredentialRecord>> {
        let records = self.records.read().await;
        Ok(records.values().find(|r| r.email == email).cloned())
    }

    async fn update_digest(
        &self,
        id: Uuid,
        expected_digest: &Secret<String>,
        new_digest: Secret<String>,
    ) -> anyhow::Result<Option<CredentialRecord>> {
        let mut records = self.records.write().await;
        match records.get_mut(&id) {
            Some(record)
                if record.password_digest.expose_secret() == expected_digest.expose_secret() =>
            {
                record.password_digest = new_digest;
                Ok(Some(record.clone()))
            }
            _ => Ok(None),
        }
    }
}

//! src/store/postgres.rs

use crate::store::{CredentialRecord, CredentialStore};
use anyhow::Context;
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Credential store backed by the `credentials` table.
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn record_from_row(row: PgRow) -> anyhow::Result<CredentialRecord> {
    Ok(CredentialRecord {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        password_digest: Secret::new(row.try_get("password_digest")?),
        display_name: row.try_get("display_name")?,
    })
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    #[tracing::instrument(name = "Get stored credential record", skip(self))]
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<CredentialRecord>> {
        sqlx::query(
            r#"
            SELECT id, email, password_digest, display_name
            FROM credentials
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to perform a query to retrieve a stored credential record.")?
        .map(record_from_row)
        .transpose()
    }

    #[tracing::instrument(
        name = "Update stored password digest",
        skip(self, expected_digest, new_digest)
    )]
    async fn update_digest(
        &self,
        id: Uuid,
        expected_digest: &Secret<String>,
        new_digest: Secret<String>,
    ) -> anyhow::Result<Option<CredentialRecord>> {
        sqlx::query(
            r#"
            UPDATE credentials
            SET password_digest = $1
            WHERE id = $2 AND password_digest = $3
            RETURNING id, email, password_digest, display_name
            "#,
        )
        .bind(new_digest.expose_secret())
        .bind(id)
        .bind(expected_digest.expose_secret())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update the password digest in the database.")?
        .map(record_from_row)
        .transpose()
    }
}

impl PgCredentialStore {
    /// Insert a new credential record. Used to seed accounts, registration
    /// itself lives elsewhere.
    #[tracing::instrument(name = "Insert credential record", skip(self, record), fields(record_id = %record.id))]
    pub async fn insert(&self, record: &CredentialRecord) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO credentials (id, email, password_digest, display_name)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.id)
        .bind(&record.email)
        .bind(record.password_digest.expose_secret())
        .bind(&record.display_name)
        .execute(&self.pool)
        .await
        .context("Failed to insert a credential record.")?;
        Ok(())
    }
}

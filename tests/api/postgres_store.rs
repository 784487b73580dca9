//! tests/api/postgres_store.rs

use authcore::configuration::{get_configuration, DatabaseSettings};
use authcore::store::{CredentialRecord, CredentialStore, PgCredentialStore};
use claims::{assert_none, assert_some};
use secrecy::{ExposeSecret, Secret};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use uuid::Uuid;

async fn configure_database(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect_with(&config.without_db())
        .await
        .expect("Failed to connect to Postgres");

    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.database_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect_with(config.with_db())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database.");

    connection_pool
}

#[tokio::test]
#[ignore = "needs a running Postgres instance"]
async fn postgres_store_finds_and_conditionally_updates_records() {
    // Arrange
    let mut configuration = get_configuration().expect("Failed to read configuration.");
    // use different database for each test case
    configuration.database.database_name = Uuid::new_v4().to_string();
    let store = PgCredentialStore::new(configure_database(&configuration.database).await);
    let record = CredentialRecord::new(
        "a@x.com".to_string(),
        "Ursula".to_string(),
        Secret::new("old-digest".to_string()),
    );
    store.insert(&record).await.unwrap();

    // Act & Assert - lookup
    let found = assert_some!(store.find_by_email("a@x.com").await.unwrap());
    assert_eq!(found.id, record.id);
    assert_eq!(found.display_name, "Ursula");
    assert_none!(store.find_by_email("nobody@x.com").await.unwrap());

    // Act & Assert - stale digest writes nothing
    let stale = Secret::new("stale-digest".to_string());
    let outcome = store
        .update_digest(record.id, &stale, Secret::new("new-digest".to_string()))
        .await
        .unwrap();
    assert_none!(outcome);

    // Act & Assert - current digest is replaced
    let updated = store
        .update_digest(
            record.id,
            &record.password_digest,
            Secret::new("new-digest".to_string()),
        )
        .await
        .unwrap();
    let updated = assert_some!(updated);
    assert_eq!(updated.password_digest.expose_secret(), "new-digest");
}

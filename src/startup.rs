//! src/startup.rs

use crate::authentication::{Argon2Hasher, AuthCore, JwtIssuer};
use crate::configuration::{DatabaseSettings, Settings};
use crate::routes::{health_check, json_config, login, reset_password};
use crate::store::{CredentialStore, PgCredentialStore};
use actix_web::{dev::Server, web, web::Data, App, HttpServer};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> anyhow::Result<Self> {
        let connection_pool = get_connection_pool(&configuration.database);
        let store = Arc::new(PgCredentialStore::new(connection_pool));
        Self::build_with_store(configuration, store)
    }

    /// Build the application on top of an arbitrary credential store.
    pub fn build_with_store(
        configuration: Settings,
        store: Arc<dyn CredentialStore>,
    ) -> anyhow::Result<Self> {
        let auth_core = build_auth_core(store, &configuration)?;
        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, auth_core)?;
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    // A more expressive name that makes it clear that
    // this function only returns when the application is stopped.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn get_connection_pool(configuration: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new().connect_lazy_with(configuration.with_db())
}

/// Wire the collaborators configured in `configuration` around `store`.
pub fn build_auth_core(
    store: Arc<dyn CredentialStore>,
    configuration: &Settings,
) -> anyhow::Result<AuthCore> {
    let hasher = Argon2Hasher::new(&configuration.hashing)?;
    let fallback_digest = hasher
        .fallback_digest()
        .context("Failed to compute the fallback password digest.")?;
    let issuer = Arc::new(JwtIssuer::new(&configuration.token.signing_secret));
    let session_lifetime = configuration
        .token
        .lifetime()
        .context("Invalid session token lifetime.")?;
    Ok(AuthCore::new(
        store,
        Arc::new(hasher),
        issuer,
        session_lifetime,
        fallback_digest,
    ))
}

pub fn run(listener: TcpListener, auth_core: AuthCore) -> Result<Server, std::io::Error> {
    let auth_core = Data::new(auth_core);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(json_config())
            .route("/health_check", web::get().to(health_check))
            .route("/login", web::post().to(login))
            .route("/reset_password", web::post().to(reset_password))
            .app_data(auth_core.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}

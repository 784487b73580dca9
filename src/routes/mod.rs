//! src/routes/mod.rs

mod health_check;
mod login;
mod reset_password;

pub use health_check::health_check;
pub use login::login;
pub use reset_password::reset_password;

use crate::domain::{CredentialEmail, Credentials, PlainPassword, ValidationError};
use crate::error::Error;
use actix_web::web;
use secrecy::Secret;

/// JSON extractor configuration rendering payload errors as JSON `{message}`
/// bodies instead of actix's plain text.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| Error::MalformedPayload(err).into())
}

/// Request body shared by login and password reset.
#[derive(serde::Deserialize)]
pub struct CredentialsData {
    pub email: String,
    pub password: Secret<String>,
}

impl TryFrom<CredentialsData> for Credentials {
    type Error = ValidationError;

    fn try_from(value: CredentialsData) -> Result<Self, Self::Error> {
        let email = CredentialEmail::parse(value.email)?;
        let password = PlainPassword::parse(value.password)?;
        Ok(Self { email, password })
    }
}

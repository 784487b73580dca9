//! src/domain/mod.rs

mod credential_email;
mod credentials;
mod plain_password;

pub use credential_email::CredentialEmail;
pub use credentials::Credentials;
pub use plain_password::PlainPassword;

/// Validation error for request data
#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("`{0}` is not a valid email.")]
    InvalidEmail(String),
    #[error("The password is empty or too long.")]
    InvalidPassword,
}

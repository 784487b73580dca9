//! src/domain/credentials.rs

use crate::domain::{CredentialEmail, PlainPassword};

/// A validated email/password pair as submitted by a client.
#[derive(Debug)]
pub struct Credentials {
    pub email: CredentialEmail,
    pub password: PlainPassword,
}

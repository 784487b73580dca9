//! src/domain/credential_email.rs

use crate::domain::ValidationError;
use validator::ValidateEmail;

#[derive(Debug, Clone)]
pub struct CredentialEmail(String);

impl CredentialEmail {
    pub fn parse(s: String) -> Result<CredentialEmail, ValidationError> {
        if s.validate_email() {
            Ok(Self(s))
        } else {
            Err(ValidationError::InvalidEmail(s))
        }
    }
}

impl AsRef<str> for CredentialEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

//! src/domain/plain_password.rs

use crate::domain::ValidationError;
use secrecy::{ExposeSecret, Secret};
use unicode_segmentation::UnicodeSegmentation;

/// A caller-supplied plaintext password. It only lives for the duration of
/// one verify or hash call and is never logged.
#[derive(Debug)]
pub struct PlainPassword(Secret<String>);

impl PlainPassword {
    const MAX_GRAPHEMES: usize = 128;

    pub fn parse(s: Secret<String>) -> Result<PlainPassword, ValidationError> {
        let is_empty_or_whitespace = s.expose_secret().trim().is_empty();
        // A grapheme is defined by the Unicode standard as a "user-perceived"
        // character: `å` is a single grapheme, but it is composed of two characters.
        let is_too_long = s.expose_secret().graphemes(true).count() > Self::MAX_GRAPHEMES;
        if is_empty_or_whitespace || is_too_long {
            Err(ValidationError::InvalidPassword)
        } else {
            Ok(Self(s))
        }
    }

    pub fn into_secret(self) -> Secret<String> {
        self.0
    }
}

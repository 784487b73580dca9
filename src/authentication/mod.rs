//! src/authentication/mod.rs

mod auth_core;
mod password;
mod token;

pub use auth_core::{AuthCore, AuthError, AuthResult, ResetConfirmation, Session};
pub use password::{Argon2Hasher, PasswordHasher};
pub use token::{JwtIssuer, SessionClaims, TokenIssuer};

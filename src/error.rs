//! src/error.rs

use crate::authentication::AuthError;
use crate::domain::ValidationError;
use actix_web::error::JsonPayloadError;
use actix_web::http::{header, header::HeaderValue, StatusCode};
use actix_web::{HttpResponse, ResponseError};

pub type AppResult<T> = Result<T, Error>;

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

#[derive(thiserror::Error)]
pub enum Error {
    #[error("Invalid request: {0}")]
    ValidationError(#[from] ValidationError),
    #[error("The request body is not a valid JSON credentials object.")]
    MalformedPayload(#[source] JsonPayloadError),
    // unknown email and wrong password share this message on purpose
    #[error("Authentication failed.")]
    AuthError(#[source] AuthError),
    #[error("This action can not be done.")]
    ActionNotPermitted(#[source] AuthError),
    #[error("Fail to update.")]
    UpdateFailed(#[source] AuthError),
    #[error("Something went wrong.")]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::ValidationError(_) | Error::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            Error::AuthError(_) => StatusCode::UNAUTHORIZED,
            Error::ActionNotPermitted(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::UpdateFailed(_) => StatusCode::CONFLICT,
            Error::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "message": self.to_string() }));
        if let Error::AuthError(_) = self {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl Error {
    /// Map a failed login. Both "no such account" and "wrong password"
    /// end up as the same `AuthError` response.
    pub fn from_login_failure(e: AuthError) -> Self {
        match e {
            AuthError::UnexpectedError(err) => Error::UnexpectedError(err),
            e => Error::AuthError(e),
        }
    }

    /// Map a failed password reset.
    pub fn from_reset_failure(e: AuthError) -> Self {
        match e {
            e @ AuthError::NotFound => Error::ActionNotPermitted(e),
            e @ AuthError::WriteFailed => Error::UpdateFailed(e),
            AuthError::UnexpectedError(err) => Error::UnexpectedError(err),
            // not produced by a reset, listed to keep the match exhaustive
            e @ AuthError::InvalidCredential => Error::AuthError(e),
        }
    }
}

//! src/routes/reset_password.rs

use crate::authentication::AuthCore;
use crate::domain::Credentials;
use crate::error::{AppResult, Error};
use crate::routes::CredentialsData;
use actix_web::{web, HttpResponse};

#[tracing::instrument(
    name = "Reset password",
    skip(body, auth_core),
    fields(email = %body.email)
)]
pub async fn reset_password(
    body: web::Json<CredentialsData>,
    auth_core: web::Data<AuthCore>,
) -> AppResult<HttpResponse> {
    let credentials: Credentials = body.into_inner().try_into()?;
    let confirmation = auth_core
        .reset_credential(
            credentials.email.as_ref(),
            credentials.password.into_secret(),
        )
        .await
        .map_err(Error::from_reset_failure)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": confirmation.message })))
}

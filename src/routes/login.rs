//! src/routes/login.rs

use crate::authentication::AuthCore;
use crate::domain::Credentials;
use crate::error::{AppResult, Error};
use crate::routes::CredentialsData;
use actix_web::{web, HttpResponse};

#[derive(serde::Serialize)]
struct AccessToken {
    access_token: String,
}

#[tracing::instrument(
    name = "Log in",
    skip(body, auth_core),
    fields(email = %body.email)
)]
pub async fn login(
    body: web::Json<CredentialsData>,
    auth_core: web::Data<AuthCore>,
) -> AppResult<HttpResponse> {
    let credentials: Credentials = body.into_inner().try_into()?;
    let session = auth_core
        .issue_session(
            credentials.email.as_ref(),
            credentials.password.into_secret(),
        )
        .await
        .map_err(Error::from_login_failure)?;
    Ok(HttpResponse::Ok().json(AccessToken {
        access_token: session.token,
    }))
}

use std::future::{ready, Ready};

use actix_session::{Session, SessionExt};
use actix_web::{dev, web, FromRequest, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::CredentialVerifier;
use crate::errors::AppError;

use super::blocking_error;

const SESSION_USER_KEY: &str = "user_id";

/// Extractor guarding admin-only routes: resolves to the logged-in operator
/// or fails the request with 401 before the handler body runs.
pub struct AdminUser(pub String);

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut dev::Payload) -> Self::Future {
        let result = match req.get_session().get::<String>(SESSION_USER_KEY) {
            Ok(Some(username)) => Ok(AdminUser(username)),
            _ => Err(AppError::AuthRequired),
        };
        ready(result)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/login
///
/// Verifies the credential and stores the operator in the cookie session.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful"),
        (status = 401, description = "Wrong username or password"),
    ),
    tag = "auth"
)]
pub async fn login(
    session: Session,
    verifier: web::Data<dyn CredentialVerifier>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest { username, password } = body.into_inner();

    // bcrypt verification is deliberately slow; keep it off the async workers
    let verifier = verifier.clone();
    let candidate = username.clone();
    let accepted = web::block(move || verifier.verify(&candidate, &password))
        .await
        .map_err(blocking_error)?;

    if accepted {
        session
            .insert(SESSION_USER_KEY, username)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(HttpResponse::Ok().json(json!({ "success": true, "message": "Login exitoso" })))
    } else {
        Ok(HttpResponse::Unauthorized().json(json!({
            "success": false,
            "message": "Usuario o contraseña incorrectos"
        })))
    }
}

/// POST /api/logout
#[utoipa::path(
    post,
    path = "/api/logout",
    responses((status = 200, description = "Session destroyed")),
    tag = "auth"
)]
pub async fn logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().json(json!({ "success": true }))
}

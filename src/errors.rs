use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

/// Web-layer error taxonomy. Domain errors are translated into one of these
/// by the handlers, with entity-specific messages where the client expects
/// them.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("No autorizado")]
    AuthRequired,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AuthRequired => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(_) | AppError::NotFound(_) => HttpResponse::build(
                self.status_code(),
            )
            .json(serde_json::json!({ "message": self.to_string() })),
            AppError::AuthRequired => HttpResponse::Unauthorized().json(serde_json::json!({
                "success": false,
                "message": self.to_string()
            })),
            // Detail goes to the log, never to the client.
            AppError::Internal(detail) => {
                log::error!("internal error: {detail}");
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "message": "Error interno del servidor"
                }))
            }
        }
    }
}

use actix_web::{
    HttpResponse, ResponseError,
    http::{StatusCode, header::ContentType},
};

use super::helpers::error_chain_fmt;

pub const NOT_FOUND_BODY: &str = "עמוד לא נמצא - 404";
pub const SERVER_ERROR_BODY: &str = "שגיאת שרת - 500";

/// Anything that escapes a handler without a dedicated recovery path.
#[derive(thiserror::Error)]
#[error(transparent)]
pub struct ServerError(#[from] pub anyhow::Error);

impl std::fmt::Debug for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        tracing::error!(
            error.cause_chain = ?self,
            error.message = %self,
            "Unhandled error while serving a request"
        );
        HttpResponse::InternalServerError()
            .content_type(ContentType::plaintext())
            .body(SERVER_ERROR_BODY)
    }
}

/// Undecodable bodies and query strings end up here instead of the default 400 page.
pub fn extractor_error_handler<E>(err: E, _req: &actix_web::HttpRequest) -> actix_web::Error
where
    E: std::fmt::Display,
{
    ServerError(anyhow::anyhow!("Failed to decode the request: {err}")).into()
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type(ContentType::plaintext())
        .body(NOT_FOUND_BODY)
}

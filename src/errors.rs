use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden.")]
    Forbidden,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Internal server error.")]
    Internal,
}

impl ApiError {
    pub fn file_not_found(file_id: &str) -> Self {
        ApiError::NotFound(format!("File not found. (ID: {})", file_id))
    }

    pub fn user_not_found(user_id: &str) -> Self {
        ApiError::NotFound(format!("User not found. (ID: {})", user_id))
    }
}

#[derive(Serialize)]
struct ApiErrBody {
    message: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // 401 is plain text, everything else is the {message} JSON shape.
        match self {
            ApiError::Unauthorized => HttpResponse::build(self.status_code())
                .content_type("text/plain; charset=utf-8")
                .body("Unauthorized"),
            _ => HttpResponse::build(self.status_code()).json(ApiErrBody {
                message: self.to_string(),
            }),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        log::error!("db error: {e:?}");
        ApiError::Internal
    }
}

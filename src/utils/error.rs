use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use std::fmt;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug)]
pub enum AppError {
    DatabaseError(String),
    NotFound(String),
    InvalidRequest(String),
}

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "User not found")]
    pub error: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Driver messages stay in the logs; clients get a generic message.
        let error = match self {
            AppError::DatabaseError(msg) => {
                log::error!("❌ Database error: {}", msg);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            AppError::NotFound(msg) | AppError::InvalidRequest(msg) => msg.clone(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse { error })
    }
}

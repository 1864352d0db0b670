use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};
use tradetrack_core::CoreError; // Import core errors

use crate::models::ApiResponse;

/// Server-specific error types.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    CoreError(#[from] CoreError), // Automatically convert from CoreError

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::CoreError(core_err) => match core_err {
                CoreError::InvalidVector(_) | CoreError::WrongDimension { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                CoreError::LowConfidence(_) => StatusCode::UNAUTHORIZED,
                CoreError::NoCandidates | CoreError::NotFound(_) => StatusCode::NOT_FOUND,
                CoreError::AlreadyExists(_) | CoreError::AlreadyClockedIn(_) | CoreError::NotClockedIn(_) => {
                    StatusCode::CONFLICT
                }
                CoreError::Misconfigured(_) | CoreError::StoreFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "VALIDATION_ERROR",
            ServerError::Internal(_) => "UNKNOWN_ERROR",
            ServerError::CoreError(core_err) => core_err.code(),
        }
    }

    /// Message shown to the client. Failed face checks and server faults
    /// get a fixed text; the detail stays in the logs.
    fn public_message(&self) -> String {
        match self {
            ServerError::CoreError(CoreError::LowConfidence(_)) => "Face could not be verified".to_string(),
            ServerError::CoreError(core_err) if core_err.is_server_side() => "Internal server error".to_string(),
            ServerError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

// Convert ServerError into the JSON error envelope.
impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        if status.is_server_error() {
            error!(status = %status, code, error = %self, "Request failed");
        } else {
            warn!(status = %status, code, error = %self, "Request rejected");
        }

        let body = Json(ApiResponse::<()>::failure(code, self.public_message()));
        (status, body).into_response()
    }
}

// Define a Result type alias for handler functions
pub type ServerResult<T> = Result<T, ServerError>;

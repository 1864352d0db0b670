//! Defines the data structures used for API request and response bodies.

use serde::{Deserialize, Serialize};
use tradetrack_core::{Embedding, EmployeeId};

// --- Request Bodies ---

/// Request body for `POST /employees/verify`.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub employee_id: EmployeeId,
    pub embedding: Embedding,
}

/// Request body for `POST /employees/match`.
#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub embedding: Embedding,
}

/// Query string of `GET /employees/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub prefix: String,
}

// --- Response Bodies ---

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub employee_id: EmployeeId,
    pub score: f64,
    pub threshold: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub employees: usize,
}

// --- Generic Envelope ---

/// Every response body, success or failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            code: None,
            message: None,
        }
    }

    pub fn failure(code: &str, message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            code: Some(code.to_string()),
            message: Some(message.into()),
        }
    }
}

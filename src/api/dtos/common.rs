use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard error response structure for API errors
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type (e.g., "Bad request", "Unauthorized", "Not found", etc.)
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Stable machine-readable code (e.g., "VALIDATION_ERROR")
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, serde::Deserialize, utoipa::IntoParams)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

pub(crate) const fn default_page() -> i64 {
    1
}

pub(crate) const fn default_per_page() -> i64 {
    10
}

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use super::db_mapping::map_database_error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
    pub code: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {message}")]
    ValidationError {
        message: String,
        issues: Vec<ValidationIssue>,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    InternalError(#[source] anyhow::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Service unavailable: {service}")]
    ServiceUnavailable { service: String, message: String },
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let mut payload = serde_json::json!({
            "error": self.error_label(),
            "message": self.public_message(),
            "code": self.error_code(),
        });

        if let Some(issues) = self.validation_issues() {
            payload["details"] =
                serde_json::to_value(issues).expect("validation issues should serialize");
        }

        HttpResponse::build(self.status_code()).json(payload)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::TokenExpired => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::ValidationError { .. } => "VALIDATION_ERROR",
            AppError::Conflict(_) => "CONFLICT",
            AppError::InternalError(_) => "INTERNAL_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::TokenExpired => "TOKEN_EXPIRED",
            AppError::InvalidToken => "INVALID_TOKEN",
            AppError::ServiceUnavailable { .. } => "SERVICE_UNAVAILABLE",
        }
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            issues: Vec::new(),
        }
    }

    fn error_label(&self) -> &'static str {
        match self {
            AppError::DatabaseError(_) | AppError::InternalError(_) => "Internal server error",
            AppError::NotFound(_) => "Not found",
            AppError::Unauthorized => "Unauthorized",
            AppError::Forbidden(_) => "Forbidden",
            AppError::ValidationError { .. } => "Validation error",
            AppError::Conflict(_) => "Conflict",
            AppError::BadRequest(_) => "Bad request",
            AppError::TokenExpired => "Token expired",
            AppError::InvalidToken => "Invalid token",
            AppError::ServiceUnavailable { .. } => "Service unavailable",
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                "Internal server error".to_string()
            }
            AppError::NotFound(message)
            | AppError::Forbidden(message)
            | AppError::Conflict(message)
            | AppError::BadRequest(message) => message.clone(),
            AppError::ValidationError { message, .. } => message.clone(),
            AppError::Unauthorized => "Unauthorized".to_string(),
            AppError::TokenExpired => "Token expired".to_string(),
            AppError::InvalidToken => "Invalid token".to_string(),
            AppError::ServiceUnavailable { message, .. } => message.clone(),
        }
    }

    fn validation_issues(&self) -> Option<&[ValidationIssue]> {
        match self {
            AppError::ValidationError { issues, .. } if !issues.is_empty() => Some(issues),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_) => AppError::ServiceUnavailable {
                service: "database".to_string(),
                message: "Unable to connect to database. Please try again later.".to_string(),
            },
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => AppError::ServiceUnavailable {
                service: "database".to_string(),
                message: "Service temporarily unavailable. Please try again later.".to_string(),
            },
            sqlx::Error::Database(database_error) => {
                if let Some(mapped) = map_database_error(
                    database_error.code().as_deref(),
                    database_error.constraint(),
                    database_error.message(),
                ) {
                    mapped
                } else {
                    AppError::DatabaseError(sqlx::Error::Database(database_error))
                }
            }
            other => AppError::DatabaseError(other),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut issues = Vec::new();
        collect_validation_issues(None, &err, &mut issues);
        issues.sort_by(|left, right| {
            left.field
                .cmp(&right.field)
                .then(left.code.cmp(&right.code))
        });

        let message = match issues.as_slice() {
            [issue] => issue.message.clone(),
            _ => "Request validation failed".to_string(),
        };

        AppError::ValidationError { message, issues }
    }
}

fn collect_validation_issues(
    prefix: Option<String>,
    errors: &ValidationErrors,
    out: &mut Vec<ValidationIssue>,
) {
    for (field, kind) in errors.errors() {
        let path = match &prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(std::borrow::Cow::to_string)
                        .unwrap_or_else(|| format!("{path} is invalid"));
                    out.push(ValidationIssue {
                        field: path.clone(),
                        message,
                        code: error.code.to_string(),
                    });
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_validation_issues(Some(path), nested, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validation_issues(Some(format!("{path}[{index}]")), nested, out);
                }
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

use std::error::Error as _;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::response::{ApiResponse, Meta};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Invalid request body: {message}")]
    InvalidBody {
        field: Option<String>,
        message: String,
    },

    #[error("Unauthorized {0}")]
    Unauthorized(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_)
            | AppError::Validation { .. }
            | AppError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }

        let field = match &self {
            AppError::Validation { field, .. } => Some((*field).to_string()),
            AppError::InvalidBody { field, .. } => field.clone(),
            _ => None,
        };

        let body = ApiResponse {
            message: self.to_string(),
            data: Some(ErrorData {
                error: self.to_string(),
                field,
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        // Data errors carry the deserializer's `path: reason` text as their source.
        let detail = match &rejection {
            JsonRejection::JsonDataError(err) => err.source().map(ToString::to_string),
            JsonRejection::JsonSyntaxError(err) => err.source().map(ToString::to_string),
            _ => None,
        }
        .unwrap_or_else(|| rejection.body_text());

        AppError::InvalidBody {
            field: body_field(&detail),
            message: detail,
        }
    }
}

/// Top-level field named in a JSON deserialization message, if any.
///
/// Handles both `ingredients[0].amount: invalid type ...` and
/// ``missing field `title` at line 1 column 9``.
pub fn body_field(detail: &str) -> Option<String> {
    let mut segments: Vec<&str> = detail.split(": ").collect();
    segments.pop();
    let path = segments.into_iter().find(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'))
    });
    if let Some(path) = path {
        return path
            .split(['.', '['])
            .next()
            .filter(|name| !name.is_empty())
            .map(str::to_string);
    }

    let (_, rest) = detail.split_once("missing field `")?;
    rest.split('`').next().map(str::to_string)
}

pub type AppResult<T> = Result<T, AppError>;

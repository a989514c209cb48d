//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which entity an identifier failed to resolve to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Actor,
    Movie,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Actor => f.write_str("actor"),
            EntityKind::Movie => f.write_str("movie"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing setting: {0}")]
    Missing(&'static str),
    #[error("invalid setting {key}: {value}")]
    Invalid { key: &'static str, value: String },
    #[error("config load: {0}")]
    Load(String),
}

/// A field constraint violated by caller input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("title length must be at least 1 and less than 150 characters (got {0})")]
    TitleLength(usize),
    #[error("description length must be less than 1000 characters (got {0})")]
    DescriptionLength(usize),
    #[error("rating must be in the range from 0.0 to 10.0 (got {0})")]
    RatingRange(f64),
    #[error("name must not be empty")]
    EmptyName,
    #[error("sex must be a single character code (got {0:?})")]
    SexCode(String),
    #[error("{field} must be a date in YYYY-MM-DD form (got {value:?})")]
    Date { field: &'static str, value: String },
    #[error("invalid sort column: {0}")]
    SortColumn(String),
    #[error("invalid sort order: {0}")]
    SortOrder(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: i64 },
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthorized")]
    Unauthorized,
}

impl AppError {
    pub fn actor_not_found(id: i64) -> Self {
        AppError::NotFound {
            kind: EntityKind::Actor,
            id,
        }
    }

    pub fn movie_not_found(id: i64) -> Self {
        AppError::NotFound {
            kind: EntityKind::Movie,
            id,
        }
    }

    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Db(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_entity_kind() {
        let err = AppError::movie_not_found(7);
        assert_eq!(err.to_string(), "movie not found: 7");
        assert_eq!(err.status().0, StatusCode::NOT_FOUND);
        assert!(matches!(
            AppError::actor_not_found(3),
            AppError::NotFound { kind: EntityKind::Actor, id: 3 }
        ));
    }

    #[test]
    fn database_errors_are_server_errors() {
        let err = AppError::Db(sqlx::Error::RowNotFound);
        assert_eq!(err.status(), (StatusCode::INTERNAL_SERVER_ERROR, "database_error"));
    }

    #[test]
    fn validation_maps_to_unprocessable() {
        let err = AppError::from(ValidationError::RatingRange(11.0));
        assert_eq!(err.status(), (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"));
    }
}

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::logger::Logger;
use crate::models::responses::DefaultResponse;

pub const NOT_FOUND_MESSAGE: &str = "El cliente no existe o no fue dado de alta.";
pub const ID_MISMATCH_MESSAGE: &str = "Los IDs ingresados no son iguales.";
pub const INVALID_DATE_MESSAGE: &str =
    "La fecha de nacimiento no está en un formato permitido. De preferencia, utilice el formato dd/MM/yyyy";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

/// Accumulated per-field failures, rendered as text only at the HTTP boundary.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Errors {
    errors: Vec<FieldError>,
}

impl Errors {
    pub fn new(errors: &[(&str, &str)]) -> Self {
        let mut accumulated = Errors::default();
        for (field, reason) in errors {
            accumulated.push(field, reason);
        }
        accumulated
    }

    pub fn push(&mut self, field: &str, reason: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            reason: reason.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|error| error.field.as_str())
    }

    pub fn check(self) -> Result<(), Errors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.errors
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages = self
            .errors
            .iter()
            .map(|error| error.reason.as_str())
            .collect::<Vec<_>>();

        write!(f, "{}", messages.join("\n\n"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(Errors),

    #[error("{}", INVALID_DATE_MESSAGE)]
    InvalidDate,

    #[error("{}", ID_MISMATCH_MESSAGE)]
    IdMismatch,

    #[error("{0}")]
    NotFound(String),

    #[error("database error")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn cliente_not_found() -> Self {
        AppError::NotFound(NOT_FOUND_MESSAGE.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidDate | AppError::IdMismatch => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Errors> for AppError {
    fn from(errors: Errors) -> Self {
        AppError::Validation(errors)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::Validation(errors) => {
                let message = errors.to_string();
                DefaultResponse::error(&message, errors.into_vec())
            }
            AppError::InvalidDate => DefaultResponse::error(
                INVALID_DATE_MESSAGE,
                vec![FieldError {
                    field: "FechaNacimiento".to_string(),
                    reason: INVALID_DATE_MESSAGE.to_string(),
                }],
            ),
            AppError::Database(err) => {
                Logger::new(format!("{:?}", err)).log();
                DefaultResponse::error("internal server error", Vec::new())
            }
            other => DefaultResponse::error(&other.to_string(), Vec::new()),
        };

        (status, body.into_json()).into_response()
    }
}

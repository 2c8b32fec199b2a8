use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::errors::FieldError;

#[derive(Serialize, Debug)]
pub struct DefaultResponse {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl DefaultResponse {
    pub fn ok(message: &str) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.to_string(),
            errors: Vec::new(),
        }
    }

    pub fn error(message: &str, errors: Vec<FieldError>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.to_string(),
            errors,
        }
    }

    pub fn into_json(self) -> Json<Value> {
        Json(serde_json::json!(self))
    }
}

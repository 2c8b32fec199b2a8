use axum::Json;
use serde_json::Value;

use crate::models::responses::DefaultResponse;

pub mod cliente;

pub async fn health() -> Json<Value> {
    DefaultResponse::ok("clientes api is running").into_json()
}

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::requests::cliente::ClienteDto;
use crate::models::responses::DefaultResponse;
use crate::utils::normalize_cuit;
use crate::validation;
use crate::AppState;

pub async fn get_enabled(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClienteDto>>, AppError> {
    let clientes = state.clientes.get_enabled().await?;

    if clientes.is_empty() {
        return Err(AppError::NotFound(
            "No existen registros de clientes habilitados.".to_string(),
        ));
    }

    Ok(Json(clientes.into_iter().map(ClienteDto::from).collect()))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ClienteDto>, AppError> {
    match state.clientes.get_by_id(id).await? {
        Some(cliente) => Ok(Json(cliente.into())),
        None => Err(AppError::cliente_not_found()),
    }
}

pub async fn search_by_name(
    State(state): State<AppState>,
    Path(nombre): Path<String>,
) -> Result<Json<Vec<ClienteDto>>, AppError> {
    let clientes = state.clientes.search_by_name(&nombre).await?;

    if clientes.is_empty() {
        return Err(AppError::NotFound(format!(
            "No existen registros de clientes con nombre {}.",
            nombre
        )));
    }

    Ok(Json(clientes.into_iter().map(ClienteDto::from).collect()))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<ClienteDto>,
) -> Result<Response, AppError> {
    validate(&state, &body, true).await?;
    let nuevo = validation::normalize(&body)?;

    let cliente = state.clientes.create(&nuevo).await?;
    tracing::info!(id = cliente.id, "cliente created");

    let location = format!("/clientes/{}", cliente.id);
    let body = ClienteDto::from(cliente);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(body)).into_response())
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ClienteDto>,
) -> Result<Json<ClienteDto>, AppError> {
    if id != body.id {
        return Err(AppError::IdMismatch);
    }

    validate(&state, &body, false).await?;

    if state.clientes.get_by_id(id).await?.is_none() {
        return Err(AppError::cliente_not_found());
    }

    let datos = validation::normalize(&body)?;

    // the row can disappear between the lookup and the write
    let cliente = match state.clientes.update(id, &datos).await? {
        Some(cliente) => cliente,
        None => return Err(AppError::cliente_not_found()),
    };
    tracing::info!(id, "cliente updated");

    Ok(Json(cliente.into()))
}

pub async fn disable(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    match state.clientes.get_by_id(id).await? {
        Some(cliente) if !cliente.deshabilitado => (),
        _ => return Err(AppError::cliente_not_found()),
    }

    if !state.clientes.disable(id).await? {
        return Err(AppError::cliente_not_found());
    }
    tracing::info!(id, "cliente disabled");

    Ok(DefaultResponse::ok("Al cliente se lo ha dado de baja.").into_json())
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    if state.clientes.get_by_id(id).await?.is_none() {
        return Err(AppError::cliente_not_found());
    }

    if !state.clientes.delete(id).await? {
        return Err(AppError::cliente_not_found());
    }
    tracing::info!(id, "cliente deleted");

    Ok(DefaultResponse::ok("Cliente eliminado satisfactoriamente").into_json())
}

/// Field checks, plus CUIT and email uniqueness when `check_unique` is set and
/// the fields themselves are valid.
async fn validate(state: &AppState, body: &ClienteDto, check_unique: bool) -> Result<(), AppError> {
    let mut errors = validation::validate_fields(body);

    if check_unique && errors.is_empty() {
        let cuit = normalize_cuit(body.cuit.as_deref().unwrap_or_default());
        if state.clientes.exists_cuit(&cuit).await? {
            errors.push("CUIT", "Ya existe un registro con el campo CUIT.");
        }

        let email = body.email.as_deref().unwrap_or_default();
        if state.clientes.exists_email(email).await? {
            errors.push("Email", "Ya existe un registro con el campo Email.");
        }
    }

    if !errors.is_empty() {
        let fields = errors.fields().collect::<Vec<_>>();
        tracing::debug!(?fields, "cliente rejected");
    }

    errors.check().map_err(AppError::from)
}

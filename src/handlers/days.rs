// src/handlers/days.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::ledger::{CreateDayPayload, CreateEntryPayload, Day, DayDetail, Entry, UpdateDayPayload},
};

/// Filtro opcional de conta de paciente no detalhe do dia.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PatientQuery {
    pub tutor: Option<String>,
    pub mascota: Option<String>,
}

impl PatientQuery {
    /// Alguma das duas chaves presentes ativa o filtro; ausentes
    /// normalizam para "".
    pub fn selection(self) -> Option<(String, String)> {
        if self.tutor.is_none() && self.mascota.is_none() {
            return None;
        }
        Some((
            self.tutor.unwrap_or_default(),
            self.mascota.unwrap_or_default(),
        ))
    }
}

// POST /api/days
#[utoipa::path(
    post,
    path = "/api/days",
    tag = "Days",
    request_body = CreateDayPayload,
    responses(
        (status = 201, description = "Dia criado", body = Day),
        (status = 409, description = "Já existe um dia para a data"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_day(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateDayPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let day = app_state.ledger_service.create_day(payload).await?;
    Ok((StatusCode::CREATED, Json(day)))
}

// GET /api/days/{id}
#[utoipa::path(
    get,
    path = "/api/days/{id}",
    tag = "Days",
    params(
        ("id" = i32, Path, description = "ID do dia"),
        PatientQuery
    ),
    responses(
        (status = 200, description = "Detalhe do dia com resumo", body = DayDetail),
        (status = 404, description = "Dia não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_day(
    State(app_state): State<AppState>,
    Path(day_id): Path<i32>,
    Query(patient): Query<PatientQuery>,
) -> Result<Json<DayDetail>, AppError> {
    let detail = app_state
        .ledger_service
        .day_detail(day_id, patient.selection())
        .await?;
    Ok(Json(detail))
}

// PUT /api/days/{id}
#[utoipa::path(
    put,
    path = "/api/days/{id}",
    tag = "Days",
    params(("id" = i32, Path, description = "ID do dia")),
    request_body = UpdateDayPayload,
    responses(
        (status = 200, description = "Dia atualizado", body = Day),
        (status = 404, description = "Dia não encontrado"),
        (status = 409, description = "Data em conflito com outro dia")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_day(
    State(app_state): State<AppState>,
    Path(day_id): Path<i32>,
    Json(payload): Json<UpdateDayPayload>,
) -> Result<Json<Day>, AppError> {
    payload.validate()?;
    let day = app_state.ledger_service.update_day(day_id, payload).await?;
    Ok(Json(day))
}

// DELETE /api/days/{id}
#[utoipa::path(
    delete,
    path = "/api/days/{id}",
    tag = "Days",
    params(("id" = i32, Path, description = "ID do dia")),
    responses(
        (status = 204, description = "Dia removido com seus lançamentos"),
        (status = 404, description = "Dia não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_day(
    State(app_state): State<AppState>,
    Path(day_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.ledger_service.delete_day(day_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/days/{id}/close
#[utoipa::path(
    post,
    path = "/api/days/{id}/close",
    tag = "Days",
    params(("id" = i32, Path, description = "ID do dia")),
    responses(
        (status = 200, description = "Cierre de caja recalculado", body = Day),
        (status = 404, description = "Dia não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn close_day(
    State(app_state): State<AppState>,
    Path(day_id): Path<i32>,
) -> Result<Json<Day>, AppError> {
    let day = app_state.ledger_service.close_day(day_id).await?;
    Ok(Json(day))
}

// POST /api/days/{id}/entries
#[utoipa::path(
    post,
    path = "/api/days/{id}/entries",
    tag = "Days",
    params(("id" = i32, Path, description = "ID do dia")),
    request_body = CreateEntryPayload,
    responses(
        (status = 201, description = "Lançamento criado", body = Entry),
        (status = 404, description = "Dia não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_entry(
    State(app_state): State<AppState>,
    Path(day_id): Path<i32>,
    Json(payload): Json<CreateEntryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let entry = app_state.ledger_service.add_entry(day_id, payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

// DELETE /api/entries/{id}
#[utoipa::path(
    delete,
    path = "/api/entries/{id}",
    tag = "Days",
    params(("id" = i32, Path, description = "ID do lançamento")),
    responses(
        (status = 200, description = "Lançamento removido; devolve o dia dono"),
        (status = 404, description = "Lançamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_entry(
    State(app_state): State<AppState>,
    Path(entry_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let day_id = app_state.ledger_service.delete_entry(entry_id).await?;
    Ok(Json(json!({ "dayId": day_id })))
}

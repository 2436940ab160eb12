// src/handlers/reports.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::calendar::PeriodQuery,
    models::reports::{DayReport, MonthReport},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PatientPdfQuery {
    pub tutor: Option<String>,
    pub mascota: Option<String>,
}

/// Resposta PDF inline, mesmo cabeçalho para todos os relatórios.
fn pdf_response(filename: String, bytes: Vec<u8>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename={}", filename),
            ),
        ],
        bytes,
    )
}

// GET /api/reports/month
#[utoipa::path(
    get,
    path = "/api/reports/month",
    tag = "Reports",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Resumo mensal com seções formatadas", body = MonthReport),
        (status = 400, description = "Período inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn month_report(
    State(app_state): State<AppState>,
    Query(period): Query<PeriodQuery>,
) -> Result<Json<MonthReport>, AppError> {
    let (year, month) = period.resolve();
    let report = app_state.report_service.month_report(year, month).await?;
    Ok(Json(report))
}

// GET /api/reports/month.pdf
#[utoipa::path(
    get,
    path = "/api/reports/month.pdf",
    tag = "Reports",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Resumo mensal em PDF", content_type = "application/pdf"),
        (status = 400, description = "Período inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn month_report_pdf(
    State(app_state): State<AppState>,
    Query(period): Query<PeriodQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (year, month) = period.resolve();
    let (filename, bytes) = app_state
        .report_service
        .month_report_pdf(year, month)
        .await?;
    Ok(pdf_response(filename, bytes))
}

// GET /api/days/{id}/report
#[utoipa::path(
    get,
    path = "/api/days/{id}/report",
    tag = "Reports",
    params(("id" = i32, Path, description = "ID do dia")),
    responses(
        (status = 200, description = "Resumo do dia com seções formatadas", body = DayReport),
        (status = 404, description = "Dia não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn day_report(
    State(app_state): State<AppState>,
    Path(day_id): Path<i32>,
) -> Result<Json<DayReport>, AppError> {
    let report = app_state.report_service.day_report(day_id).await?;
    Ok(Json(report))
}

// GET /api/days/{id}/report.pdf
#[utoipa::path(
    get,
    path = "/api/days/{id}/report.pdf",
    tag = "Reports",
    params(("id" = i32, Path, description = "ID do dia")),
    responses(
        (status = 200, description = "Resumo do dia em PDF", content_type = "application/pdf"),
        (status = 404, description = "Dia não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn day_report_pdf(
    State(app_state): State<AppState>,
    Path(day_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let (filename, bytes) = app_state.report_service.day_report_pdf(day_id).await?;
    Ok(pdf_response(filename, bytes))
}

// GET /api/days/{id}/patient.pdf
#[utoipa::path(
    get,
    path = "/api/days/{id}/patient.pdf",
    tag = "Reports",
    params(
        ("id" = i32, Path, description = "ID do dia"),
        PatientPdfQuery
    ),
    responses(
        (status = 200, description = "Cuenta del paciente em PDF", content_type = "application/pdf"),
        (status = 404, description = "Dia não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn patient_pdf(
    State(app_state): State<AppState>,
    Path(day_id): Path<i32>,
    Query(query): Query<PatientPdfQuery>,
) -> Result<impl IntoResponse, AppError> {
    let tutor = query.tutor.unwrap_or_default();
    let mascota = query.mascota.unwrap_or_default();
    let (filename, bytes) = app_state
        .report_service
        .patient_pdf(day_id, tutor.trim(), mascota.trim())
        .await?;
    Ok(pdf_response(filename, bytes))
}

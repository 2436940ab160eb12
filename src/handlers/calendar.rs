// src/handlers/calendar.rs

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{common::error::AppError, config::AppState, models::ledger::CalendarMonth};

/// Período opcional; sem parâmetros, o mês corrente.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PeriodQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl PeriodQuery {
    pub fn resolve(&self) -> (i32, u32) {
        let today = Utc::now().date_naive();
        (
            self.year.unwrap_or_else(|| today.year()),
            self.month.unwrap_or_else(|| today.month()),
        )
    }
}

// GET /api/calendar
#[utoipa::path(
    get,
    path = "/api/calendar",
    tag = "Calendar",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Dias do mês com total e contagem", body = CalendarMonth),
        (status = 400, description = "Período inválido"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_calendar(
    State(app_state): State<AppState>,
    Query(period): Query<PeriodQuery>,
) -> Result<Json<CalendarMonth>, AppError> {
    let (year, month) = period.resolve();
    let calendar = app_state.ledger_service.month_overview(year, month).await?;
    Ok(Json(calendar))
}

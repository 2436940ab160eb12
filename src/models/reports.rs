// src/models/reports.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{
    ledger::{Day, Entry},
    stats::{DailySummary, MonthSummary},
};

/// Linha de relatório já formatada (rótulo + valor como texto).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub label: String,
    pub value: String,
}

/// Seção de relatório. As mesmas seções alimentam a visão JSON e o PDF,
/// então nenhum número é formatado duas vezes.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSection {
    pub title: String,
    pub rows: Vec<ReportRow>,
}

/// Relatório mensal: resumo bruto (para a UI) + seções formatadas.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthReport {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub summary: MonthSummary,
    pub sections: Vec<ReportSection>,
}

/// Relatório diário: dia, resumo, seções e os movimentos em ordem de criação.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayReport {
    pub day: Day,
    pub summary: DailySummary,
    pub sections: Vec<ReportSection>,
    pub movements: Vec<Entry>,
}

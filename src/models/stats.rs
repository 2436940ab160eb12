// src/models/stats.rs

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::ledger::{Category, PaymentType};

/// Total de um dia dentro do mês (somente dias com movimento).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayTotal {
    pub fecha: NaiveDate,
    pub total: i64,
}

/// Grupo de lançamentos por (tutor, mascota). Tutor/mascota nulos são
/// normalizados para "" antes do agrupamento, então nulo e vazio caem
/// no mesmo grupo. Ordem de primeira aparição.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientGroup {
    pub tutor: String,
    pub mascota: String,
    pub count: i64,
    pub total: i64,
}

/// Resumo de um único dia de caixa.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    /// Os 3 métodos de pagamento sempre presentes, zerados quando ausentes.
    #[schema(value_type = Object)]
    pub totals_by_payment: BTreeMap<PaymentType, i64>,
    /// As 5 categorias sempre presentes, zeradas quando ausentes.
    #[schema(value_type = Object)]
    pub totals_by_category: BTreeMap<Category, i64>,
    /// Soma bruta de TODOS os lançamentos, inclusive os de valores
    /// não reconhecidos que ficam fora dos agrupamentos.
    pub day_total: i64,
    pub patient_groups: Vec<PatientGroup>,
}

/// Resumo mensal com totais agrupados e indicadores derivados.
/// Divisões inteiras truncam; divisor zero resulta em 0 (ou 0.0), nunca erro.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub month_start: NaiveDate,
    pub month_end: NaiveDate,
    #[schema(value_type = Object)]
    pub totals_by_payment: BTreeMap<PaymentType, i64>,
    #[schema(value_type = Object)]
    pub totals_by_category: BTreeMap<Category, i64>,
    /// Soma dos três buckets de pagamento.
    pub total_general: i64,
    pub tx_count: i64,
    /// Dias distintos com pelo menos um lançamento.
    pub dias_con_mov: i64,
    /// total_general / dias_con_mov, truncado; 0 sem movimento.
    pub promedio_diario: i64,
    /// Um item por data com movimento, em ordem de data ascendente.
    pub per_day_totals: Vec<DayTotal>,
    /// As 5 maiores somas diárias, descendente. Empates mantêm a ordem
    /// de data (sort estável sobre per_day_totals).
    pub top5: Vec<DayTotal>,
    pub peak_day: Option<NaiveDate>,
    pub peak_total: i64,
    #[schema(value_type = Object)]
    pub count_by_category: BTreeMap<Category, i64>,
    /// total_general / tx_count, truncado; 0 sem transações.
    pub ticket_promedio: i64,
    #[schema(value_type = Object)]
    pub ticket_promedio_cat: BTreeMap<Category, i64>,
    /// 100 * valor / total_general; 0.0 quando total_general == 0.
    #[schema(value_type = Object)]
    pub part_pago: BTreeMap<PaymentType, f64>,
    #[schema(value_type = Object)]
    pub part_cat: BTreeMap<Category, f64>,
}

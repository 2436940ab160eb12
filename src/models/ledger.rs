// src/models/ledger.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// --- Enums de domínio ---
//
// No banco, categoria e tipo_pago são texto livre. Aqui eles viram
// variantes fechadas; a normalização acontece em `parse` e valores
// desconhecidos são descartados pela agregação (nunca viram erro).

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Atencion,
    Procedimiento,
    Farmacia,
    Examen,
    Peluqueria,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Atencion,
        Category::Procedimiento,
        Category::Farmacia,
        Category::Examen,
        Category::Peluqueria,
    ];

    /// Chave de armazenamento (o que vai para a coluna `categoria`).
    pub fn storage_key(&self) -> &'static str {
        match self {
            Category::Atencion => "ATENCION",
            Category::Procedimiento => "PROCEDIMIENTO",
            Category::Farmacia => "FARMACIA",
            Category::Examen => "EXAMEN",
            Category::Peluqueria => "PELUQUERIA",
        }
    }

    /// Rótulo de exibição. Mapeamento único, usado por TODAS as saídas
    /// (JSON e PDF) para não haver duas grafias diferentes.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Atencion => "Atenciones",
            Category::Procedimiento => "Procedimientos",
            Category::Farmacia => "Farmacia/Petshop",
            Category::Examen => "Exámenes",
            Category::Peluqueria => "Peluquería",
        }
    }

    pub fn parse(raw: &str) -> Option<Category> {
        match raw {
            "ATENCION" => Some(Category::Atencion),
            "PROCEDIMIENTO" => Some(Category::Procedimiento),
            "FARMACIA" => Some(Category::Farmacia),
            "EXAMEN" => Some(Category::Examen),
            "PELUQUERIA" => Some(Category::Peluqueria),
            _ => None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub enum PaymentType {
    #[serde(rename = "DEBITO/CREDITO")]
    DebitoCredito,
    #[serde(rename = "EFECTIVO")]
    Efectivo,
    #[serde(rename = "TRANSFERENCIA")]
    Transferencia,
}

impl PaymentType {
    pub const ALL: [PaymentType; 3] = [
        PaymentType::DebitoCredito,
        PaymentType::Efectivo,
        PaymentType::Transferencia,
    ];

    pub fn storage_key(&self) -> &'static str {
        match self {
            PaymentType::DebitoCredito => "DEBITO/CREDITO",
            PaymentType::Efectivo => "EFECTIVO",
            PaymentType::Transferencia => "TRANSFERENCIA",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentType::DebitoCredito => "Débito/Crédito",
            PaymentType::Efectivo => "Efectivo",
            PaymentType::Transferencia => "Transferencia",
        }
    }

    pub fn parse(raw: &str) -> Option<PaymentType> {
        match raw {
            "DEBITO/CREDITO" => Some(PaymentType::DebitoCredito),
            "EFECTIVO" => Some(PaymentType::Efectivo),
            "TRANSFERENCIA" => Some(PaymentType::Transferencia),
            _ => None,
        }
    }
}

// --- Structs ---

/// Registro de caixa de uma data. `cierre_caja` é calculado no fechamento
/// (apertura + total do dia), mas continua editável depois; o fechamento
/// sempre sobrescreve edições manuais.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub id: i32,
    pub fecha: NaiveDate,
    pub doctor: String,
    pub apertura_caja: i64,
    pub cierre_caja: i64,
    pub created_at: Option<DateTime<Utc>>,
}

/// Um lançamento monetário dentro de um Day. Valores em CLP inteiro.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: i32,
    pub day_id: i32,
    pub categoria: String,
    pub descripcion: Option<String>,
    pub monto: i64,
    pub tipo_pago: String,
    pub tutor: Option<String>,
    pub mascota: Option<String>,
    pub peso: Option<String>,
    pub especie: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Linha de lançamento com a data do dia, para agregações mensais.
#[derive(Debug, Clone, FromRow)]
pub struct DatedEntry {
    pub fecha: NaiveDate,
    pub categoria: String,
    pub tipo_pago: String,
    pub monto: i64,
}

/// Linha do calendário mensal: um dia existente com total e contagem.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayOverview {
    pub id: i32,
    pub fecha: NaiveDate,
    pub doctor: String,
    pub apertura_caja: i64,
    pub cierre_caja: i64,
    pub total: i64,
    pub tx_count: i64,
}

/// Detalhe completo de um dia: registro, lançamentos em ordem de criação,
/// resumo agregado e, quando pedido, a conta filtrada de um paciente.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayDetail {
    pub day: Day,
    pub entries: Vec<Entry>,
    pub summary: crate::models::stats::DailySummary,
    pub patient_entries: Vec<Entry>,
    pub patient_total: i64,
}

/// Visão do calendário de um mês: só os dias que existem no banco.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub days: Vec<DayOverview>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDayPayload {
    pub fecha: NaiveDate,
    pub doctor: Option<String>,
    #[validate(range(min = 0, message = "La apertura de caja no puede ser negativa."))]
    pub apertura_caja: Option<i64>,
    #[validate(range(min = 0, message = "El cierre de caja no puede ser negativo."))]
    pub cierre_caja: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDayPayload {
    pub fecha: NaiveDate,
    pub doctor: Option<String>,
    #[validate(range(min = 0, message = "La apertura de caja no puede ser negativa."))]
    pub apertura_caja: Option<i64>,
    #[validate(range(min = 0, message = "El cierre de caja no puede ser negativo."))]
    pub cierre_caja: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryPayload {
    pub categoria: Category,
    pub tipo_pago: PaymentType,
    /// Opcional: quando ausente ou 0 e houver `catalog_item_id`,
    /// o preço sugerido do catálogo é usado.
    #[validate(range(min = 0, message = "El monto no puede ser negativo."))]
    pub monto: Option<i64>,
    pub descripcion: Option<String>,
    pub tutor: Option<String>,
    pub mascota: Option<String>,
    pub peso: Option<String>,
    pub especie: Option<String>,
    pub catalog_item_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categoria_chave_de_armazenamento_faz_ida_e_volta() {
        for c in &Category::ALL {
            assert_eq!(Category::parse(c.storage_key()), Some(*c));
        }
    }

    #[test]
    fn tipo_pago_chave_de_armazenamento_faz_ida_e_volta() {
        for p in &PaymentType::ALL {
            assert_eq!(PaymentType::parse(p.storage_key()), Some(*p));
        }
    }

    #[test]
    fn chave_desconhecida_nao_vira_variante() {
        assert_eq!(Category::parse("VACUNATORIO"), None);
        assert_eq!(Category::parse("atencion"), None);
        assert_eq!(PaymentType::parse("CHEQUE"), None);
        assert_eq!(PaymentType::parse(""), None);
    }
}

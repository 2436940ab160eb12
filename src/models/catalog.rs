// src/models/catalog.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::ledger::Category;

/// Serviço/produto do catálogo com preço sugerido, usado para
/// pré-preencher o valor de um lançamento.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: i32,
    pub categoria: String,
    pub nombre: String,
    pub precio: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemPayload {
    pub categoria: Category,
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: String,
    #[validate(range(min = 0, message = "El precio no puede ser negativo."))]
    pub precio: Option<i64>,
}

// src/handlers/catalog.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        catalog::{CatalogItem, CatalogItemPayload},
        ledger::Category,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogFilter {
    /// Categoria exata (chave de armazenamento, ex.: ATENCION).
    pub cat: Option<Category>,
    /// Trecho do nome, sem diferenciar maiúsculas.
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SuggestQuery {
    pub categoria: Category,
}

// GET /api/catalog
#[utoipa::path(
    get,
    path = "/api/catalog",
    tag = "Catalog",
    params(CatalogFilter),
    responses(
        (status = 200, description = "Serviços do catálogo", body = Vec<CatalogItem>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_items(
    State(app_state): State<AppState>,
    Query(filter): Query<CatalogFilter>,
) -> Result<Json<Vec<CatalogItem>>, AppError> {
    let items = app_state
        .catalog_service
        .list(filter.cat, filter.q.as_deref())
        .await?;
    Ok(Json(items))
}

// GET /api/catalog/suggest
#[utoipa::path(
    get,
    path = "/api/catalog/suggest",
    tag = "Catalog",
    params(SuggestQuery),
    responses(
        (status = 200, description = "Sugestões de serviço para a categoria", body = Vec<CatalogItem>)
    ),
    security(("api_jwt" = []))
)]
pub async fn suggest(
    State(app_state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> Result<Json<Vec<CatalogItem>>, AppError> {
    let items = app_state.catalog_service.suggest(query.categoria).await?;
    Ok(Json(items))
}

// POST /api/catalog
#[utoipa::path(
    post,
    path = "/api/catalog",
    tag = "Catalog",
    request_body = CatalogItemPayload,
    responses(
        (status = 201, description = "Serviço criado (ou preço atualizado se já existia)", body = CatalogItem)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    Json(payload): Json<CatalogItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let item = app_state.catalog_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

// PUT /api/catalog/{id}
#[utoipa::path(
    put,
    path = "/api/catalog/{id}",
    tag = "Catalog",
    params(("id" = i32, Path, description = "ID do serviço")),
    request_body = CatalogItemPayload,
    responses(
        (status = 200, description = "Serviço atualizado", body = CatalogItem),
        (status = 404, description = "Serviço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    Path(item_id): Path<i32>,
    Json(payload): Json<CatalogItemPayload>,
) -> Result<Json<CatalogItem>, AppError> {
    payload.validate()?;
    let item = app_state.catalog_service.update(item_id, payload).await?;
    Ok(Json(item))
}

// DELETE /api/catalog/{id}
#[utoipa::path(
    delete,
    path = "/api/catalog/{id}",
    tag = "Catalog",
    params(("id" = i32, Path, description = "ID do serviço")),
    responses(
        (status = 204, description = "Serviço removido"),
        (status = 404, description = "Serviço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_item(
    State(app_state): State<AppState>,
    Path(item_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state.catalog_service.delete(item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

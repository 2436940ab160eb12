// src/services/catalog_service.rs

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::{catalog::{CatalogItem, CatalogItemPayload}, ledger::Category},
};

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        categoria: Option<Category>,
        q: Option<&str>,
    ) -> Result<Vec<CatalogItem>, AppError> {
        let q = q.map(str::trim).filter(|q| !q.is_empty());
        self.repo
            .list(categoria.map(|c| c.storage_key()), q)
            .await
    }

    /// Sugestões para o pré-preenchimento de lançamentos.
    pub async fn suggest(&self, categoria: Category) -> Result<Vec<CatalogItem>, AppError> {
        self.repo.list_by_categoria(categoria.storage_key()).await
    }

    /// Cria um serviço. Se já existir um com a mesma (categoria, nombre),
    /// apenas atualiza o preço.
    pub async fn create(&self, payload: CatalogItemPayload) -> Result<CatalogItem, AppError> {
        let nombre = payload.nombre.trim();
        let precio = payload.precio.unwrap_or(0);

        if let Some(existing) = self
            .repo
            .find_by_name(payload.categoria.storage_key(), nombre)
            .await?
        {
            tracing::info!("Serviço já existia, atualizando o preço: {}", nombre);
            return self
                .repo
                .update_precio(existing.id, precio)
                .await?
                .ok_or(AppError::CatalogItemNotFound);
        }

        self.repo
            .create(payload.categoria.storage_key(), nombre, precio)
            .await
    }

    pub async fn update(
        &self,
        id: i32,
        payload: CatalogItemPayload,
    ) -> Result<CatalogItem, AppError> {
        self.repo
            .update(
                id,
                payload.categoria.storage_key(),
                payload.nombre.trim(),
                payload.precio.unwrap_or(0),
            )
            .await?
            .ok_or(AppError::CatalogItemNotFound)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let deleted = self.repo.delete(id).await?;
        if deleted == 0 {
            return Err(AppError::CatalogItemNotFound);
        }
        Ok(())
    }
}

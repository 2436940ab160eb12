// src/db/catalog_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::catalog::CatalogItem};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listagem com filtros opcionais de categoria e texto do nome.
    pub async fn list(
        &self,
        categoria: Option<&str>,
        q: Option<&str>,
    ) -> Result<Vec<CatalogItem>, AppError> {
        let items = sqlx::query_as::<_, CatalogItem>(
            r#"
            SELECT * FROM catalog_items
            WHERE ($1::text IS NULL OR categoria = $1)
              AND ($2::text IS NULL OR nombre ILIKE '%' || $2 || '%')
            ORDER BY categoria ASC, nombre ASC
            "#,
        )
        .bind(categoria)
        .bind(q)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn list_by_categoria(&self, categoria: &str) -> Result<Vec<CatalogItem>, AppError> {
        let items = sqlx::query_as::<_, CatalogItem>(
            "SELECT * FROM catalog_items WHERE categoria = $1 ORDER BY nombre ASC",
        )
        .bind(categoria)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<CatalogItem>, AppError> {
        let item = sqlx::query_as::<_, CatalogItem>("SELECT * FROM catalog_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    /// Busca por (categoria, nombre) sem diferenciar maiúsculas,
    /// usada pelo upsert do serviço de catálogo.
    pub async fn find_by_name(
        &self,
        categoria: &str,
        nombre: &str,
    ) -> Result<Option<CatalogItem>, AppError> {
        let item = sqlx::query_as::<_, CatalogItem>(
            r#"
            SELECT * FROM catalog_items
            WHERE UPPER(categoria) = UPPER($1) AND UPPER(nombre) = UPPER($2)
            "#,
        )
        .bind(categoria)
        .bind(nombre)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    pub async fn create(
        &self,
        categoria: &str,
        nombre: &str,
        precio: i64,
    ) -> Result<CatalogItem, AppError> {
        let item = sqlx::query_as::<_, CatalogItem>(
            r#"
            INSERT INTO catalog_items (categoria, nombre, precio)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(categoria)
        .bind(nombre)
        .bind(precio)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    pub async fn update(
        &self,
        id: i32,
        categoria: &str,
        nombre: &str,
        precio: i64,
    ) -> Result<Option<CatalogItem>, AppError> {
        let item = sqlx::query_as::<_, CatalogItem>(
            r#"
            UPDATE catalog_items
            SET categoria = $2, nombre = $3, precio = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(categoria)
        .bind(nombre)
        .bind(precio)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    pub async fn update_precio(&self, id: i32, precio: i64) -> Result<Option<CatalogItem>, AppError> {
        let item = sqlx::query_as::<_, CatalogItem>(
            "UPDATE catalog_items SET precio = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(precio)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    pub async fn delete(&self, id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM catalog_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

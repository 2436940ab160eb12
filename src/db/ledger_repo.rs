// src/db/ledger_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::ledger::{DatedEntry, Day, DayOverview, Entry},
};

// O repositório do livro-caixa: tabelas 'days' e 'entries'.
// Cada operação é um único statement, então não há commit parcial.
#[derive(Clone)]
pub struct LedgerRepository {
    pool: PgPool,
}

impl LedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  DIAS (registro de caixa por data)
    // =========================================================================

    pub async fn create_day(
        &self,
        fecha: NaiveDate,
        doctor: &str,
        apertura_caja: i64,
        cierre_caja: i64,
    ) -> Result<Day, AppError> {
        let day = sqlx::query_as::<_, Day>(
            r#"
            INSERT INTO days (fecha, doctor, apertura_caja, cierre_caja)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(fecha)
        .bind(doctor)
        .bind(apertura_caja)
        .bind(cierre_caja)
        .fetch_one(&self.pool)
        .await?;

        Ok(day)
    }

    pub async fn find_day_by_id(&self, id: i32) -> Result<Option<Day>, AppError> {
        let day = sqlx::query_as::<_, Day>("SELECT * FROM days WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(day)
    }

    pub async fn find_day_by_fecha(&self, fecha: NaiveDate) -> Result<Option<Day>, AppError> {
        let day = sqlx::query_as::<_, Day>("SELECT * FROM days WHERE fecha = $1")
            .bind(fecha)
            .fetch_optional(&self.pool)
            .await?;

        Ok(day)
    }

    pub async fn update_day(
        &self,
        id: i32,
        fecha: NaiveDate,
        doctor: &str,
        apertura_caja: i64,
        cierre_caja: i64,
    ) -> Result<Option<Day>, AppError> {
        let day = sqlx::query_as::<_, Day>(
            r#"
            UPDATE days
            SET fecha = $2, doctor = $3, apertura_caja = $4, cierre_caja = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(fecha)
        .bind(doctor)
        .bind(apertura_caja)
        .bind(cierre_caja)
        .fetch_optional(&self.pool)
        .await?;

        Ok(day)
    }

    // O ON DELETE CASCADE da FK remove os lançamentos junto (sem órfãos).
    pub async fn delete_day(&self, id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM days WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Fechamento de caixa: cierre = apertura + total do dia, em um único
    /// UPDATE atômico. Sobrescreve incondicionalmente edições manuais.
    pub async fn close_day(&self, id: i32) -> Result<Option<Day>, AppError> {
        let day = sqlx::query_as::<_, Day>(
            r#"
            UPDATE days
            SET cierre_caja = apertura_caja + COALESCE(
                (SELECT SUM(e.monto) FROM entries e WHERE e.day_id = days.id), 0
            )::bigint
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(day)
    }

    /// Dias do intervalo com total e contagem de lançamentos (calendário).
    pub async fn list_day_overviews(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DayOverview>, AppError> {
        let overviews = sqlx::query_as::<_, DayOverview>(
            r#"
            SELECT d.id, d.fecha, d.doctor, d.apertura_caja, d.cierre_caja,
                   COALESCE(SUM(e.monto), 0)::bigint AS total,
                   COUNT(e.id) AS tx_count
            FROM days d
            LEFT JOIN entries e ON e.day_id = d.id
            WHERE d.fecha BETWEEN $1 AND $2
            GROUP BY d.id
            ORDER BY d.fecha ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(overviews)
    }

    // =========================================================================
    //  LANÇAMENTOS
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_entry(
        &self,
        day_id: i32,
        categoria: &str,
        descripcion: &str,
        monto: i64,
        tipo_pago: &str,
        tutor: &str,
        mascota: &str,
        peso: &str,
        especie: &str,
    ) -> Result<Entry, AppError> {
        let entry = sqlx::query_as::<_, Entry>(
            r#"
            INSERT INTO entries
                (day_id, categoria, descripcion, monto, tipo_pago, tutor, mascota, peso, especie)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(day_id)
        .bind(categoria)
        .bind(descripcion)
        .bind(monto)
        .bind(tipo_pago)
        .bind(tutor)
        .bind(mascota)
        .bind(peso)
        .bind(especie)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Lançamentos do dia em ordem de criação (id ascendente).
    pub async fn list_entries_for_day(&self, day_id: i32) -> Result<Vec<Entry>, AppError> {
        let entries =
            sqlx::query_as::<_, Entry>("SELECT * FROM entries WHERE day_id = $1 ORDER BY id ASC")
                .bind(day_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(entries)
    }

    /// Lançamentos de uma conta (tutor, mascota) dentro do dia. NULL e ""
    /// são equivalentes na comparação, igual ao agrupamento.
    pub async fn list_entries_for_patient(
        &self,
        day_id: i32,
        tutor: &str,
        mascota: &str,
    ) -> Result<Vec<Entry>, AppError> {
        let entries = sqlx::query_as::<_, Entry>(
            r#"
            SELECT * FROM entries
            WHERE day_id = $1
              AND COALESCE(tutor, '') = $2
              AND COALESCE(mascota, '') = $3
            ORDER BY id ASC
            "#,
        )
        .bind(day_id)
        .bind(tutor)
        .bind(mascota)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn find_entry_by_id(&self, id: i32) -> Result<Option<Entry>, AppError> {
        let entry = sqlx::query_as::<_, Entry>("SELECT * FROM entries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entry)
    }

    pub async fn delete_entry(&self, id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Lançamentos do intervalo com a data do dia, para o resumo mensal.
    /// A agregação em si é feita em memória pelo motor de estatísticas.
    pub async fn list_dated_entries_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DatedEntry>, AppError> {
        let rows = sqlx::query_as::<_, DatedEntry>(
            r#"
            SELECT d.fecha, e.categoria, e.tipo_pago, e.monto
            FROM entries e
            JOIN days d ON e.day_id = d.id
            WHERE d.fecha BETWEEN $1 AND $2
            ORDER BY d.fecha ASC, e.id ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

// src/services/ledger_service.rs

use crate::{
    common::{error::AppError, format::month_name_es},
    db::{CatalogRepository, LedgerRepository},
    models::{
        catalog::CatalogItem,
        ledger::{
            CalendarMonth, CreateDayPayload, CreateEntryPayload, Day, DayDetail, Entry,
            UpdateDayPayload,
        },
    },
    services::stats_service::{self, daily_summary},
};

#[derive(Clone)]
pub struct LedgerService {
    repo: LedgerRepository,
    catalog_repo: CatalogRepository,
}

/// Pré-preenchimento a partir do catálogo: o preço sugerido entra quando o
/// monto veio ausente ou zerado, e o nome do serviço vira a descrição
/// quando ela veio vazia.
fn apply_catalog_prefill(
    monto: Option<i64>,
    descripcion: Option<String>,
    item: Option<&CatalogItem>,
) -> (i64, String) {
    let mut monto = monto.unwrap_or(0);
    let mut descripcion = descripcion.unwrap_or_default();

    if let Some(item) = item {
        if monto == 0 {
            monto = item.precio.unwrap_or(0);
        }
        if descripcion.trim().is_empty() {
            descripcion = item.nombre.clone();
        }
    }

    (monto, descripcion)
}

impl LedgerService {
    pub fn new(repo: LedgerRepository, catalog_repo: CatalogRepository) -> Self {
        Self { repo, catalog_repo }
    }

    /// Cria o registro de caixa de uma data. Se a data já existir,
    /// devolve conflito com o id do dia existente, para abrir em edição.
    pub async fn create_day(&self, payload: CreateDayPayload) -> Result<Day, AppError> {
        if let Some(existing) = self.repo.find_day_by_fecha(payload.fecha).await? {
            return Err(AppError::DayAlreadyExists {
                fecha: existing.fecha,
                day_id: existing.id,
            });
        }

        let day = self
            .repo
            .create_day(
                payload.fecha,
                payload.doctor.as_deref().unwrap_or(""),
                payload.apertura_caja.unwrap_or(0),
                payload.cierre_caja.unwrap_or(0),
            )
            .await?;

        tracing::info!("Día creado: {} (id {})", day.fecha, day.id);
        Ok(day)
    }

    /// Detalhe do dia com resumo agregado. `patient` filtra, além disso,
    /// a conta de um (tutor, mascota) específico.
    pub async fn day_detail(
        &self,
        day_id: i32,
        patient: Option<(String, String)>,
    ) -> Result<DayDetail, AppError> {
        let day = self
            .repo
            .find_day_by_id(day_id)
            .await?
            .ok_or(AppError::DayNotFound)?;

        let entries = self.repo.list_entries_for_day(day_id).await?;
        let summary = daily_summary(&entries);

        let (patient_entries, patient_total) = match patient {
            Some((tutor, mascota)) => {
                let selected = self
                    .repo
                    .list_entries_for_patient(day_id, tutor.trim(), mascota.trim())
                    .await?;
                let total = selected.iter().map(|e| e.monto).sum();
                (selected, total)
            }
            None => (Vec::new(), 0),
        };

        Ok(DayDetail {
            day,
            entries,
            summary,
            patient_entries,
            patient_total,
        })
    }

    pub async fn update_day(&self, day_id: i32, payload: UpdateDayPayload) -> Result<Day, AppError> {
        // Mudança de data não pode colidir com outro dia existente.
        if let Some(other) = self.repo.find_day_by_fecha(payload.fecha).await? {
            if other.id != day_id {
                return Err(AppError::DayAlreadyExists {
                    fecha: other.fecha,
                    day_id: other.id,
                });
            }
        }

        self.repo
            .update_day(
                day_id,
                payload.fecha,
                payload.doctor.as_deref().unwrap_or(""),
                payload.apertura_caja.unwrap_or(0),
                payload.cierre_caja.unwrap_or(0),
            )
            .await?
            .ok_or(AppError::DayNotFound)
    }

    pub async fn delete_day(&self, day_id: i32) -> Result<(), AppError> {
        let deleted = self.repo.delete_day(day_id).await?;
        if deleted == 0 {
            return Err(AppError::DayNotFound);
        }
        tracing::info!("Día {} eliminado (con sus registros)", day_id);
        Ok(())
    }

    /// Fechamento: cierre = apertura + total do dia. Recalcular sempre
    /// sobrescreve um cierre editado manualmente.
    pub async fn close_day(&self, day_id: i32) -> Result<Day, AppError> {
        let day = self
            .repo
            .close_day(day_id)
            .await?
            .ok_or(AppError::DayNotFound)?;

        tracing::info!(
            "Cierre de caja del día {}: apertura {} -> cierre {}",
            day.fecha,
            day.apertura_caja,
            day.cierre_caja
        );
        Ok(day)
    }

    pub async fn add_entry(
        &self,
        day_id: i32,
        payload: CreateEntryPayload,
    ) -> Result<Entry, AppError> {
        // O dia precisa existir antes de receber lançamentos.
        self.repo
            .find_day_by_id(day_id)
            .await?
            .ok_or(AppError::DayNotFound)?;

        let item = match payload.catalog_item_id {
            Some(item_id) => self.catalog_repo.find_by_id(item_id).await?,
            None => None,
        };
        let (monto, descripcion) =
            apply_catalog_prefill(payload.monto, payload.descripcion, item.as_ref());

        self.repo
            .insert_entry(
                day_id,
                payload.categoria.storage_key(),
                &descripcion,
                monto,
                payload.tipo_pago.storage_key(),
                payload.tutor.as_deref().unwrap_or("").trim(),
                payload.mascota.as_deref().unwrap_or("").trim(),
                payload.peso.as_deref().unwrap_or(""),
                payload.especie.as_deref().unwrap_or(""),
            )
            .await
    }

    /// Remove um lançamento e devolve o id do dia dono, para o cliente
    /// recarregar o detalhe.
    pub async fn delete_entry(&self, entry_id: i32) -> Result<i32, AppError> {
        let entry = self
            .repo
            .find_entry_by_id(entry_id)
            .await?
            .ok_or(AppError::EntryNotFound)?;

        self.repo.delete_entry(entry_id).await?;
        Ok(entry.day_id)
    }

    pub async fn month_overview(&self, year: i32, month: u32) -> Result<CalendarMonth, AppError> {
        let (start, end) = stats_service::month_bounds(year, month)?;
        let days = self.repo.list_day_overviews(start, end).await?;

        Ok(CalendarMonth {
            year,
            month,
            month_name: month_name_es(month).to_string(),
            days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::apply_catalog_prefill;
    use crate::models::catalog::CatalogItem;

    fn item(nombre: &str, precio: Option<i64>) -> CatalogItem {
        CatalogItem {
            id: 1,
            categoria: "ATENCION".to_string(),
            nombre: nombre.to_string(),
            precio,
        }
    }

    #[test]
    fn sem_item_usa_valores_informados() {
        let (monto, desc) = apply_catalog_prefill(Some(5000), Some("Consulta".into()), None);
        assert_eq!(monto, 5000);
        assert_eq!(desc, "Consulta");
    }

    #[test]
    fn monto_ausente_ou_zero_usa_preco_sugerido() {
        let item = item("Consulta general", Some(12000));
        let (monto, _) = apply_catalog_prefill(None, Some("x".into()), Some(&item));
        assert_eq!(monto, 12000);

        let (monto, _) = apply_catalog_prefill(Some(0), Some("x".into()), Some(&item));
        assert_eq!(monto, 12000);

        // Monto explícito vence o catálogo.
        let (monto, _) = apply_catalog_prefill(Some(8000), Some("x".into()), Some(&item));
        assert_eq!(monto, 8000);
    }

    #[test]
    fn descricao_vazia_usa_nome_do_item() {
        let item = item("Vacuna antirrábica", Some(9000));
        let (_, desc) = apply_catalog_prefill(Some(9000), None, Some(&item));
        assert_eq!(desc, "Vacuna antirrábica");

        let (_, desc) = apply_catalog_prefill(Some(9000), Some("   ".into()), Some(&item));
        assert_eq!(desc, "Vacuna antirrábica");
    }

    #[test]
    fn item_sem_preco_deixa_monto_zero() {
        let item = item("Control", None);
        let (monto, _) = apply_catalog_prefill(None, None, Some(&item));
        assert_eq!(monto, 0);
    }
}

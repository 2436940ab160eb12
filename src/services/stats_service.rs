// src/services/stats_service.rs

//! Motor de agregação do livro-caixa. As funções de cálculo são puras e
//! operam sobre linhas já carregadas; o `StatsService` só faz a ponte com
//! o repositório. Regras numéricas deterministas:
//!   - divisões inteiras truncam;
//!   - divisor zero resulta em 0 (ou 0.0), nunca em erro;
//!   - categoria/tipo de pagamento desconhecidos ficam fora dos
//!     agrupamentos, silenciosamente.

use std::collections::BTreeMap;

use chrono::{Days, Months, NaiveDate};

use crate::{
    common::error::AppError,
    db::LedgerRepository,
    models::{
        ledger::{Category, DatedEntry, Entry, PaymentType},
        stats::{DailySummary, DayTotal, MonthSummary, PatientGroup},
    },
};

fn zeroed_payments() -> BTreeMap<PaymentType, i64> {
    PaymentType::ALL.iter().map(|p| (*p, 0)).collect()
}

fn zeroed_categories() -> BTreeMap<Category, i64> {
    Category::ALL.iter().map(|c| (*c, 0)).collect()
}

/// Primeiro e último dia do mês, ciente de anos bissextos.
/// Mês fora de 1..=12 é violação de contrato do chamador: erro, não clamp.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), AppError> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(AppError::InvalidPeriod { year, month })?;
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|d| d.checked_sub_days(Days::new(1)))
        .ok_or(AppError::InvalidPeriod { year, month })?;
    Ok((start, end))
}

/// Resumo de um único dia a partir dos seus lançamentos.
/// Sem efeitos colaterais; somente leitura e agregação.
pub fn daily_summary(entries: &[Entry]) -> DailySummary {
    let mut totals_by_payment = zeroed_payments();
    let mut totals_by_category = zeroed_categories();
    let mut day_total = 0i64;
    let mut patient_groups: Vec<PatientGroup> = Vec::new();

    for e in entries {
        // O total do dia soma TUDO; os buckets só somam o que é reconhecido.
        day_total += e.monto;

        if let Some(pago) = PaymentType::parse(&e.tipo_pago) {
            *totals_by_payment.entry(pago).or_insert(0) += e.monto;
        }
        if let Some(cat) = Category::parse(&e.categoria) {
            *totals_by_category.entry(cat).or_insert(0) += e.monto;
        }

        // NULL e "" agrupam juntos; ordem de primeira aparição.
        let tutor = e.tutor.as_deref().unwrap_or("");
        let mascota = e.mascota.as_deref().unwrap_or("");
        match patient_groups
            .iter_mut()
            .find(|g| g.tutor == tutor && g.mascota == mascota)
        {
            Some(group) => {
                group.count += 1;
                group.total += e.monto;
            }
            None => patient_groups.push(PatientGroup {
                tutor: tutor.to_string(),
                mascota: mascota.to_string(),
                count: 1,
                total: e.monto,
            }),
        }
    }

    DailySummary {
        totals_by_payment,
        totals_by_category,
        day_total,
        patient_groups,
    }
}

/// Resumo mensal a partir de lançamentos datados. Linhas fora do
/// intervalo do mês são ignoradas.
pub fn month_summary(
    year: i32,
    month: u32,
    rows: &[DatedEntry],
) -> Result<MonthSummary, AppError> {
    let (month_start, month_end) = month_bounds(year, month)?;

    let mut totals_by_payment = zeroed_payments();
    let mut totals_by_category = zeroed_categories();
    let mut count_by_category = zeroed_categories();
    let mut per_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    let mut tx_count = 0i64;

    for row in rows {
        if row.fecha < month_start || row.fecha > month_end {
            continue;
        }
        tx_count += 1;
        *per_day.entry(row.fecha).or_insert(0) += row.monto;

        if let Some(pago) = PaymentType::parse(&row.tipo_pago) {
            *totals_by_payment.entry(pago).or_insert(0) += row.monto;
        }
        if let Some(cat) = Category::parse(&row.categoria) {
            *totals_by_category.entry(cat).or_insert(0) += row.monto;
            *count_by_category.entry(cat).or_insert(0) += 1;
        }
    }

    let total_general: i64 = totals_by_payment.values().sum();

    // BTreeMap já entrega as datas em ordem ascendente.
    let per_day_totals: Vec<DayTotal> = per_day
        .into_iter()
        .map(|(fecha, total)| DayTotal { fecha, total })
        .collect();
    let dias_con_mov = per_day_totals.len() as i64;

    // Sort estável: empates de total preservam a ordem de data.
    let mut top5 = per_day_totals.clone();
    top5.sort_by(|a, b| b.total.cmp(&a.total));
    top5.truncate(5);

    let peak_day = top5.first().map(|d| d.fecha);
    let peak_total = top5.first().map(|d| d.total).unwrap_or(0);

    let promedio_diario = if dias_con_mov > 0 {
        total_general / dias_con_mov
    } else {
        0
    };
    let ticket_promedio = if tx_count > 0 { total_general / tx_count } else { 0 };

    let ticket_promedio_cat: BTreeMap<Category, i64> = Category::ALL
        .iter()
        .map(|c| {
            let count = count_by_category.get(c).copied().unwrap_or(0);
            let total = totals_by_category.get(c).copied().unwrap_or(0);
            (*c, if count > 0 { total / count } else { 0 })
        })
        .collect();

    let share = |v: i64| -> f64 {
        if total_general > 0 {
            100.0 * v as f64 / total_general as f64
        } else {
            0.0
        }
    };
    let part_pago: BTreeMap<PaymentType, f64> = totals_by_payment
        .iter()
        .map(|(p, v)| (*p, share(*v)))
        .collect();
    let part_cat: BTreeMap<Category, f64> = totals_by_category
        .iter()
        .map(|(c, v)| (*c, share(*v)))
        .collect();

    Ok(MonthSummary {
        month_start,
        month_end,
        totals_by_payment,
        totals_by_category,
        total_general,
        tx_count,
        dias_con_mov,
        promedio_diario,
        per_day_totals,
        top5,
        peak_day,
        peak_total,
        count_by_category,
        ticket_promedio,
        ticket_promedio_cat,
        part_pago,
        part_cat,
    })
}

#[derive(Clone)]
pub struct StatsService {
    repo: LedgerRepository,
}

impl StatsService {
    pub fn new(repo: LedgerRepository) -> Self {
        Self { repo }
    }

    pub async fn month_stats(&self, year: i32, month: u32) -> Result<MonthSummary, AppError> {
        let (start, end) = month_bounds(year, month)?;
        let rows = self.repo.list_dated_entries_in_range(start, end).await?;
        month_summary(year, month, &rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::format::fmt_pct;

    fn entry(categoria: &str, tipo_pago: &str, monto: i64) -> Entry {
        Entry {
            id: 0,
            day_id: 1,
            categoria: categoria.to_string(),
            descripcion: None,
            monto,
            tipo_pago: tipo_pago.to_string(),
            tutor: None,
            mascota: None,
            peso: None,
            especie: None,
            created_at: None,
        }
    }

    fn entry_con_paciente(
        tutor: Option<&str>,
        mascota: Option<&str>,
        monto: i64,
    ) -> Entry {
        Entry {
            tutor: tutor.map(str::to_string),
            mascota: mascota.map(str::to_string),
            ..entry("ATENCION", "EFECTIVO", monto)
        }
    }

    fn dated(fecha: &str, categoria: &str, tipo_pago: &str, monto: i64) -> DatedEntry {
        DatedEntry {
            fecha: fecha.parse().unwrap(),
            categoria: categoria.to_string(),
            tipo_pago: tipo_pago.to_string(),
            monto,
        }
    }

    #[test]
    fn limites_do_mes_e_bissexto() {
        let (start, end) = month_bounds(2024, 2).unwrap();
        assert_eq!(start, "2024-02-01".parse::<NaiveDate>().unwrap());
        assert_eq!(end, "2024-02-29".parse::<NaiveDate>().unwrap());

        let (_, end) = month_bounds(2023, 2).unwrap();
        assert_eq!(end, "2023-02-28".parse::<NaiveDate>().unwrap());

        let (_, end) = month_bounds(2025, 12).unwrap();
        assert_eq!(end, "2025-12-31".parse::<NaiveDate>().unwrap());
    }

    #[test]
    fn mes_fora_do_intervalo_e_erro() {
        assert!(matches!(
            month_bounds(2025, 0),
            Err(AppError::InvalidPeriod { .. })
        ));
        assert!(matches!(
            month_bounds(2025, 13),
            Err(AppError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn mes_sem_lancamentos_retorna_forma_zerada() {
        let s = month_summary(2025, 6, &[]).unwrap();
        assert_eq!(s.total_general, 0);
        assert_eq!(s.tx_count, 0);
        assert_eq!(s.dias_con_mov, 0);
        assert_eq!(s.promedio_diario, 0);
        assert_eq!(s.ticket_promedio, 0);
        assert!(s.top5.is_empty());
        assert!(s.per_day_totals.is_empty());
        assert_eq!(s.peak_day, None);
        assert_eq!(s.peak_total, 0);
        for p in PaymentType::ALL {
            assert_eq!(s.totals_by_payment[&p], 0);
            assert_eq!(s.part_pago[&p], 0.0);
        }
        for c in Category::ALL {
            assert_eq!(s.totals_by_category[&c], 0);
            assert_eq!(s.count_by_category[&c], 0);
            assert_eq!(s.ticket_promedio_cat[&c], 0);
            assert_eq!(s.part_cat[&c], 0.0);
        }
    }

    #[test]
    fn exemplo_de_mes_com_tres_lancamentos() {
        // 1000 + 3000 EFECTIVO/ATENCION, 2000 TRANSFERENCIA/EXAMEN, em 2 dias.
        let rows = vec![
            dated("2025-03-10", "ATENCION", "EFECTIVO", 1000),
            dated("2025-03-10", "EXAMEN", "TRANSFERENCIA", 2000),
            dated("2025-03-20", "ATENCION", "EFECTIVO", 3000),
        ];
        let s = month_summary(2025, 3, &rows).unwrap();

        assert_eq!(s.total_general, 6000);
        assert_eq!(s.totals_by_payment[&PaymentType::Efectivo], 4000);
        assert_eq!(s.totals_by_payment[&PaymentType::Transferencia], 2000);
        assert_eq!(s.totals_by_payment[&PaymentType::DebitoCredito], 0);
        assert_eq!(s.tx_count, 3);
        assert_eq!(s.dias_con_mov, 2);
        assert_eq!(s.promedio_diario, 3000);
        assert_eq!(s.ticket_promedio, 2000);
        assert_eq!(s.peak_day, Some("2025-03-20".parse().unwrap()));
        assert_eq!(s.peak_total, 3000);

        // Participações com uma casa decimal na exibição.
        assert_eq!(fmt_pct(s.part_pago[&PaymentType::Efectivo]), "66.7%");
        assert_eq!(fmt_pct(s.part_pago[&PaymentType::Transferencia]), "33.3%");
        assert_eq!(fmt_pct(s.part_pago[&PaymentType::DebitoCredito]), "0.0%");

        // total_general cruza com a soma dos buckets de pagamento.
        let soma: i64 = s.totals_by_payment.values().sum();
        assert_eq!(s.total_general, soma);
    }

    #[test]
    fn divisoes_truncam() {
        let rows = vec![
            dated("2025-05-02", "ATENCION", "EFECTIVO", 50),
            dated("2025-05-03", "ATENCION", "EFECTIVO", 25),
            dated("2025-05-04", "ATENCION", "EFECTIVO", 25),
        ];
        let s = month_summary(2025, 5, &rows).unwrap();
        // 100 / 3 trunca para 33 nos dois indicadores.
        assert_eq!(s.promedio_diario, 33);
        assert_eq!(s.ticket_promedio, 33);
        assert_eq!(s.ticket_promedio_cat[&Category::Atencion], 33);
    }

    #[test]
    fn top5_limitado_ordenado_e_estavel() {
        let rows = vec![
            dated("2025-07-01", "ATENCION", "EFECTIVO", 500),
            dated("2025-07-02", "ATENCION", "EFECTIVO", 900),
            dated("2025-07-03", "ATENCION", "EFECTIVO", 700),
            dated("2025-07-04", "ATENCION", "EFECTIVO", 900),
            dated("2025-07-05", "ATENCION", "EFECTIVO", 100),
            dated("2025-07-06", "ATENCION", "EFECTIVO", 300),
            dated("2025-07-07", "ATENCION", "EFECTIVO", 200),
        ];
        let s = month_summary(2025, 7, &rows).unwrap();

        assert_eq!(s.top5.len(), 5);
        assert!(s.top5.windows(2).all(|w| w[0].total >= w[1].total));
        // Todo elemento do top5 existe em per_day_totals.
        assert!(s.top5.iter().all(|d| s.per_day_totals.contains(d)));
        // Empate de 900: a data mais antiga vem primeiro (sort estável).
        assert_eq!(s.top5[0].fecha, "2025-07-02".parse().unwrap());
        assert_eq!(s.top5[1].fecha, "2025-07-04".parse().unwrap());
        assert_eq!(s.peak_day, Some("2025-07-02".parse().unwrap()));
    }

    #[test]
    fn valores_desconhecidos_ficam_fora_dos_agrupamentos() {
        let rows = vec![
            dated("2025-09-01", "ATENCION", "EFECTIVO", 1000),
            dated("2025-09-01", "OTRA_COSA", "CHEQUE", 999),
        ];
        let s = month_summary(2025, 9, &rows).unwrap();

        // O lançamento desconhecido conta como transação e entra no total
        // do dia, mas não em nenhum bucket nem no total general.
        assert_eq!(s.tx_count, 2);
        assert_eq!(s.total_general, 1000);
        assert_eq!(s.per_day_totals[0].total, 1999);
        let soma_cats: i64 = s.totals_by_category.values().sum();
        assert_eq!(soma_cats, 1000);
    }

    #[test]
    fn lancamentos_fora_do_mes_sao_ignorados() {
        let rows = vec![
            dated("2025-04-30", "ATENCION", "EFECTIVO", 100),
            dated("2025-05-01", "ATENCION", "EFECTIVO", 200),
            dated("2025-06-01", "ATENCION", "EFECTIVO", 400),
        ];
        let s = month_summary(2025, 5, &rows).unwrap();
        assert_eq!(s.total_general, 200);
        assert_eq!(s.tx_count, 1);
    }

    #[test]
    fn resumo_diario_soma_tudo_e_cruza_com_buckets() {
        let entries = vec![
            entry("ATENCION", "EFECTIVO", 1000),
            entry("EXAMEN", "TRANSFERENCIA", 2000),
            entry("PELUQUERIA", "DEBITO/CREDITO", 500),
        ];
        let s = daily_summary(&entries);

        assert_eq!(s.day_total, 3500);
        let soma: i64 = s.totals_by_payment.values().sum();
        assert_eq!(s.day_total, soma);
        assert_eq!(s.totals_by_category[&Category::Examen], 2000);
        assert_eq!(s.totals_by_category[&Category::Farmacia], 0);
    }

    #[test]
    fn resumo_diario_descarta_desconhecidos_dos_buckets() {
        let entries = vec![
            entry("ATENCION", "EFECTIVO", 1000),
            entry("VACUNATORIO", "CHEQUE", 700),
        ];
        let s = daily_summary(&entries);

        // day_total segue sendo a soma bruta de todos os lançamentos.
        assert_eq!(s.day_total, 1700);
        let soma_pagos: i64 = s.totals_by_payment.values().sum();
        assert_eq!(soma_pagos, 1000);
    }

    #[test]
    fn agrupamento_por_paciente_normaliza_nulos() {
        let entries = vec![
            entry_con_paciente(Some("Ana"), Some("Rex"), 1000),
            entry_con_paciente(Some("Ana"), Some("Rex"), 2000),
            entry_con_paciente(None, None, 500),
        ];
        let s = daily_summary(&entries);

        assert_eq!(s.patient_groups.len(), 2);
        assert_eq!(s.patient_groups[0].tutor, "Ana");
        assert_eq!(s.patient_groups[0].mascota, "Rex");
        assert_eq!(s.patient_groups[0].count, 2);
        assert_eq!(s.patient_groups[0].total, 3000);
        // Nulo agrupa sob ("", "").
        assert_eq!(s.patient_groups[1].tutor, "");
        assert_eq!(s.patient_groups[1].mascota, "");
        assert_eq!(s.patient_groups[1].count, 1);
    }

    #[test]
    fn paciente_nulo_e_vazio_caem_no_mesmo_grupo() {
        let entries = vec![
            entry_con_paciente(None, None, 100),
            entry_con_paciente(Some(""), Some(""), 200),
        ];
        let s = daily_summary(&entries);
        assert_eq!(s.patient_groups.len(), 1);
        assert_eq!(s.patient_groups[0].total, 300);
    }

    #[test]
    fn dia_vazio_retorna_forma_zerada() {
        let s = daily_summary(&[]);
        assert_eq!(s.day_total, 0);
        assert!(s.patient_groups.is_empty());
        assert_eq!(s.totals_by_payment.len(), 3);
        assert_eq!(s.totals_by_category.len(), 5);
    }
}

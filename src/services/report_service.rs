// src/services/report_service.rs

//! Renderização de relatórios. As seções são montadas uma única vez por
//! relatório (funções puras abaixo) e servem tanto para a resposta JSON
//! quanto para o PDF; a paginação das tabelas de movimentos é feita por
//! `paginate`, que nunca divide uma linha entre páginas.

use genpdf::{elements, style, Alignment, Element};

use crate::{
    common::{
        error::AppError,
        format::{fmt_clp, fmt_pct, month_name_es},
    },
    db::LedgerRepository,
    models::{
        ledger::{Category, Day, Entry, PaymentType},
        reports::{DayReport, MonthReport, ReportRow, ReportSection},
        stats::{DailySummary, MonthSummary},
    },
    services::stats_service::{daily_summary, StatsService},
};

const CLINIC_NAME: &str = "Consulta Veterinaria Tin Tin";

/// Capacidade de linhas de movimento por página do PDF. Derivada do corpo
/// útil de uma A4 com margens e linha de ~14pt.
const MOVEMENT_ROWS_PER_PAGE: usize = 45;

/// Divide linhas em páginas de até `rows_per_page` itens. Com M linhas e
/// capacidade N saem ceil(M/N) páginas; uma linha nunca é dividida.
pub fn paginate<T>(rows: Vec<T>, rows_per_page: usize) -> Vec<Vec<T>> {
    debug_assert!(rows_per_page > 0);
    let mut pages = Vec::new();
    let mut page = Vec::new();
    for row in rows {
        if page.len() == rows_per_page {
            pages.push(std::mem::take(&mut page));
        }
        page.push(row);
    }
    if !page.is_empty() {
        pages.push(page);
    }
    pages
}

fn row(label: impl Into<String>, value: impl Into<String>) -> ReportRow {
    ReportRow {
        label: label.into(),
        value: value.into(),
    }
}

/// Seções do relatório mensal, na ordem fixa: pagamentos, categorias,
/// indicadores, participações.
pub fn month_sections(s: &MonthSummary) -> Vec<ReportSection> {
    let mut pagos: Vec<ReportRow> = PaymentType::ALL
        .iter()
        .map(|p| row(p.label(), fmt_clp(s.totals_by_payment[p])))
        .collect();
    pagos.push(row("TOTAL GENERAL", fmt_clp(s.total_general)));

    let categorias: Vec<ReportRow> = Category::ALL
        .iter()
        .map(|c| row(c.label(), fmt_clp(s.totals_by_category[c])))
        .collect();

    let mut indicadores = vec![
        row("Días con movimiento", s.dias_con_mov.to_string()),
        row("Transacciones", s.tx_count.to_string()),
        row("Promedio diario", fmt_clp(s.promedio_diario)),
        row("Ticket promedio", fmt_clp(s.ticket_promedio)),
    ];
    if let Some(peak_day) = s.peak_day {
        indicadores.push(row(
            "Día pico",
            format!("{} - {}", peak_day.format("%Y-%m-%d"), fmt_clp(s.peak_total)),
        ));
    }

    let mut participacion: Vec<ReportRow> = PaymentType::ALL
        .iter()
        .map(|p| row(p.label(), fmt_pct(s.part_pago[p])))
        .collect();
    participacion.extend(
        Category::ALL
            .iter()
            .map(|c| row(c.label(), fmt_pct(s.part_cat[c]))),
    );

    vec![
        ReportSection {
            title: "Por tipo de pago".to_string(),
            rows: pagos,
        },
        ReportSection {
            title: "Por categoría".to_string(),
            rows: categorias,
        },
        ReportSection {
            title: "Indicadores".to_string(),
            rows: indicadores,
        },
        ReportSection {
            title: "Participación".to_string(),
            rows: participacion,
        },
    ]
}

/// Seções do relatório diário: caixa, pagamentos, categorias.
pub fn day_sections(day: &Day, s: &DailySummary) -> Vec<ReportSection> {
    let caja = vec![
        row("Apertura de caja", fmt_clp(day.apertura_caja)),
        row("Cierre de caja", fmt_clp(day.cierre_caja)),
        row("Total del día", fmt_clp(s.day_total)),
    ];

    let pagos: Vec<ReportRow> = PaymentType::ALL
        .iter()
        .map(|p| row(p.label(), fmt_clp(s.totals_by_payment[p])))
        .collect();

    let categorias: Vec<ReportRow> = Category::ALL
        .iter()
        .map(|c| row(c.label(), fmt_clp(s.totals_by_category[c])))
        .collect();

    vec![
        ReportSection {
            title: "Caja".to_string(),
            rows: caja,
        },
        ReportSection {
            title: "Totales por tipo de pago".to_string(),
            rows: pagos,
        },
        ReportSection {
            title: "Totales por categoría".to_string(),
            rows: categorias,
        },
    ]
}

#[derive(Clone)]
pub struct ReportService {
    repo: LedgerRepository,
    stats: StatsService,
}

impl ReportService {
    pub fn new(repo: LedgerRepository, stats: StatsService) -> Self {
        Self { repo, stats }
    }

    // =========================================================================
    //  VISÕES JSON
    // =========================================================================

    pub async fn month_report(&self, year: i32, month: u32) -> Result<MonthReport, AppError> {
        let summary = self.stats.month_stats(year, month).await?;
        let sections = month_sections(&summary);

        Ok(MonthReport {
            year,
            month,
            month_name: month_name_es(month).to_string(),
            summary,
            sections,
        })
    }

    pub async fn day_report(&self, day_id: i32) -> Result<DayReport, AppError> {
        let day = self
            .repo
            .find_day_by_id(day_id)
            .await?
            .ok_or(AppError::DayNotFound)?;
        let movements = self.repo.list_entries_for_day(day_id).await?;
        let summary = daily_summary(&movements);
        let sections = day_sections(&day, &summary);

        Ok(DayReport {
            day,
            summary,
            sections,
            movements,
        })
    }

    // =========================================================================
    //  PDFs
    // =========================================================================

    /// Resumo mensal em PDF. Retorna (nome do arquivo, bytes).
    pub async fn month_report_pdf(
        &self,
        year: i32,
        month: u32,
    ) -> Result<(String, Vec<u8>), AppError> {
        let report = self.month_report(year, month).await?;

        let title = format!("Resumen mensual - {} {}", report.month_name, report.year);
        let mut doc = new_document(&title)?;

        doc.push(
            elements::Paragraph::new(title.as_str())
                .styled(style::Style::new().bold().with_font_size(14)),
        );
        doc.push(elements::Break::new(1.5));

        for section in &report.sections {
            push_section(&mut doc, section);
        }

        let filename = format!("Resumen_{}_{}.pdf", report.month_name, report.year);
        Ok((filename, render_to_buffer(doc)?))
    }

    /// Resumo do dia em PDF, com a tabela de movimentos paginada.
    pub async fn day_report_pdf(&self, day_id: i32) -> Result<(String, Vec<u8>), AppError> {
        let report = self.day_report(day_id).await?;
        let fecha = report.day.fecha.format("%Y-%m-%d").to_string();

        let title = format!("{} - Resumen del día {}", CLINIC_NAME, fecha);
        let mut doc = new_document(&title)?;

        doc.push(
            elements::Paragraph::new(title.as_str())
                .styled(style::Style::new().bold().with_font_size(14)),
        );
        let doctor = if report.day.doctor.is_empty() {
            "-"
        } else {
            report.day.doctor.as_str()
        };
        doc.push(elements::Paragraph::new(format!("Doctor/a: {}", doctor)));
        doc.push(elements::Break::new(1.5));

        for section in &report.sections {
            push_section(&mut doc, section);
        }

        // A tabela de movimentos começa sempre em página nova.
        if !report.movements.is_empty() {
            doc.push(elements::PageBreak::new());
            doc.push(
                elements::Paragraph::new("Movimientos del día")
                    .styled(style::Style::new().bold().with_font_size(14)),
            );
            doc.push(elements::Break::new(1));

            let pages = paginate(report.movements, MOVEMENT_ROWS_PER_PAGE);
            let last = pages.len().saturating_sub(1);
            for (i, page) in pages.into_iter().enumerate() {
                push_movements_table(&mut doc, &page);
                if i != last {
                    doc.push(elements::PageBreak::new());
                }
            }
        }

        let filename = format!("Resumen_{}.pdf", fecha);
        Ok((filename, render_to_buffer(doc)?))
    }

    /// Conta de um paciente (tutor, mascota) em um dia, em PDF.
    pub async fn patient_pdf(
        &self,
        day_id: i32,
        tutor: &str,
        mascota: &str,
    ) -> Result<(String, Vec<u8>), AppError> {
        let day = self
            .repo
            .find_day_by_id(day_id)
            .await?
            .ok_or(AppError::DayNotFound)?;
        let entries = self
            .repo
            .list_entries_for_patient(day_id, tutor, mascota)
            .await?;
        let total: i64 = entries.iter().map(|e| e.monto).sum();
        let fecha = day.fecha.format("%Y-%m-%d").to_string();

        let title = format!("{} - Cuenta del Paciente", CLINIC_NAME);
        let mut doc = new_document(&title)?;

        doc.push(
            elements::Paragraph::new(title.as_str())
                .styled(style::Style::new().bold().with_font_size(14)),
        );
        doc.push(elements::Paragraph::new(format!("Fecha: {}", fecha)));
        doc.push(elements::Paragraph::new(format!(
            "Tutor/a: {}",
            if tutor.is_empty() { "-" } else { tutor }
        )));
        doc.push(elements::Paragraph::new(format!(
            "Mascota: {}",
            if mascota.is_empty() { "-" } else { mascota }
        )));
        doc.push(elements::Break::new(1.5));

        let pages = paginate(entries, MOVEMENT_ROWS_PER_PAGE);
        let last = pages.len().saturating_sub(1);
        for (i, page) in pages.into_iter().enumerate() {
            push_account_table(&mut doc, &page);
            if i != last {
                doc.push(elements::PageBreak::new());
            }
        }

        doc.push(elements::Break::new(1));
        doc.push(
            elements::Paragraph::new(format!("TOTAL: {}", fmt_clp(total)))
                .aligned(Alignment::Right)
                .styled(style::Style::new().bold().with_font_size(12)),
        );

        let filename = format!("Cuenta_{}.pdf", fecha);
        Ok((filename, render_to_buffer(doc)?))
    }
}

// --- Primitivas genpdf ---

fn new_document(title: &str) -> Result<genpdf::Document, AppError> {
    // Carrega a fonte da pasta 'fonts/'
    let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
        .map_err(|_| AppError::FontNotFound("Fonte não encontrada na pasta ./fonts".to_string()))?;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(title);
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);
    Ok(doc)
}

fn push_section(doc: &mut genpdf::Document, section: &ReportSection) {
    doc.push(
        elements::Paragraph::new(section.title.as_str())
            .styled(style::Style::new().bold().with_font_size(12)),
    );

    let mut table = elements::TableLayout::new(vec![3, 2]);
    for row in &section.rows {
        table
            .row()
            .element(elements::Paragraph::new(row.label.as_str()))
            .element(elements::Paragraph::new(row.value.as_str()).aligned(Alignment::Right))
            .push()
            .expect("Table row error");
    }
    doc.push(table);
    doc.push(elements::Break::new(1));
}

fn push_movements_table(doc: &mut genpdf::Document, entries: &[Entry]) {
    // Pesos das colunas: Hora (1), Categoría (2), Detalle (4), Pago (2), Monto (2)
    let mut table = elements::TableLayout::new(vec![1, 2, 4, 2, 2]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let style_bold = style::Style::new().bold();
    table
        .row()
        .element(elements::Paragraph::new("Hora").styled(style_bold))
        .element(elements::Paragraph::new("Categoría").styled(style_bold))
        .element(elements::Paragraph::new("Detalle").styled(style_bold))
        .element(elements::Paragraph::new("Pago").styled(style_bold))
        .element(elements::Paragraph::new("Monto").styled(style_bold))
        .push()
        .expect("Table error");

    for e in entries {
        let hora = e
            .created_at
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        let detalle: String = e
            .descripcion
            .as_deref()
            .unwrap_or("")
            .chars()
            .take(40)
            .collect();

        table
            .row()
            .element(elements::Paragraph::new(hora))
            .element(elements::Paragraph::new(e.categoria.as_str()))
            .element(elements::Paragraph::new(detalle))
            .element(elements::Paragraph::new(e.tipo_pago.as_str()))
            .element(elements::Paragraph::new(fmt_clp(e.monto)).aligned(Alignment::Right))
            .push()
            .expect("Table row error");
    }

    doc.push(table);
}

fn push_account_table(doc: &mut genpdf::Document, entries: &[Entry]) {
    let mut table = elements::TableLayout::new(vec![6, 2]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let style_bold = style::Style::new().bold();
    table
        .row()
        .element(elements::Paragraph::new("Detalle").styled(style_bold))
        .element(elements::Paragraph::new("Monto").styled(style_bold))
        .push()
        .expect("Table error");

    for e in entries {
        // Sem descrição, mostramos a categoria.
        let detalle: String = e
            .descripcion
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(e.categoria.as_str())
            .chars()
            .take(70)
            .collect();

        table
            .row()
            .element(elements::Paragraph::new(detalle))
            .element(elements::Paragraph::new(fmt_clp(e.monto)).aligned(Alignment::Right))
            .push()
            .expect("Table row error");
    }

    doc.push(table);
}

fn render_to_buffer(doc: genpdf::Document) -> Result<Vec<u8>, AppError> {
    let mut buffer = Vec::new();
    doc.render(&mut buffer)
        .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::stats_service::month_summary;
    use crate::models::ledger::DatedEntry;

    fn dated(fecha: &str, categoria: &str, tipo_pago: &str, monto: i64) -> DatedEntry {
        DatedEntry {
            fecha: fecha.parse().unwrap(),
            categoria: categoria.to_string(),
            tipo_pago: tipo_pago.to_string(),
            monto,
        }
    }

    #[test]
    fn paginacao_respeita_capacidade() {
        let rows: Vec<i32> = (0..100).collect();
        let pages = paginate(rows, 45);
        // ceil(100 / 45) = 3 páginas: 45, 45, 10.
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), 45);
        assert_eq!(pages[1].len(), 45);
        assert_eq!(pages[2].len(), 10);
        // Nenhuma linha se perde nem se duplica.
        let total: usize = pages.iter().map(Vec::len).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn paginacao_multiplo_exato_nao_cria_pagina_vazia() {
        let rows: Vec<i32> = (0..90).collect();
        let pages = paginate(rows, 45);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].len(), 45);
    }

    #[test]
    fn paginacao_vazia() {
        let pages = paginate(Vec::<i32>::new(), 45);
        assert!(pages.is_empty());
    }

    #[test]
    fn secoes_mensais_em_ordem_fixa_e_formatadas() {
        let rows = vec![
            dated("2025-03-10", "ATENCION", "EFECTIVO", 1000),
            dated("2025-03-10", "EXAMEN", "TRANSFERENCIA", 2000),
            dated("2025-03-20", "ATENCION", "EFECTIVO", 3000),
        ];
        let summary = month_summary(2025, 3, &rows).unwrap();
        let sections = month_sections(&summary);

        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Por tipo de pago", "Por categoría", "Indicadores", "Participación"]
        );

        // Pagamentos: 3 métodos + TOTAL GENERAL, mesmos números do motor.
        let pagos = &sections[0].rows;
        assert_eq!(pagos.len(), 4);
        assert_eq!(pagos[1].label, "Efectivo");
        assert_eq!(pagos[1].value, "$ 4.000");
        assert_eq!(pagos[3].label, "TOTAL GENERAL");
        assert_eq!(pagos[3].value, "$ 6.000");

        // Categoria com o rótulo centralizado.
        let cats = &sections[1].rows;
        assert_eq!(cats[2].label, "Farmacia/Petshop");

        // Participações com uma casa decimal.
        let part = &sections[3].rows;
        assert_eq!(part[1].label, "Efectivo");
        assert_eq!(part[1].value, "66.7%");
        assert_eq!(part[2].value, "33.3%");
    }

    #[test]
    fn secoes_mensais_sem_movimento_nao_tem_dia_pico() {
        let summary = month_summary(2025, 1, &[]).unwrap();
        let sections = month_sections(&summary);
        let indicadores = &sections[2].rows;
        assert!(indicadores.iter().all(|r| r.label != "Día pico"));
        assert_eq!(indicadores[0].value, "0");
    }

    #[test]
    fn secoes_diarias_em_ordem_fixa() {
        use crate::models::ledger::{Day, Entry};
        use crate::services::stats_service::daily_summary;

        let day = Day {
            id: 1,
            fecha: "2025-03-10".parse().unwrap(),
            doctor: "Dra. Pérez".to_string(),
            apertura_caja: 10000,
            cierre_caja: 0,
            created_at: None,
        };
        let entries = vec![Entry {
            id: 1,
            day_id: 1,
            categoria: "ATENCION".to_string(),
            descripcion: Some("Consulta".to_string()),
            monto: 12000,
            tipo_pago: "EFECTIVO".to_string(),
            tutor: None,
            mascota: None,
            peso: None,
            especie: None,
            created_at: None,
        }];
        let summary = daily_summary(&entries);
        let sections = day_sections(&day, &summary);

        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Caja", "Totales por tipo de pago", "Totales por categoría"]
        );
        assert_eq!(sections[0].rows[0].value, "$ 10.000");
        assert_eq!(sections[0].rows[2].value, "$ 12.000");
    }
}

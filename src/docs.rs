// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Calendar ---
        handlers::calendar::get_calendar,

        // --- Days ---
        handlers::days::create_day,
        handlers::days::get_day,
        handlers::days::update_day,
        handlers::days::delete_day,
        handlers::days::close_day,
        handlers::days::add_entry,
        handlers::days::delete_entry,

        // --- Reports ---
        handlers::reports::month_report,
        handlers::reports::month_report_pdf,
        handlers::reports::day_report,
        handlers::reports::day_report_pdf,
        handlers::reports::patient_pdf,

        // --- Catalog ---
        handlers::catalog::list_items,
        handlers::catalog::suggest,
        handlers::catalog::create_item,
        handlers::catalog::update_item,
        handlers::catalog::delete_item,
    ),
    components(
        schemas(
            // --- Ledger ---
            models::ledger::Category,
            models::ledger::PaymentType,
            models::ledger::Day,
            models::ledger::Entry,
            models::ledger::DayOverview,
            models::ledger::DayDetail,
            models::ledger::CalendarMonth,
            models::ledger::CreateDayPayload,
            models::ledger::UpdateDayPayload,
            models::ledger::CreateEntryPayload,

            // --- Stats ---
            models::stats::DayTotal,
            models::stats::PatientGroup,
            models::stats::DailySummary,
            models::stats::MonthSummary,

            // --- Reports ---
            models::reports::ReportRow,
            models::reports::ReportSection,
            models::reports::MonthReport,
            models::reports::DayReport,

            // --- Catalog ---
            models::catalog::CatalogItem,
            models::catalog::CatalogItemPayload,

            // --- Auth ---
            models::auth::User,
            models::auth::LoginPayload,
            models::auth::AuthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação"),
        (name = "Calendar", description = "Calendário mensal da caixa"),
        (name = "Days", description = "Registro diário e lançamentos"),
        (name = "Reports", description = "Resumos e PDFs"),
        (name = "Catalog", description = "Catálogo de serviços e preços sugeridos")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

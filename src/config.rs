// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{CatalogRepository, LedgerRepository, UserRepository},
    services::{
        auth::AuthService, catalog_service::CatalogService, ledger_service::LedgerService,
        report_service::ReportService, stats_service::StatsService,
    },
};

// O estado compartilhado, acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub ledger_service: LedgerService,
    pub stats_service: StatsService,
    pub report_service: ReportService,
    pub catalog_service: CatalogService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let ledger_repo = LedgerRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret);
        let stats_service = StatsService::new(ledger_repo.clone());
        let ledger_service = LedgerService::new(ledger_repo.clone(), catalog_repo.clone());
        let report_service = ReportService::new(ledger_repo, stats_service.clone());
        let catalog_service = CatalogService::new(catalog_repo);

        Ok(Self {
            db_pool,
            auth_service,
            ledger_service,
            stats_service,
            report_service,
            catalog_service,
        })
    }
}

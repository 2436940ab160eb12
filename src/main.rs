//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Garante o usuário administrador inicial (idempotente)
    let admin_user = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let admin_pass = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string());
    app_state
        .auth_service
        .seed_admin(&admin_user, &admin_pass)
        .await
        .expect("Falha ao criar o usuário administrador inicial.");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // Rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let calendar_routes = Router::new()
        .route("/", get(handlers::calendar::get_calendar))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let day_routes = Router::new()
        .route("/", post(handlers::days::create_day))
        .route(
            "/{id}",
            get(handlers::days::get_day)
                .put(handlers::days::update_day)
                .delete(handlers::days::delete_day),
        )
        .route("/{id}/close", post(handlers::days::close_day))
        .route("/{id}/entries", post(handlers::days::add_entry))
        .route("/{id}/report", get(handlers::reports::day_report))
        .route("/{id}/report.pdf", get(handlers::reports::day_report_pdf))
        .route("/{id}/patient.pdf", get(handlers::reports::patient_pdf))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let entry_routes = Router::new()
        .route("/{id}", delete(handlers::days::delete_entry))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let report_routes = Router::new()
        .route("/month", get(handlers::reports::month_report))
        .route("/month.pdf", get(handlers::reports::month_report_pdf))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let catalog_routes = Router::new()
        .route(
            "/",
            get(handlers::catalog::list_items).post(handlers::catalog::create_item),
        )
        .route("/suggest", get(handlers::catalog::suggest))
        .route(
            "/{id}",
            axum::routing::put(handlers::catalog::update_item)
                .delete(handlers::catalog::delete_item),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/calendar", calendar_routes)
        .nest("/api/days", day_routes)
        .nest("/api/entries", entry_routes)
        .nest("/api/reports", report_routes)
        .nest("/api/catalog", catalog_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Período inválido: {year}-{month}")]
    InvalidPeriod { year: i32, month: u32 },

    #[error("Dia não encontrado")]
    DayNotFound,

    // Guardamos a data e o id do dia existente para que o cliente
    // possa abrir o registro em edição.
    #[error("Já existe um dia para a data {fecha}")]
    DayAlreadyExists { fecha: NaiveDate, day_id: i32 },

    #[error("Lançamento não encontrado")]
    EntryNotFound,

    #[error("Item do catálogo não encontrado")]
    CatalogItemNotFound,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Uno o más campos son inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            // Conflito de data: devolve o id do dia já existente.
            AppError::DayAlreadyExists { fecha, day_id } => {
                let body = Json(json!({
                    "error": "Ya existe un día con esa fecha.",
                    "fecha": fecha,
                    "dayId": day_id,
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }

            AppError::InvalidPeriod { year, month } => {
                let body = Json(json!({
                    "error": "Período inválido.",
                    "year": year,
                    "month": month,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::DayNotFound => (StatusCode::NOT_FOUND, "Día no encontrado."),
            AppError::EntryNotFound => (StatusCode::NOT_FOUND, "Registro no encontrado."),
            AppError::CatalogItemNotFound => (StatusCode::NOT_FOUND, "Servicio no encontrado."),
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Usuario o contraseña incorrectos.")
            }
            AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "Token de autenticación inválido o ausente.")
            }
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuario no encontrado."),

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` registra a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocurrió un error inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

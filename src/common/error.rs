use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("O nome não pode ser vazio")]
    EmptyName,

    #[error("A quantidade deve ser maior que zero")]
    InvalidQuantity,

    #[error("Material não encontrado")]
    MaterialNotFound,

    #[error("Categoria não encontrada")]
    CategoryNotFound,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Estoque insuficiente")]
    InsufficientStock,

    #[error("A categoria ainda possui materiais")]
    CategoryNotEmpty,

    #[error("Nome de usuário já existe")]
    UsernameAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    // Variante para erros de banco de dados (sqlx)
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
            // Retorna todos os detalhes da validação, campo por campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmptyName => (StatusCode::BAD_REQUEST, "O nome não pode ser vazio."),
            AppError::InvalidQuantity => (StatusCode::BAD_REQUEST, "A quantidade deve ser maior que zero."),
            AppError::MaterialNotFound => (StatusCode::NOT_FOUND, "Material não encontrado."),
            AppError::CategoryNotFound => (StatusCode::NOT_FOUND, "Categoria não encontrada."),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuário não encontrado."),
            AppError::InsufficientStock => (StatusCode::CONFLICT, "Estoque insuficiente para a saída."),
            AppError::CategoryNotEmpty => {
                (StatusCode::CONFLICT, "A categoria possui materiais. Exclusão não permitida.")
            }
            AppError::UsernameAlreadyExists => (StatusCode::CONFLICT, "Este nome de usuário já está em uso."),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Usuário ou senha inválidos."),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Token de autenticação inválido ou ausente."),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente recebe algo genérico.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapeia_erros_de_negocio_para_os_status_corretos() {
        assert_eq!(
            AppError::MaterialNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InsufficientStock.into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::CategoryNotEmpty.into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::InvalidQuantity.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidToken.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}

// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // --- Validação do formulário (recuperáveis, viram mensagem para o usuário) ---
    #[error("Todos os campos são obrigatórios")]
    MissingFields,

    #[error("A quantidade deve ser um número positivo")]
    InvalidQuantity,

    #[error("Tipo de objeto inválido")]
    InvalidItemType,

    // --- Regras de negócio ---
    #[error("Objeto {0} não encontrado")]
    ItemNotFound(i64),

    #[error("Quantidade insuficiente para o objeto {0}")]
    InsufficientQuantity(i64),

    // --- Falhas de backend (não recuperáveis, viram 500) ---
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro de migração: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro ao montar a página: {0}")]
    RenderError(#[from] std::fmt::Error),
}

impl AppError {
    /// Erros esperados são tratados no handler (mensagem + redirect).
    /// Os demais terminam a requisição com 500.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            AppError::DatabaseError(_)
                | AppError::MigrationError(_)
                | AppError::InternalServerError(_)
                | AppError::RenderError(_)
        )
    }
}

// Os handlers convertem os erros recuperáveis em mensagem + redirect antes
// do `?`. Se algum escapar, vira 400 com o texto do erro.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_recoverable() {
            return (StatusCode::BAD_REQUEST, self.to_string()).into_response();
        }

        tracing::error!("Erro Interno do Servidor: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>500</h1><p>Internal server error.</p>"),
        )
            .into_response()
    }
}

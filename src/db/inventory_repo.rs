// src/db/inventory_repo.rs

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    models::inventory::{InventoryItem, InventoryRow, ItemInput, ItemType},
};

/// Superfície de acesso a dados do inventário.
///
/// Existe uma implementação por backend (Postgres e SQLite); a escolha é feita
/// pela configuração em `common::db_utils::connect_store`. Cada método usa uma
/// conexão da pool apenas durante o comando e a devolve ao terminar, inclusive
/// em caso de erro.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Todos os objetos com o nome do tipo (LEFT JOIN: tipo ausente vira `None`).
    async fn list_inventory(&self) -> Result<Vec<InventoryRow>, AppError>;

    async fn list_types(&self) -> Result<Vec<ItemType>, AppError>;

    async fn get_item(&self, id: i64) -> Result<Option<InventoryItem>, AppError>;

    /// Insere e devolve o id atribuído pelo banco.
    async fn insert_item(&self, input: &ItemInput) -> Result<i64, AppError>;

    /// Sobrescreve nome, tipo e quantidade. `ItemNotFound` se o id não existe.
    async fn update_item(&self, id: i64, input: &ItemInput) -> Result<(), AppError>;

    /// Remove o objeto. Devolve `false` se ele já não existia (não é erro).
    async fn delete_item(&self, id: i64) -> Result<bool, AppError>;

    /// Consome uma unidade e devolve a nova quantidade.
    ///
    /// `ItemNotFound` se o id não existe, `InsufficientQuantity` se o estoque é zero.
    async fn decrement_quantity(&self, id: i64) -> Result<i64, AppError>;
}

/// Depois de um `UPDATE ... WHERE quantity > 0` que não alterou nada,
/// decide qual dos dois erros devolver.
pub(crate) fn explain_failed_decrement(id: i64, existing: Option<InventoryItem>) -> AppError {
    match existing {
        Some(_) => AppError::InsufficientQuantity(id),
        None => AppError::ItemNotFound(id),
    }
}

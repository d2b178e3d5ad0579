// src/db/sqlite_repo.rs

use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::{path::Path, time::Duration};

use crate::{
    common::error::AppError,
    db::inventory_repo::{explain_failed_decrement, InventoryStore},
    models::inventory::{InventoryItem, InventoryRow, ItemInput, ItemType},
};

// Backend embarcado (arquivo). A verificação da FK é opcional: o SQLite só a
// aplica com `PRAGMA foreign_keys = ON`, e aqui isso vem da configuração.
#[derive(Clone)]
pub struct SqliteInventoryRepository {
    pool: SqlitePool,
}

impl SqliteInventoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Abre (ou cria) o arquivo e aplica as migrações de `migrations/sqlite`.
    pub async fn connect(
        path: &Path,
        max_connections: u32,
        enforce_foreign_keys: bool,
    ) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(enforce_foreign_keys);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        tracing::info!(
            path = %path.display(),
            enforce_foreign_keys,
            "✅ Banco SQLite aberto com sucesso!"
        );

        Self::migrated(pool).await
    }

    /// Banco em memória com uma única conexão (cada conexão nova seria um banco vazio).
    #[cfg(test)]
    pub async fn in_memory(enforce_foreign_keys: bool) -> Result<Self, AppError> {
        let options = "sqlite::memory:".parse::<SqliteConnectOptions>()?
            .foreign_keys(enforce_foreign_keys);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;

        Self::migrated(pool).await
    }

    async fn migrated(pool: SqlitePool) -> Result<Self, AppError> {
        sqlx::migrate!("./migrations/sqlite").run(&pool).await?;
        tracing::info!("✅ Migrações do SQLite executadas com sucesso!");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl InventoryStore for SqliteInventoryRepository {
    async fn list_inventory(&self) -> Result<Vec<InventoryRow>, AppError> {
        let rows = sqlx::query_as::<_, InventoryRow>(
            r#"
            SELECT inventory.id AS item_id,
                   inventory.name AS item_name,
                   item_types.type_name AS item_type,
                   inventory.quantity AS item_quantity
            FROM inventory
            LEFT JOIN item_types ON inventory.type_id = item_types.id
            ORDER BY inventory.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_types(&self) -> Result<Vec<ItemType>, AppError> {
        let types = sqlx::query_as::<_, ItemType>(
            "SELECT id, type_name FROM item_types ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(types)
    }

    async fn get_item(&self, id: i64) -> Result<Option<InventoryItem>, AppError> {
        let item = sqlx::query_as::<_, InventoryItem>(
            "SELECT id, name, type_id, quantity FROM inventory WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    async fn insert_item(&self, input: &ItemInput) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO inventory (name, type_id, quantity) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&input.name)
        .bind(input.type_id)
        .bind(input.quantity)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update_item(&self, id: i64, input: &ItemInput) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE inventory SET name = ?, type_id = ?, quantity = ? WHERE id = ?",
        )
        .bind(&input.name)
        .bind(input.type_id)
        .bind(input.quantity)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ItemNotFound(id));
        }
        Ok(())
    }

    async fn delete_item(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM inventory WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn decrement_quantity(&self, id: i64) -> Result<i64, AppError> {
        let remaining = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE inventory
            SET quantity = quantity - 1
            WHERE id = ? AND quantity > 0
            RETURNING quantity
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match remaining {
            Some(quantity) => Ok(quantity),
            None => Err(explain_failed_decrement(id, self.get_item(id).await?)),
        }
    }
}

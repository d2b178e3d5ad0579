// src/db/pg_repo.rs

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::{
    common::error::AppError,
    db::inventory_repo::{explain_failed_decrement, InventoryStore},
    models::inventory::{InventoryItem, InventoryRow, ItemInput, ItemType},
};

// Backend de rede: a FK de inventory.type_id é sempre verificada pelo Postgres.
#[derive(Clone)]
pub struct PgInventoryRepository {
    pool: PgPool,
}

impl PgInventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Abre a pool e aplica as migrações de `migrations/postgres`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await?;

        tracing::info!("✅ Conexão com o Postgres estabelecida com sucesso!");

        sqlx::migrate!("./migrations/postgres").run(&pool).await?;

        tracing::info!("✅ Migrações do Postgres executadas com sucesso!");

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl InventoryStore for PgInventoryRepository {
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
            "SELECT id, name, type_id, quantity FROM inventory WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    async fn insert_item(&self, input: &ItemInput) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO inventory (name, type_id, quantity) VALUES ($1, $2, $3) RETURNING id",
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
            "UPDATE inventory SET name = $1, type_id = $2, quantity = $3 WHERE id = $4",
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
        let result = sqlx::query("DELETE FROM inventory WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn decrement_quantity(&self, id: i64) -> Result<i64, AppError> {
        // Um único UPDATE condicional: duas requisições simultâneas não
        // conseguem consumir a mesma última unidade.
        let remaining = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE inventory
            SET quantity = quantity - 1
            WHERE id = $1 AND quantity > 0
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

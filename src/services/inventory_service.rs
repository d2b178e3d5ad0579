// src/services/inventory_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::InventoryStore,
    models::inventory::{InventoryItem, InventoryRow, ItemInput, ItemType},
};

#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn InventoryStore>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    // --- LEITURAS ---

    pub async fn list_inventory(&self) -> Result<Vec<InventoryRow>, AppError> {
        self.store.list_inventory().await
    }

    pub async fn list_types(&self) -> Result<Vec<ItemType>, AppError> {
        self.store.list_types().await
    }

    /// Ausência vira `ItemNotFound`.
    pub async fn get_item(&self, id: i64) -> Result<InventoryItem, AppError> {
        self.store
            .get_item(id)
            .await?
            .ok_or(AppError::ItemNotFound(id))
    }

    // --- ESCRITAS ---

    pub async fn add_item(&self, input: &ItemInput) -> Result<i64, AppError> {
        let id = self.store.insert_item(input).await?;
        tracing::info!(item_id = id, name = %input.name, quantity = input.quantity, "Objeto adicionado");
        Ok(id)
    }

    pub async fn update_item(&self, id: i64, input: &ItemInput) -> Result<(), AppError> {
        self.store.update_item(id, input).await?;
        tracing::info!(item_id = id, name = %input.name, quantity = input.quantity, "Objeto modificado");
        Ok(())
    }

    /// Remove o objeto; um id inexistente não é erro.
    pub async fn delete_item(&self, id: i64) -> Result<(), AppError> {
        let removed = self.store.delete_item(id).await?;
        if removed {
            tracing::info!(item_id = id, "Objeto removido");
        } else {
            tracing::debug!(item_id = id, "Remoção de objeto inexistente ignorada");
        }
        Ok(())
    }

    // --- CONSUMO (baixa de uma unidade) ---
    pub async fn consume_item(&self, id: i64) -> Result<i64, AppError> {
        match self.store.decrement_quantity(id).await {
            Ok(remaining) => {
                tracing::info!(item_id = id, remaining, "Objeto consumido");
                Ok(remaining)
            }
            Err(e) if e.is_recoverable() => {
                tracing::warn!(item_id = id, "Consumo recusado: {}", e);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}

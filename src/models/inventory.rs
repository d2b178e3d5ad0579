// src/models/inventory.rs

use serde::Deserialize;
use sqlx::FromRow;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::common::error::AppError;

// --- 1. Tipos de objeto (seed, somente leitura) ---
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ItemType {
    pub id: i64,
    pub type_name: String,
}

// --- 2. Objeto do inventário ---
// No SQLite o type_id pode ser nulo; no Postgres é obrigatório.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    pub type_id: Option<i64>,
    pub quantity: i64,
}

// --- 3. Linha da listagem (inventory LEFT JOIN item_types) ---
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct InventoryRow {
    pub item_id: i64,
    pub item_name: String,
    /// `None` quando o tipo referenciado não existe (ou é nulo).
    pub item_type: Option<String>,
    pub item_quantity: i64,
}

// --- 4. Entrada já validada (vinda do formulário) ---
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemInput {
    pub name: String,
    pub type_id: i64,
    pub quantity: i64,
}

// --- 5. Formulário cru (tudo string, como chega do navegador) ---
// Campo ausente no corpo vira string vazia e cai na regra de obrigatoriedade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct ItemForm {
    #[serde(default)]
    #[validate(length(min = 1, code = "required"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, code = "required"), custom(function = "validate_type_id"))]
    pub type_id: String,

    #[serde(default)]
    #[validate(length(min = 1, code = "required"), custom(function = "validate_quantity"))]
    pub quantity: String,
}

// Só dígitos ASCII: recusa sinal, espaços e casas decimais
pub(crate) fn non_negative_integer(value: &str) -> Option<i64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<i64>().ok()
}

#[allow(clippy::ptr_arg)]
fn validate_quantity(value: &String) -> Result<(), ValidationError> {
    match non_negative_integer(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("quantity")),
    }
}

#[allow(clippy::ptr_arg)]
fn validate_type_id(value: &String) -> Result<(), ValidationError> {
    match non_negative_integer(value) {
        Some(id) if id >= 1 => Ok(()),
        _ => Err(ValidationError::new("type_id")),
    }
}

impl ItemForm {
    /// Valida e converte. As regras têm prioridade: obrigatoriedade,
    /// depois quantidade, depois tipo.
    pub fn parse(&self) -> Result<ItemInput, AppError> {
        self.validate().map_err(|errors| rejection(&errors))?;

        Ok(ItemInput {
            name: self.name.clone(),
            type_id: non_negative_integer(&self.type_id).ok_or(AppError::InvalidItemType)?,
            quantity: non_negative_integer(&self.quantity).ok_or(AppError::InvalidQuantity)?,
        })
    }
}

impl From<&InventoryItem> for ItemForm {
    fn from(item: &InventoryItem) -> Self {
        Self {
            name: item.name.clone(),
            type_id: item.type_id.map(|id| id.to_string()).unwrap_or_default(),
            quantity: item.quantity.to_string(),
        }
    }
}

fn rejection(errors: &ValidationErrors) -> AppError {
    let fields = errors.field_errors();
    let missing = fields
        .values()
        .flat_map(|errs| errs.iter())
        .any(|e| e.code == "required");

    if missing {
        AppError::MissingFields
    } else if fields.contains_key("quantity") {
        AppError::InvalidQuantity
    } else {
        AppError::InvalidItemType
    }
}

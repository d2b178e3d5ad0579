// src/middleware/flash.rs
//
// Mensagens de feedback de uso único: gravadas num cookie assinado antes do
// redirect e apagadas pela próxima página renderizada.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};

use crate::{common::error::AppError, middleware::i18n::Locale};

pub const FLASH_COOKIE: &str = "inventory_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Success,
    Danger,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Success => "success",
            Category::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    ItemAdded,
    ItemUpdated,
    ItemDeleted,
    ItemConsumed,
    ItemNotFound,
    InsufficientQuantity,
    MissingFields,
    InvalidQuantity,
    InvalidItemType,
}

const ALL_NOTICES: [Notice; 9] = [
    Notice::ItemAdded,
    Notice::ItemUpdated,
    Notice::ItemDeleted,
    Notice::ItemConsumed,
    Notice::ItemNotFound,
    Notice::InsufficientQuantity,
    Notice::MissingFields,
    Notice::InvalidQuantity,
    Notice::InvalidItemType,
];

impl Notice {
    /// Valor gravado no cookie.
    pub fn code(self) -> &'static str {
        match self {
            Notice::ItemAdded => "item_added",
            Notice::ItemUpdated => "item_updated",
            Notice::ItemDeleted => "item_deleted",
            Notice::ItemConsumed => "item_consumed",
            Notice::ItemNotFound => "item_not_found",
            Notice::InsufficientQuantity => "insufficient_quantity",
            Notice::MissingFields => "missing_fields",
            Notice::InvalidQuantity => "invalid_quantity",
            Notice::InvalidItemType => "invalid_item_type",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        ALL_NOTICES.into_iter().find(|n| n.code() == code)
    }

    pub fn category(self) -> Category {
        match self {
            Notice::ItemAdded | Notice::ItemUpdated | Notice::ItemDeleted | Notice::ItemConsumed => {
                Category::Success
            }
            _ => Category::Danger,
        }
    }

    pub fn text(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Notice::ItemAdded, Locale::En) => "Item added successfully!",
            (Notice::ItemAdded, Locale::Fr) => "Objet ajouté avec succès!",
            (Notice::ItemUpdated, Locale::En) => "Item updated successfully!",
            (Notice::ItemUpdated, Locale::Fr) => "Objet modifié avec succès!",
            (Notice::ItemDeleted, Locale::En) => "Item deleted successfully!",
            (Notice::ItemDeleted, Locale::Fr) => "Objet supprimé avec succès!",
            (Notice::ItemConsumed, Locale::En) => "Item consumed successfully!",
            (Notice::ItemConsumed, Locale::Fr) => "Objet consommé avec succès!",
            (Notice::ItemNotFound, Locale::En) => "Item not found!",
            (Notice::ItemNotFound, Locale::Fr) => "Objet introuvable !",
            (Notice::InsufficientQuantity, Locale::En) => "Insufficient quantity!",
            (Notice::InsufficientQuantity, Locale::Fr) => "Quantité insuffisante !",
            (Notice::MissingFields, Locale::En) => "All fields are required!",
            (Notice::MissingFields, Locale::Fr) => "Tous les champs sont obligatoires!",
            (Notice::InvalidQuantity, Locale::En) => "Quantity must be a positive number!",
            (Notice::InvalidQuantity, Locale::Fr) => "La quantité doit être un nombre positif!",
            (Notice::InvalidItemType, Locale::En) => "Invalid item type!",
            (Notice::InvalidItemType, Locale::Fr) => "Type d'objet invalide!",
        }
    }

    /// Mensagem para um erro esperado; `None` para falhas de backend.
    pub fn for_error(err: &AppError) -> Option<Self> {
        match err {
            AppError::MissingFields => Some(Notice::MissingFields),
            AppError::InvalidQuantity => Some(Notice::InvalidQuantity),
            AppError::InvalidItemType => Some(Notice::InvalidItemType),
            AppError::ItemNotFound(_) => Some(Notice::ItemNotFound),
            AppError::InsufficientQuantity(_) => Some(Notice::InsufficientQuantity),
            _ => None,
        }
    }
}

/// Grava a mensagem para a próxima página.
pub fn push(jar: SignedCookieJar, notice: Notice) -> SignedCookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, notice.code()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Lê e apaga a mensagem pendente (cookie adulterado é ignorado).
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Option<Notice>) {
    match jar.get(FLASH_COOKIE) {
        Some(cookie) => {
            let notice = Notice::from_code(cookie.value());
            (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), notice)
        }
        None => (jar, None),
    }
}

/// Grava a mensagem e redireciona (303).
pub fn redirect_with(jar: SignedCookieJar, notice: Notice, to: &str) -> Response {
    (push(jar, notice), Redirect::to(to)).into_response()
}

// src/middleware/item_id.rs

use axum::{
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
};

use crate::models::inventory::non_negative_integer;

// Id do objeto na rota (/edit/{id}, /delete/{id}, /consume/{id}).
// Só dígitos: "abc", "-1" ou um número que não cabe em i64 dão 404,
// como uma rota que não existe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemId(pub i64);

impl ItemId {
    pub fn parse(segment: &str) -> Option<Self> {
        non_negative_integer(segment).map(ItemId)
    }
}

impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::NOT_FOUND)?;

        ItemId::parse(&segment).ok_or(StatusCode::NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_digits() {
        assert_eq!(ItemId::parse("0"), Some(ItemId(0)));
        assert_eq!(ItemId::parse("42"), Some(ItemId(42)));
        assert_eq!(ItemId::parse("007"), Some(ItemId(7)));
    }

    #[test]
    fn rejects_anything_else() {
        for bad in ["", "abc", "-1", "+1", "1.0", " 1", "99999999999999999999"] {
            assert_eq!(ItemId::parse(bad), None, "segment {bad:?} should be rejected");
        }
    }
}

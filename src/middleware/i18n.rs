// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

// Nosso extrator de idioma: inglês por padrão, francês quando pedido
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    /// Primeiro idioma suportado da lista do Accept-Language (na ordem de preferência).
    pub fn from_accept_language(header_str: &str) -> Self {
        accept_language::parse(header_str)
            .iter()
            .find_map(|tag_string| {
                // "fr-CA" -> split vira ["fr", "CA"] -> next() pega "fr"
                let primary = tag_string.split('-').next().unwrap_or(tag_string);
                match primary.to_ascii_lowercase().as_str() {
                    "en" => Some(Locale::En),
                    "fr" => Some(Locale::Fr),
                    _ => None,
                }
            })
            .unwrap_or_default()
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
        }
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let locale = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .map(Locale::from_accept_language)
            .unwrap_or_default();

        Ok(locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_first_supported_language() {
        assert_eq!(Locale::from_accept_language("fr-FR,fr;q=0.9,en;q=0.8"), Locale::Fr);
        assert_eq!(Locale::from_accept_language("de-DE,fr;q=0.5"), Locale::Fr);
        assert_eq!(Locale::from_accept_language("en-US,fr;q=0.5"), Locale::En);
    }

    #[test]
    fn falls_back_to_english() {
        assert_eq!(Locale::from_accept_language("pt-BR"), Locale::En);
        assert_eq!(Locale::from_accept_language(""), Locale::En);
    }
}

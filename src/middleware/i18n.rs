// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};

const DEFAULT_LANG: &str = "id";

// Idioma das mensagens ao usuário, vindo do Accept-Language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Default for Locale {
    fn default() -> Self {
        Locale(DEFAULT_LANG.to_string())
    }
}

impl Locale {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header_str| {
                accept_language::parse(header_str)
                    .first()
                    // "en-US" -> "en"
                    .map(|tag| tag.split('-').next().unwrap_or(tag).to_lowercase())
            })
            .map(Locale)
            .unwrap_or_default()
    }

    // Só há dois catálogos: inglês e o padrão indonésio
    pub fn is_english(&self) -> bool {
        self.0 == "en"
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Locale::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn picks_the_preferred_language() {
        assert_eq!(Locale::from_headers(&headers("en-US,en;q=0.9,id;q=0.8")).0, "en");
        assert!(Locale::from_headers(&headers("en-GB")).is_english());
    }

    #[test]
    fn defaults_to_indonesian() {
        assert_eq!(Locale::from_headers(&HeaderMap::new()), Locale("id".into()));
        assert!(!Locale::from_headers(&headers("pt-BR")).is_english());
    }
}

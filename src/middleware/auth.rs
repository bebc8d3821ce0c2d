// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::auth::Session,
};

// Valida o Bearer token e deixa a sessão nas extensions da requisição
pub async fn auth_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(TypedHeader(authorization)) = bearer else {
        return Err(AppError::InvalidToken.to_api_error(&locale));
    };

    let session = app_state
        .auth_service
        .validate_token(authorization.token())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

// Extrator da sessão autenticada para os handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Session);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or_else(|| AppError::InvalidToken.to_api_error(&Locale::from_headers(&parts.headers)))
    }
}

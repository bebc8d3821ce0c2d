// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::{ApiError, AppError},
    middleware::i18n::Locale,
    models::auth::{Role, Session},
};

/// 1. O Trait que define um papel exigido por uma rota
pub trait RoleDef: Send + Sync + 'static {
    fn role() -> Role;
}

/// 2. O Extractor (Guardião). Depende do `auth_guard` ter rodado antes.
pub struct RequireRole<T>(pub PhantomData<T>);

pub fn ensure_role(session: Option<&Session>, required: Role) -> Result<(), AppError> {
    let session = session.ok_or(AppError::InvalidToken)?;
    if session.role != required {
        return Err(AppError::Forbidden {
            required: required.as_str(),
        });
    }
    Ok(())
}

// 3. Implementação do FromRequestParts
impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        ensure_role(parts.extensions.get::<Session>(), T::role())
            .map_err(|e| e.to_api_error(&Locale::from_headers(&parts.headers)))?;

        Ok(RequireRole(PhantomData))
    }
}

// ---
// PAPÉIS (TIPOS)
// ---

pub struct AdminRole;
impl RoleDef for AdminRole {
    fn role() -> Role { Role::Admin }
}

pub struct CashierRole;
impl RoleDef for CashierRole {
    fn role() -> Role { Role::Cashier }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use uuid::Uuid;

    fn parts_with(session: Option<Session>) -> Parts {
        let (mut parts, _) = Request::builder()
            .uri("/api/dashboard")
            .header("accept-language", "en")
            .body(())
            .unwrap()
            .into_parts();
        if let Some(session) = session {
            parts.extensions.insert(session);
        }
        parts
    }

    fn session(role: Role) -> Session {
        Session {
            username: "kasir1".into(),
            role,
            session_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn cashier_is_kept_out_of_admin_routes() {
        let mut parts = parts_with(Some(session(Role::Cashier)));
        let rejection = RequireRole::<AdminRole>::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();

        assert_eq!(rejection.status, StatusCode::FORBIDDEN);
        assert_eq!(rejection.error, "This page requires the 'admin' role.");
    }

    #[tokio::test]
    async fn matching_role_passes() {
        let mut parts = parts_with(Some(session(Role::Cashier)));
        assert!(
            RequireRole::<CashierRole>::from_request_parts(&mut parts, &())
                .await
                .is_ok()
        );
    }

    #[test]
    fn missing_session_is_unauthorized() {
        let err = ensure_role(None, Role::Admin).unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }
}

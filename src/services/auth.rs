// src/services/auth.rs

use std::{collections::HashSet, sync::Arc};

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{AuthResponse, Claims, Role, Session},
    store::UserRepository,
};

/// Sessões encerradas por logout. Criado uma vez na inicialização e
/// compartilhado por clones do `AppState`.
#[derive(Clone, Default)]
pub struct SessionStore {
    revoked: Arc<RwLock<HashSet<Uuid>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn revoke(&self, session_id: Uuid) {
        self.revoked.write().await.insert(session_id);
    }

    pub async fn is_revoked(&self, session_id: Uuid) -> bool {
        self.revoked.read().await.contains(&session_id)
    }
}

#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    sessions: SessionStore,
    jwt_secret: String,
    session_ttl: chrono::Duration,
}

impl AuthService {
    pub fn new(
        users: UserRepository,
        sessions: SessionStore,
        jwt_secret: String,
        session_ttl: chrono::Duration,
    ) -> Self {
        Self {
            users,
            sessions,
            jwt_secret,
            session_ttl,
        }
    }

    /// Login pela tela de `expected`. Sem papel na resposta do store, vale o
    /// papel da tela usada; papel diferente do esperado é recusado.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        expected: Role,
    ) -> Result<AuthResponse, AppError> {
        // 1. Credenciais conferidas pelo record store
        let reply = self.users.login(username, password).await?;

        if reply.access_token.as_deref().is_none_or(str::is_empty) {
            return Err(match reply.message {
                Some(message) if !message.trim().is_empty() => AppError::LoginRejected(message),
                _ => AppError::InvalidCredentials,
            });
        }

        // 2. Papel
        let role = reply
            .user
            .and_then(|user| user.role)
            .and_then(|raw| Role::normalize(&raw))
            .unwrap_or(expected);

        if role != expected {
            tracing::warn!(
                "Login de '{}' recusado: papel '{}' na tela de '{}'",
                username,
                role.as_str(),
                expected.as_str()
            );
            return Err(AppError::Forbidden {
                required: expected.as_str(),
            });
        }

        // 3. Token próprio do painel
        let token = self.create_token(username, role)?;
        tracing::info!("Sessão aberta para '{}' ({})", username, role.as_str());

        Ok(AuthResponse { token, role })
    }

    pub async fn validate_token(&self, token: &str) -> Result<Session, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        if self.sessions.is_revoked(token_data.claims.sid).await {
            return Err(AppError::InvalidToken);
        }

        Ok(Session::from(token_data.claims))
    }

    pub async fn logout(&self, session: &Session) {
        self.sessions.revoke(session.session_id).await;
        tracing::info!("Sessão de '{}' encerrada", session.username);
    }

    fn create_token(&self, username: &str, role: Role) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + self.session_ttl;

        let claims = Claims {
            sub: username.to_string(),
            role,
            sid: Uuid::new_v4(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{store::RecordStore, test_utils::InMemoryStore};

    fn service(store: InMemoryStore) -> AuthService {
        let store: Arc<dyn RecordStore> = store.shared();
        AuthService::new(
            UserRepository::new(store),
            SessionStore::new(),
            "segredo-de-teste".into(),
            chrono::Duration::hours(1),
        )
    }

    #[tokio::test]
    async fn cashier_login_accepts_kasir_role() {
        let auth = service(InMemoryStore::new().with_login("kasir1", "rahasia", Some("Kasir")));

        let response = auth.login("kasir1", "rahasia", Role::Cashier).await.unwrap();
        assert_eq!(response.role, Role::Cashier);

        let session = auth.validate_token(&response.token).await.unwrap();
        assert_eq!(session.username, "kasir1");
        assert_eq!(session.role, Role::Cashier);
    }

    #[tokio::test]
    async fn missing_role_falls_back_to_the_login_screen() {
        let auth = service(InMemoryStore::new().with_login("boss", "rahasia", None));
        let response = auth.login("boss", "rahasia", Role::Admin).await.unwrap();
        assert_eq!(response.role, Role::Admin);
    }

    #[tokio::test]
    async fn cashier_cannot_use_the_admin_screen() {
        let auth = service(InMemoryStore::new().with_login("kasir1", "rahasia", Some("kasir")));
        let err = auth.login("kasir1", "rahasia", Role::Admin).await.err().unwrap();
        assert!(matches!(err, AppError::Forbidden { required: "admin" }));
    }

    #[tokio::test]
    async fn wrong_password_keeps_the_store_message() {
        let auth = service(InMemoryStore::new().with_login("kasir1", "rahasia", Some("kasir")));
        let err = auth.login("kasir1", "salah", Role::Cashier).await.err().unwrap();
        assert!(matches!(err, AppError::LoginRejected(ref m) if m == "Username atau password salah"));
    }

    #[tokio::test]
    async fn revoked_session_is_rejected() {
        let auth = service(InMemoryStore::new().with_login("admin", "rahasia", Some("admin")));
        let response = auth.login("admin", "rahasia", Role::Admin).await.unwrap();
        let session = auth.validate_token(&response.token).await.unwrap();

        auth.logout(&session).await;
        let err = auth.validate_token(&response.token).await.err().unwrap();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let auth = service(InMemoryStore::new());
        assert!(matches!(
            auth.validate_token("nao.e.um.jwt").await,
            Err(AppError::InvalidToken)
        ));
    }
}

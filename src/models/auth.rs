// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Papéis reconhecidos pelo painel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Cashier,
}

impl Role {
    /// "admin" -> Admin, "cashier" / "kasir" -> Cashier (sem diferenciar maiúsculas).
    pub fn normalize(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "cashier" | "kasir" => Some(Role::Cashier),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Cashier => "cashier",
        }
    }
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "Username wajib diisi."))]
    pub username: String,
    #[validate(length(min = 1, message = "Password wajib diisi."))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub role: Role,
}

// Resposta do POST /login do record store
#[derive(Debug, Default, Deserialize)]
pub struct StoreLoginReply {
    #[serde(rename = "accessToken")]
    pub access_token: Option<String>,
    pub user: Option<StoreLoginUser>,
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StoreLoginUser {
    pub role: Option<String>,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // Subject (username)
    pub role: Role,
    pub sid: Uuid,    // Session id, revogado no logout
    pub exp: usize,
    pub iat: usize,
}

/// Sessão autenticada, passada explicitamente aos handlers.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    pub role: Role,
    pub session_id: Uuid,
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.sub,
            role: claims.role,
            session_id: claims.sid,
        }
    }
}

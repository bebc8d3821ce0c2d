// src/models/account.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::{
    common::lenient::{i64_or_zero, non_empty_string, string_or_empty},
    models::auth::Role,
};

// Registro cru de /users. A senha nunca é lida de volta.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Account {
    #[serde(rename = "user_id", default, deserialize_with = "i64_or_zero")]
    pub id: i64,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub username: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub telp: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub role: String,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub image: Option<String>,
}

fn validate_role(role: &str) -> Result<(), ValidationError> {
    if Role::normalize(role).is_none() {
        let mut err = ValidationError::new("role");
        err.message = Some("Peran harus 'admin' atau 'kasir'.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: formulário de conta (criar / editar)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountPayload {
    #[validate(email(message = "Email tidak valid."))]
    pub email: String,

    // Na edição a senha pode ser omitida
    #[validate(length(min = 6, message = "Password minimal 6 karakter."))]
    pub password: Option<String>,

    #[validate(length(min = 1, message = "Username wajib diisi."))]
    pub username: String,

    #[serde(default)]
    pub telp: String,

    #[validate(custom(function = "validate_role"))]
    pub role: String,

    #[serde(default)]
    pub image: Option<String>,
}

// Corpo de POST/PUT /users
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountRecord {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub username: String,
    pub telp: String,
    pub role: String,
    pub image: String,
}

impl From<AccountPayload> for AccountRecord {
    fn from(payload: AccountPayload) -> Self {
        Self {
            email: payload.email.trim().to_string(),
            password: payload.password,
            username: payload.username.trim().to_string(),
            telp: payload.telp,
            role: payload.role.trim().to_lowercase(),
            image: payload.image.unwrap_or_default(),
        }
    }
}

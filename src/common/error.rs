// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{middleware::i18n::Locale, store::Resource};

// Erro interno da aplicação. Cada variante vira uma resposta HTTP em `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    // Falha de transporte ou de parse ao buscar no record store
    #[error("Falha ao buscar {resource}: {reason}")]
    FetchFailed { resource: Resource, reason: String },

    // Um "get by id" que não devolveu registro nenhum
    #[error("Nenhum registro em {resource} para o id {id}")]
    EmptyResult { resource: Resource, id: i64 },

    #[error("Login recusado pelo record store: {0}")]
    LoginRejected(String),

    // O store aceitou o login mas não devolveu token
    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado: requer o papel '{required}'")]
    Forbidden { required: &'static str },

    #[error("Transição inválida do pedido {order_id}: '{from}' -> '{to}'")]
    InvalidTransition {
        order_id: i64,
        from: String,
        to: &'static str,
    },

    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

// Erro já traduzido, pronto para virar resposta
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<serde_json::Value>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::FetchFailed { .. } => StatusCode::BAD_GATEWAY,
            AppError::EmptyResult { .. } => StatusCode::NOT_FOUND,
            AppError::LoginRejected(_) | AppError::InvalidCredentials | AppError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::InvalidTransition { .. } => StatusCode::CONFLICT,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::JwtError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Mensagem legível para o usuário, no idioma pedido (id por padrão, en opcional).
    pub fn localized(&self, locale: &Locale) -> String {
        let en = locale.is_english();
        match self {
            AppError::FetchFailed { resource, .. } => {
                if en {
                    format!("Failed to load {}.", resource.noun(locale))
                } else {
                    format!("Gagal memuat {}.", resource.noun(locale))
                }
            }
            AppError::EmptyResult { resource, id } => {
                if en {
                    format!("No {} found with id {}.", resource.noun(locale), id)
                } else {
                    format!("Data {} dengan id {} tidak ditemukan.", resource.noun(locale), id)
                }
            }
            AppError::LoginRejected(message) => message.clone(),
            AppError::InvalidCredentials => {
                if en {
                    "Invalid username or password.".to_string()
                } else {
                    "Username atau password salah.".to_string()
                }
            }
            AppError::InvalidToken => {
                if en {
                    "Authentication token is invalid or missing.".to_string()
                } else {
                    "Token autentikasi tidak valid atau tidak ada.".to_string()
                }
            }
            AppError::Forbidden { required } => {
                if en {
                    format!("This page requires the '{}' role.", required)
                } else {
                    format!("Halaman ini hanya untuk peran '{}'.", required)
                }
            }
            AppError::InvalidTransition { order_id, from, to } => {
                if en {
                    format!("Order #{} cannot move from '{}' to '{}'.", order_id, from, to)
                } else {
                    format!("Pesanan #{} tidak dapat diubah dari '{}' ke '{}'.", order_id, from, to)
                }
            }
            AppError::ValidationError(_) => {
                if en {
                    "One or more fields are invalid.".to_string()
                } else {
                    "Satu atau lebih isian tidak valid.".to_string()
                }
            }
            AppError::JwtError(_) | AppError::InternalServerError(_) => {
                if en {
                    "An unexpected error occurred.".to_string()
                } else {
                    "Terjadi kesalahan yang tidak terduga.".to_string()
                }
            }
        }
    }

    pub fn to_api_error(&self, locale: &Locale) -> ApiError {
        let status = self.status();

        // Erros 500 são logados com o detalhe e mascarados na resposta
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Erro Interno do Servidor: {:?}", self);
        } else if status == StatusCode::BAD_GATEWAY {
            tracing::warn!("{}", self);
        }

        let details = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                Some(json!(details))
            }
            _ => None,
        };

        ApiError {
            status,
            error: self.localized(locale),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

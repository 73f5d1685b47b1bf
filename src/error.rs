// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error taxonomy with user-facing messages.

use reqwest::StatusCode;
use serde_json::Value;

/// Every failure a client operation can surface.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ClientError {
    /// Classify a non-success response.
    ///
    /// 401 is not handled here; the request pipeline owns that policy.
    pub fn from_response(status: StatusCode, path: &str, body: &str) -> Self {
        match status.as_u16() {
            401 => ClientError::Unauthorized,
            404 => ClientError::NotFound(path.to_string()),
            400 | 422 => ClientError::Validation(validation_message(body)),
            code => ClientError::Api {
                status: code,
                message: api_message(body).unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown status")
                        .to_string()
                }),
            },
        }
    }

    /// True for failures worth another attempt: network errors and 5xx.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }

    /// Short notification text for the person at the keyboard.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport(_) => {
                "Não foi possível conectar ao servidor. Tente novamente.".to_string()
            }
            ClientError::Unauthorized => {
                "Sessão expirada. Faça login novamente.".to_string()
            }
            ClientError::NotFound(_) => "Registro não encontrado.".to_string(),
            ClientError::Validation(msg) | ClientError::InvalidInput(msg) => msg.clone(),
            ClientError::Api { .. } | ClientError::Decode(_) | ClientError::Internal(_) => {
                "Erro inesperado. Tente novamente.".to_string()
            }
            ClientError::Storage(_) => "Não foi possível salvar a sessão local.".to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut parts: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{}: {}", field, msg),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();
        parts.sort();
        ClientError::InvalidInput(parts.join(" "))
    }
}

/// Render a 400/422 body as `field: message` text.
///
/// Understands the single `{property, message}` object and the
/// `{field: [messages]}` map; anything else is passed through.
pub fn validation_message(body: &str) -> String {
    let trimmed = body.trim();
    let Ok(value) = serde_json::from_str::<Value>(trimmed) else {
        return if trimmed.is_empty() {
            "Requisição inválida.".to_string()
        } else {
            trimmed.to_string()
        };
    };

    match value {
        Value::Object(map) => {
            if let (Some(Value::String(property)), Some(Value::String(message))) =
                (map.get("property"), map.get("message"))
            {
                return format!("{}: {}", property, message);
            }
            map.iter()
                .map(|(key, value)| format!("{}: {}", key, flatten_value(value)))
                .collect::<Vec<_>>()
                .join(" ")
        }
        other => flatten_value(&other),
    }
}

fn api_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body.trim()).ok()?;
    ["detail", "message", "error"]
        .iter()
        .find_map(|key| value.get(key).map(flatten_value))
}

fn flatten_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(flatten_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

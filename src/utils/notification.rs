//! Notificaciones visibles para el usuario
//!
//! Todo error de una acción del usuario termina como una alerta bloqueante.

use serde::Serialize;

use crate::config::display::Texts;
use crate::utils::errors::{AppError, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// Alerta lista para mostrar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn info(title: &str, message: &str) -> Self {
        Self {
            level: NotificationLevel::Info,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    /// Convertir un error en alerta localizada
    pub fn from_error(error: &AppError, texts: &Texts) -> Self {
        let (level, title, message) = match error.kind() {
            ErrorKind::Transport => (
                NotificationLevel::Error,
                texts.error_title,
                texts.connection_failed.to_string(),
            ),
            ErrorKind::ServerRejected => {
                let message = match (error, error.server_message()) {
                    (AppError::Unauthorized(_), None) => texts.session_expired.to_string(),
                    (_, Some(message)) => message.to_string(),
                    (_, None) => texts.request_rejected.to_string(),
                };
                (NotificationLevel::Error, texts.error_title, message)
            }
            ErrorKind::LocalPrecondition => {
                let message = match error {
                    AppError::MissingField(field) => {
                        format!("{}: {}", texts.required_fields, field)
                    }
                    AppError::Validation(errors) => {
                        let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
                        fields.sort_unstable();
                        format!("{}: {}", texts.invalid_data, fields.join(", "))
                    }
                    AppError::Precondition(message)
                    | AppError::InvalidTransition(message)
                    | AppError::NotFound(message) => message.clone(),
                    _ => texts.invalid_data.to_string(),
                };
                (NotificationLevel::Warning, texts.attention_title, message)
            }
            ErrorKind::Storage => (
                NotificationLevel::Error,
                texts.error_title,
                texts.storage_failed.to_string(),
            ),
            ErrorKind::Internal => (
                NotificationLevel::Error,
                texts.error_title,
                texts.unexpected_error.to_string(),
            ),
        };

        Self {
            level,
            title: title.to_string(),
            message,
        }
    }
}

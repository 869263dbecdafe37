//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del cliente
//! y su clasificación para mostrarlos al usuario.

use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server rejected request ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Taxonomía de errores tal como la percibe el usuario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Sin respuesta del servidor
    Transport,
    /// El servidor respondió con un error (4xx/5xx)
    ServerRejected,
    /// Falló una validación local antes de cualquier llamada de red
    LocalPrecondition,
    /// Falló el almacenamiento del dispositivo
    Storage,
    Internal,
}

impl AppError {
    /// Clasificar el error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Network(e) if e.is_decode() => ErrorKind::ServerRejected,
            AppError::Network(_) => ErrorKind::Transport,
            AppError::Server { .. } | AppError::Unauthorized(_) => ErrorKind::ServerRejected,
            // Los 404 del backend llegan como `Server`; `NotFound` es de búsquedas locales
            AppError::Validation(_)
            | AppError::MissingField(_)
            | AppError::Precondition(_)
            | AppError::InvalidTransition(_)
            | AppError::NotFound(_) => ErrorKind::LocalPrecondition,
            AppError::Storage(_) | AppError::Serialization(_) => ErrorKind::Storage,
            AppError::Config(_) | AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Código estable del error, útil para logs
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::Server { .. } => "SERVER_REJECTED",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::MissingField(_) => "MISSING_FIELD",
            AppError::Precondition(_) => "PRECONDITION_FAILED",
            AppError::InvalidTransition(_) => "INVALID_TRANSITION",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Mensaje devuelto por el servidor, si existe
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AppError::Server { message, .. } if !message.trim().is_empty() => Some(message),
            AppError::Unauthorized(message) if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.add_param("field".into(), &field);
    error.add_param("message".into(), &message);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de transición de estado
pub fn transition_error(action: &str, from: &str) -> AppError {
    AppError::InvalidTransition(format!("cannot {} a vehicle that is {}", action, from))
}

/// Función helper para crear errores de precondición
pub fn precondition_error(message: &str) -> AppError {
    AppError::Precondition(message.to_string())
}

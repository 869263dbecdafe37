use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::utils::validation::{validate_email, validate_not_empty};

// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub nome: Option<String>,
}

/// Perfil con el que se registra un usuario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Operador,
}

impl UserRole {
    /// Segmento de ruta en `/usuarios/{role}`
    pub fn path_segment(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Operador => "operador",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

// Registro de usuario
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(custom = "validate_not_empty", length(min = 2, max = 100))]
    pub nome: String,

    #[validate(custom = "validate_email")]
    pub email: String,

    #[validate(length(min = 6, max = 64))]
    pub senha: String,
}

//! Sesión del usuario
//!
//! Se guarda bajo `@usuario_logado` después del login.

use serde::{Deserialize, Serialize};

use crate::config::display::Language;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub usuario: String,
    #[serde(default)]
    pub lang: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl UserSession {
    pub fn new(usuario: impl Into<String>, lang: Language, token: Option<String>) -> Self {
        Self {
            usuario: usuario.into(),
            lang,
            token,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().map_or(false, |t| !t.is_empty())
    }
}

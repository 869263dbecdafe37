//! Configuración de presentación (tema e idioma)
//!
//! Reemplaza el contexto global de tema: se construye una vez y se pasa
//! explícitamente a quien renderiza.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::errors::AppError;

/// Tema visual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    #[serde(rename = "claro")]
    Light,
    #[serde(rename = "escuro")]
    Dark,
}

impl Theme {
    /// Valor guardado en `@tema`
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "claro",
            Theme::Dark => "escuro",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "claro" | "light" => Ok(Theme::Light),
            "escuro" | "dark" => Ok(Theme::Dark),
            other => Err(AppError::Config(format!("unknown theme '{}'", other))),
        }
    }
}

/// Idioma de la interfaz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Pt,
    Es,
    En,
}

impl Language {
    /// Valor guardado en `@idioma`
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Pt => "pt",
            Language::Es => "es",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "pt" | "pt-br" => Ok(Language::Pt),
            "es" => Ok(Language::Es),
            "en" => Ok(Language::En),
            other => Err(AppError::Config(format!("unknown language '{}'", other))),
        }
    }
}

/// Colores usados por el mapa y las tarjetas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub card: &'static str,
    pub text: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub vehicle_pin: &'static str,
    pub observer_pin: &'static str,
    pub anchor_pin: &'static str,
    pub zone_border: &'static str,
}

const LIGHT_PALETTE: Palette = Palette {
    background: "#F5F5F5",
    card: "#FFFFFF",
    text: "#1B1B1B",
    primary: "#00A859",
    secondary: "#7A7A7A",
    vehicle_pin: "#E53935",
    observer_pin: "#1E88E5",
    anchor_pin: "#FB8C00",
    zone_border: "#00A859",
};

const DARK_PALETTE: Palette = Palette {
    background: "#121212",
    card: "#1E1E1E",
    text: "#EDEDED",
    primary: "#00C46A",
    secondary: "#9E9E9E",
    vehicle_pin: "#FF5252",
    observer_pin: "#64B5F6",
    anchor_pin: "#FFB74D",
    zone_border: "#00C46A",
};

/// Textos visibles para el usuario
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texts {
    pub error_title: &'static str,
    pub attention_title: &'static str,
    pub success_title: &'static str,
    pub connection_failed: &'static str,
    pub request_rejected: &'static str,
    pub session_expired: &'static str,
    pub required_fields: &'static str,
    pub invalid_data: &'static str,
    pub storage_failed: &'static str,
    pub unexpected_error: &'static str,
    pub status_pending: &'static str,
    pub status_in_yard: &'static str,
    pub status_in_maintenance: &'static str,
    pub observer_label: &'static str,
    pub vehicle_registered: &'static str,
}

const TEXTS_PT: Texts = Texts {
    error_title: "Erro",
    attention_title: "Atenção",
    success_title: "Sucesso",
    connection_failed: "Não foi possível conectar ao servidor",
    request_rejected: "O servidor recusou a solicitação",
    session_expired: "Sessão expirada. Faça login novamente.",
    required_fields: "Preencha todos os campos obrigatórios",
    invalid_data: "Dados inválidos",
    storage_failed: "Não foi possível acessar o armazenamento do dispositivo",
    unexpected_error: "Ocorreu um erro inesperado",
    status_pending: "Aguardando posicionamento",
    status_in_yard: "No pátio",
    status_in_maintenance: "Em manutenção",
    observer_label: "Você",
    vehicle_registered: "Moto cadastrada com sucesso",
};

const TEXTS_ES: Texts = Texts {
    error_title: "Error",
    attention_title: "Atención",
    success_title: "Éxito",
    connection_failed: "No fue posible conectar con el servidor",
    request_rejected: "El servidor rechazó la solicitud",
    session_expired: "Sesión expirada. Inicie sesión nuevamente.",
    required_fields: "Complete todos los campos obligatorios",
    invalid_data: "Datos inválidos",
    storage_failed: "No fue posible acceder al almacenamiento del dispositivo",
    unexpected_error: "Ocurrió un error inesperado",
    status_pending: "Esperando ubicación",
    status_in_yard: "En el patio",
    status_in_maintenance: "En mantenimiento",
    observer_label: "Usted",
    vehicle_registered: "Moto registrada con éxito",
};

const TEXTS_EN: Texts = Texts {
    error_title: "Error",
    attention_title: "Attention",
    success_title: "Success",
    connection_failed: "Could not connect to the server",
    request_rejected: "The server rejected the request",
    session_expired: "Session expired. Please log in again.",
    required_fields: "Fill in all required fields",
    invalid_data: "Invalid data",
    storage_failed: "Could not access device storage",
    unexpected_error: "An unexpected error occurred",
    status_pending: "Pending placement",
    status_in_yard: "In yard",
    status_in_maintenance: "In maintenance",
    observer_label: "You",
    vehicle_registered: "Motorcycle registered successfully",
};

/// Tema + idioma, inyectados explícitamente
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayConfig {
    pub theme: Theme,
    pub language: Language,
}

impl DisplayConfig {
    pub fn new(theme: Theme, language: Language) -> Self {
        Self { theme, language }
    }

    pub fn palette(&self) -> &'static Palette {
        match self.theme {
            Theme::Light => &LIGHT_PALETTE,
            Theme::Dark => &DARK_PALETTE,
        }
    }

    pub fn texts(&self) -> &'static Texts {
        match self.language {
            Language::Pt => &TEXTS_PT,
            Language::Es => &TEXTS_ES,
            Language::En => &TEXTS_EN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_storage_values() {
        assert_eq!("escuro".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().as_str(), "claro");
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!("PT-BR".parse::<Language>().unwrap(), Language::Pt);
        assert_eq!(Language::Es.to_string(), "es");
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_display_config_selects_tables() {
        let config = DisplayConfig::new(Theme::Dark, Language::En);
        assert_eq!(config.palette().background, "#121212");
        assert_eq!(config.texts().status_pending, "Pending placement");
        assert_eq!(DisplayConfig::default().texts().error_title, "Erro");
    }
}

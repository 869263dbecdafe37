//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Todas las variables
//! tienen un valor por defecto de desarrollo; solo falla si un valor
//! presente no se puede interpretar.

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::map_config::MapConfig;
use crate::utils::errors::AppError;
use crate::utils::validation::{validate_non_negative, validate_positive};

/// Origen de las posiciones de las motos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionSourceKind {
    /// Posiciones aleatorias generadas en el cliente
    #[default]
    Simulated,
    /// Coordenadas derivadas de las balizas, servidas por la API
    Hardware,
}

impl FromStr for PositionSourceKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "simulated" | "simulado" => Ok(PositionSourceKind::Simulated),
            "hardware" | "esp32" => Ok(PositionSourceKind::Hardware),
            other => Err(AppError::Config(format!("unknown position source '{}'", other))),
        }
    }
}

impl fmt::Display for PositionSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionSourceKind::Simulated => f.write_str("simulated"),
            PositionSourceKind::Hardware => f.write_str("hardware"),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub storage_dir: PathBuf,
    pub position_source: PositionSourceKind,
    pub simulation_seed: Option<u64>,
    pub log_level: tracing::Level,
    pub map: MapConfig,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            api_base_url: "http://localhost:8080/api".to_string(),
            request_timeout_secs: 10,
            storage_dir: PathBuf::from(".moto_yard"),
            position_source: PositionSourceKind::Simulated,
            simulation_seed: None,
            log_level: tracing::Level::INFO,
            map: MapConfig::default(),
        }
    }
}

/// Leer una variable opcional y convertirla
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => {
            let value = raw
                .trim()
                .parse::<T>()
                .with_context(|| format!("{} must be valid, got '{}'", name, raw))?;
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}

impl EnvironmentConfig {
    /// Cargar desde `.env` y variables de entorno
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let map_defaults = defaults.map;

        let map = MapConfig {
            canvas_width: parse_var("MOTO_YARD_CANVAS_WIDTH")?.unwrap_or(map_defaults.canvas_width),
            canvas_height: parse_var("MOTO_YARD_CANVAS_HEIGHT")?
                .unwrap_or(map_defaults.canvas_height),
            icon_size: parse_var("MOTO_YARD_ICON_SIZE")?.unwrap_or(map_defaults.icon_size),
            distance_scale: parse_var("MOTO_YARD_DISTANCE_SCALE")?
                .unwrap_or(map_defaults.distance_scale),
            default_observer: map_defaults.default_observer,
        };

        let config = Self {
            environment: env::var("MOTO_YARD_ENV").unwrap_or(defaults.environment),
            api_base_url: env::var("MOTO_YARD_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            request_timeout_secs: parse_var("MOTO_YARD_TIMEOUT_SECS")?
                .unwrap_or(defaults.request_timeout_secs),
            storage_dir: env::var("MOTO_YARD_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            position_source: parse_var("MOTO_YARD_POSITION_SOURCE")?
                .unwrap_or(defaults.position_source),
            simulation_seed: parse_var("MOTO_YARD_SIM_SEED")?,
            log_level: parse_var("MOTO_YARD_LOG_LEVEL")?.unwrap_or(defaults.log_level),
            map,
        };

        config.validate()?;
        Ok(config)
    }

    /// Verificar dimensiones del lienzo
    pub fn validate(&self) -> Result<()> {
        validate_positive(self.map.canvas_width)
            .and(validate_positive(self.map.canvas_height))
            .context("canvas dimensions must be positive")?;
        validate_non_negative(self.map.icon_size).context("icon size must not be negative")?;
        validate_positive(self.map.distance_scale).context("distance scale must be positive")?;
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request timeout must be at least one second");
        }
        Ok(())
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

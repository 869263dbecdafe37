//! Configuración del proyecto
//!
//! Este módulo contiene las variables de entorno, la configuración del mapa,
//! la de presentación (tema/idioma) y el logging.

pub mod display;
pub mod environment;
pub mod logging;
pub mod map_config;

pub use display::{DisplayConfig, Language, Theme};
pub use environment::*;
pub use map_config::MapConfig;

//! Configuración del lienzo del mapa

use serde::{Deserialize, Serialize};

use crate::models::geometry::NormalizedPoint;

/// Dimensiones del mapa y factor de escala de distancia
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub icon_size: f64,
    /// Factor cosmético aplicado a la distancia en píxeles
    pub distance_scale: f64,
    /// Posición del observador cuando no hay posicionamiento real
    pub default_observer: NormalizedPoint,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            canvas_width: 300.0,
            canvas_height: 300.0,
            icon_size: 30.0,
            distance_scale: 100.0,
            default_observer: NormalizedPoint::new(0.1, 0.9),
        }
    }
}

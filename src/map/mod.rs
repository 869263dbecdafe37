//! Mapa del pátio
//!
//! Conversión de coordenadas normalizadas a píxeles y el contrato de
//! renderizado que consume la pantalla del mapa.

pub mod layout;
pub mod position_model;

pub use layout::{render_map, MapLayout};
pub use position_model::{display_distance, is_within_yard, to_canvas_point, YardPositionModel};

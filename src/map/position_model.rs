//! Modelo de posiciones del pátio
//!
//! Las posiciones normalizadas se escalan al lienzo y se desplazan medio
//! ícono para que éste quede centrado sobre el punto. No hay clamping: un
//! punto fuera de [0, 1] produce un desplazamiento fuera del lienzo.
//!
//! La "distancia" es la distancia euclidiana en píxeles multiplicada por un
//! factor de escala arbitrario. Es un valor cosmético para mostrar, no una
//! medida calibrada en metros.

use crate::config::map_config::MapConfig;
use crate::models::geometry::{CanvasPoint, NormalizedPoint};

/// Desplazamiento superior izquierdo del ícono centrado en `normalized`
pub fn to_canvas_point(
    normalized: NormalizedPoint,
    canvas_width: f64,
    canvas_height: f64,
    icon_size: f64,
) -> CanvasPoint {
    let half_icon = icon_size / 2.0;
    CanvasPoint {
        left: normalized.x * canvas_width - half_icon,
        top: normalized.y * canvas_height - half_icon,
    }
}

/// Distancia de presentación entre dos entidades
pub fn display_distance(
    a: NormalizedPoint,
    b: NormalizedPoint,
    canvas_width: f64,
    canvas_height: f64,
    scale_factor: f64,
) -> f64 {
    // El desplazamiento del ícono es el mismo en ambos puntos y se cancela
    let pa = to_canvas_point(a, canvas_width, canvas_height, 0.0);
    let pb = to_canvas_point(b, canvas_width, canvas_height, 0.0);
    pa.distance_to(&pb) * scale_factor
}

/// `0 <= x <= 1 && 0 <= y <= 1`
pub fn is_within_yard(point: NormalizedPoint) -> bool {
    point.is_within_unit_square()
}

/// Parámetros fijos de un lienzo
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YardPositionModel {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub icon_size: f64,
    pub scale_factor: f64,
}

impl YardPositionModel {
    pub fn new(canvas_width: f64, canvas_height: f64, icon_size: f64, scale_factor: f64) -> Self {
        Self {
            canvas_width,
            canvas_height,
            icon_size,
            scale_factor,
        }
    }

    pub fn from_config(config: &MapConfig) -> Self {
        Self::new(
            config.canvas_width,
            config.canvas_height,
            config.icon_size,
            config.distance_scale,
        )
    }

    pub fn to_canvas_point(&self, normalized: NormalizedPoint) -> CanvasPoint {
        to_canvas_point(normalized, self.canvas_width, self.canvas_height, self.icon_size)
    }

    pub fn display_distance(&self, a: NormalizedPoint, b: NormalizedPoint) -> f64 {
        display_distance(a, b, self.canvas_width, self.canvas_height, self.scale_factor)
    }

    pub fn is_within_yard(&self, point: NormalizedPoint) -> bool {
        is_within_yard(point)
    }

    /// Escalar un largo en unidades del pátio a píxeles horizontales
    pub fn scale_x(&self, value: f64, yard_width: f64) -> f64 {
        value / yard_width * self.canvas_width
    }

    /// Escalar un largo en unidades del pátio a píxeles verticales
    pub fn scale_y(&self, value: f64, yard_height: f64) -> f64 {
        value / yard_height * self.canvas_height
    }
}

impl Default for YardPositionModel {
    fn default() -> Self {
        Self::from_config(&MapConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn grid() -> Vec<NormalizedPoint> {
        let steps = [0.0, 0.1, 0.25, 0.5, 0.75, 0.9, 1.0];
        steps
            .iter()
            .flat_map(|&x| steps.iter().map(move |&y| NormalizedPoint::new(x, y)))
            .collect()
    }

    #[test]
    fn test_reference_point() {
        let point = to_canvas_point(NormalizedPoint::new(0.4, 0.7), 300.0, 300.0, 30.0);
        assert!((point.left - 105.0).abs() < EPS);
        assert!((point.top - 195.0).abs() < EPS);
    }

    #[test]
    fn test_points_inside_yard_stay_within_icon_bounds() {
        let (w, h, icon) = (300.0, 200.0, 30.0);
        for p in grid() {
            let c = to_canvas_point(p, w, h, icon);
            assert!(c.left >= -icon / 2.0 - EPS && c.left <= w - icon / 2.0 + EPS);
            assert!(c.top >= -icon / 2.0 - EPS && c.top <= h - icon / 2.0 + EPS);
        }
    }

    #[test]
    fn test_out_of_range_is_not_clamped() {
        let c = to_canvas_point(NormalizedPoint::new(1.5, -0.5), 300.0, 300.0, 30.0);
        assert!((c.left - 435.0).abs() < EPS);
        assert!((c.top + 165.0).abs() < EPS);
    }

    #[test]
    fn test_within_yard_boundaries() {
        assert!(is_within_yard(NormalizedPoint::new(0.0, 0.0)));
        assert!(is_within_yard(NormalizedPoint::new(1.0, 1.0)));
        assert!(!is_within_yard(NormalizedPoint::new(-0.01, 0.5)));
        assert!(!is_within_yard(NormalizedPoint::new(0.5, 1.0001)));
    }

    #[test]
    fn test_distance_identity_and_symmetry() {
        let model = YardPositionModel::default();
        for a in grid() {
            assert_eq!(model.display_distance(a, a), 0.0);
            for b in grid() {
                assert!((model.display_distance(a, b) - model.display_distance(b, a)).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_observer_distance_regression() {
        let observer = NormalizedPoint::new(0.1, 0.9);
        let moto = NormalizedPoint::new(0.4, 0.7);

        let raw = display_distance(observer, moto, 300.0, 300.0, 1.0);
        assert!((raw - 108.166_538_263_919_68).abs() < 1e-6);

        let shown = display_distance(observer, moto, 300.0, 300.0, 100.0);
        assert!((shown - 10_816.653_826_391_968).abs() < 1e-6);
        assert_eq!(shown.round(), 10_817.0);
    }

    #[test]
    fn test_scaling_yard_units() {
        let model = YardPositionModel::default();
        assert_eq!(model.scale_x(100.0, 200.0), 150.0);
        assert_eq!(model.scale_y(50.0, 200.0), 75.0);
    }
}

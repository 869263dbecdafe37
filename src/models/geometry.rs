//! Tipos geométricos del pátio
//!
//! Las posiciones de motos, observador y balizas se expresan en coordenadas
//! normalizadas [0, 1]; las zonas usan las unidades planas del pátio.

use serde::{Deserialize, Serialize};

/// Posición como fracción del ancho/alto del pátio
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Ambas coordenadas dentro de [0, 1], bordes incluidos
    pub fn is_within_unit_square(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn clamped(&self) -> Self {
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
        }
    }
}

/// Desplazamiento en píxeles (esquina superior izquierda del ícono)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CanvasPoint {
    pub left: f64,
    pub top: f64,
}

impl CanvasPoint {
    pub fn distance_to(&self, other: &CanvasPoint) -> f64 {
        let dx = other.left - self.left;
        let dy = other.top - self.top;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Rectángulo en unidades planas arbitrarias
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn has_positive_size(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Intersección con `bounds`; `None` si no queda área
    pub fn clip_to(&self, bounds: &Rect) -> Option<Rect> {
        let x = self.x.max(bounds.x);
        let y = self.y.max(bounds.y);
        let right = self.right().min(bounds.right());
        let bottom = self.bottom().min(bounds.bottom());

        let clipped = Rect::new(x, y, right - x, bottom - y);
        clipped.has_positive_size().then_some(clipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_square_is_inclusive() {
        assert!(NormalizedPoint::new(0.0, 0.0).is_within_unit_square());
        assert!(NormalizedPoint::new(1.0, 1.0).is_within_unit_square());
        assert!(!NormalizedPoint::new(-0.01, 0.5).is_within_unit_square());
        assert_eq!(NormalizedPoint::new(1.4, -2.0).clamped(), NormalizedPoint::new(1.0, 0.0));
    }

    #[test]
    fn test_rect_containment() {
        let yard = Rect::new(0.0, 0.0, 200.0, 200.0);
        assert!(yard.contains_rect(&Rect::new(20.0, 20.0, 100.0, 100.0)));
        assert!(yard.contains_rect(&yard));
        assert!(!yard.contains_rect(&Rect::new(150.0, 20.0, 100.0, 100.0)));
    }

    #[test]
    fn test_clip() {
        let yard = Rect::new(0.0, 0.0, 200.0, 200.0);
        let clipped = Rect::new(150.0, -10.0, 100.0, 100.0).clip_to(&yard).unwrap();
        assert_eq!(clipped, Rect::new(150.0, 0.0, 50.0, 90.0));
        assert!(Rect::new(300.0, 0.0, 10.0, 10.0).clip_to(&yard).is_none());
    }
}

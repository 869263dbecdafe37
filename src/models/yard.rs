//! Modelo de Pátio
//!
//! Un pátio es un rectángulo con zonas nombradas y puntos de referencia
//! (balizas). Las zonas se guardan relativas al origen del pátio y siempre
//! quedan contenidas en él.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::geometry::{NormalizedPoint, Rect};
use super::ids::EntityId;
use crate::utils::errors::{not_found_error, precondition_error, AppError, AppResult};
use crate::utils::validation::validate_normalized;

/// Tamaño mínimo de una zona al redimensionar
pub const MIN_ZONE_SIZE: f64 = 50.0;

/// Estructura por defecto al configurar un pátio nuevo
pub const DEFAULT_EXTENT: Rect = Rect {
    x: 50.0,
    y: 50.0,
    width: 200.0,
    height: 200.0,
};

const DEFAULT_ZONE_OFFSET: f64 = 20.0;
const DEFAULT_ZONE_SIZE: f64 = 100.0;

fn default_extent() -> Rect {
    DEFAULT_EXTENT
}

/// Punto de referencia del pátio (p. ej. una baliza ESP32)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    #[serde(rename = "nome", default)]
    pub label: String,
    #[serde(flatten)]
    pub position: NormalizedPoint,
}

impl AnchorPoint {
    pub fn new(label: impl Into<String>, position: NormalizedPoint) -> Self {
        Self {
            label: label.into(),
            position,
        }
    }
}

/// Sub-área nombrada del pátio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: EntityId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(flatten)]
    pub rect: Rect,
}

/// Pátio físico
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Yard {
    pub id: EntityId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "estrutura", default = "default_extent")]
    pub extent: Rect,
    #[serde(rename = "zonas", default)]
    pub zones: Vec<Zone>,
    #[serde(rename = "coordenadasExtremidade", default)]
    pub anchors: Vec<AnchorPoint>,
    #[serde(rename = "espId", default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(rename = "criadoEm", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Yard {
    /// Crear un pátio vacío con id local
    pub fn new(name: &str, extent: Rect) -> AppResult<Self> {
        if name.trim().is_empty() {
            return Err(AppError::MissingField("nome"));
        }
        if !extent.has_positive_size() {
            return Err(precondition_error("yard width and height must be positive"));
        }

        Ok(Self {
            id: EntityId::generate(),
            name: name.trim().to_string(),
            extent,
            zones: Vec::new(),
            anchors: Vec::new(),
            device_id: None,
            created_at: Some(Utc::now()),
        })
    }

    /// Rectángulo del pátio en su propio sistema (origen 0,0)
    pub fn local_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.extent.width, self.extent.height)
    }

    /// Verificar los invariantes del pátio
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::MissingField("nome"));
        }
        if !self.extent.has_positive_size() {
            return Err(precondition_error("yard width and height must be positive"));
        }
        if let Some(anchor) = self.anchors.iter().find(|a| {
            validate_normalized(a.position.x)
                .and(validate_normalized(a.position.y))
                .is_err()
        }) {
            return Err(AppError::Precondition(format!(
                "anchor '{}' lies outside the normalized yard space",
                anchor.label
            )));
        }
        let bounds = self.local_bounds();
        if let Some(zone) = self.zones.iter().find(|z| !bounds.contains_rect(&z.rect)) {
            return Err(AppError::Precondition(format!(
                "zone '{}' extends outside yard '{}'",
                zone.name, self.name
            )));
        }
        Ok(())
    }

    pub fn zone(&self, id: &EntityId) -> Option<&Zone> {
        self.zones.iter().find(|z| &z.id == id)
    }

    fn zone_mut(&mut self, id: &EntityId) -> AppResult<&mut Zone> {
        self.zones
            .iter_mut()
            .find(|z| &z.id == id)
            .ok_or_else(|| not_found_error("Zona", id.as_str()))
    }

    fn ensure_inside(&self, name: &str, rect: &Rect) -> AppResult<()> {
        if !rect.has_positive_size() {
            return Err(AppError::Precondition(format!(
                "zone '{}' must have a positive size",
                name
            )));
        }
        if !self.local_bounds().contains_rect(rect) {
            return Err(AppError::Precondition(format!(
                "zone '{}' extends outside yard '{}'",
                name, self.name
            )));
        }
        Ok(())
    }

    /// Agregar una zona; se rechaza si sale del pátio
    pub fn add_zone(&mut self, name: &str, rect: Rect) -> AppResult<&Zone> {
        if name.trim().is_empty() {
            return Err(AppError::MissingField("nome"));
        }
        self.ensure_inside(name, &rect)?;

        self.zones.push(Zone {
            id: EntityId::generate(),
            name: name.trim().to_string(),
            rect,
        });
        Ok(&self.zones[self.zones.len() - 1])
    }

    /// Agregar "Zona N" en la posición por defecto, recortada al pátio
    pub fn add_default_zone(&mut self) -> AppResult<&Zone> {
        let name = format!("Zona {}", self.zones.len() + 1);
        let rect = Rect::new(
            DEFAULT_ZONE_OFFSET,
            DEFAULT_ZONE_OFFSET,
            DEFAULT_ZONE_SIZE,
            DEFAULT_ZONE_SIZE,
        )
        .clip_to(&self.local_bounds())
        .ok_or_else(|| precondition_error("yard is too small for a new zone"))?;

        self.add_zone(&name, rect)
    }

    /// Mover una zona; se rechaza si sale del pátio
    pub fn move_zone(&mut self, id: &EntityId, dx: f64, dy: f64) -> AppResult<()> {
        let zone = self.zone(id).ok_or_else(|| not_found_error("Zona", id.as_str()))?;
        let moved = zone.rect.translated(dx, dy);
        let name = zone.name.clone();
        self.ensure_inside(&name, &moved)?;

        self.zone_mut(id)?.rect = moved;
        Ok(())
    }

    /// Redimensionar una zona: mínimo 50x50 y recortada al pátio
    pub fn resize_zone(&mut self, id: &EntityId, dw: f64, dh: f64) -> AppResult<()> {
        let bounds = self.local_bounds();
        let zone = self.zone_mut(id)?;

        let resized = Rect::new(
            zone.rect.x,
            zone.rect.y,
            (zone.rect.width + dw).max(MIN_ZONE_SIZE),
            (zone.rect.height + dh).max(MIN_ZONE_SIZE),
        );
        zone.rect = resized.clip_to(&bounds).ok_or_else(|| {
            AppError::Precondition(format!("zone '{}' no longer fits the yard", zone.name))
        })?;
        Ok(())
    }

    pub fn rename_zone(&mut self, id: &EntityId, name: &str) -> AppResult<()> {
        if name.trim().is_empty() {
            return Err(AppError::MissingField("nome"));
        }
        self.zone_mut(id)?.name = name.trim().to_string();
        Ok(())
    }

    pub fn remove_zone(&mut self, id: &EntityId) -> AppResult<Zone> {
        let index = self
            .zones
            .iter()
            .position(|z| &z.id == id)
            .ok_or_else(|| not_found_error("Zona", id.as_str()))?;
        Ok(self.zones.remove(index))
    }

    /// Convertir una posición normalizada a unidades del pátio
    pub fn to_yard_units(&self, point: NormalizedPoint) -> (f64, f64) {
        (point.x * self.extent.width, point.y * self.extent.height)
    }

    /// Zona que contiene la posición normalizada, si hay alguna
    pub fn zone_at(&self, point: NormalizedPoint) -> Option<&Zone> {
        let (x, y) = self.to_yard_units(point);
        self.zones.iter().find(|z| z.rect.contains_point(x, y))
    }
}

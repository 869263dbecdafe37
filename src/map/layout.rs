//! Contrato de renderizado del mapa
//!
//! `render_map` produce todo lo que la pantalla necesita dibujar: zonas
//! escaladas, pines, la lista de motos fuera del mapa y la moto más cercana
//! al observador. Colores y textos vienen del `DisplayConfig` recibido.

use serde::Serialize;

use super::position_model::YardPositionModel;
use crate::config::display::DisplayConfig;
use crate::models::geometry::{CanvasPoint, NormalizedPoint};
use crate::models::ids::EntityId;
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::models::yard::Yard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PinKind {
    Vehicle,
    Observer,
    Anchor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPin {
    pub kind: PinKind,
    pub id: Option<EntityId>,
    pub label: String,
    pub position: CanvasPoint,
    pub color: &'static str,
}

/// Zona en píxeles del lienzo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneBox {
    pub id: EntityId,
    pub name: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub border_color: &'static str,
}

/// Moto del pátio que no se dibuja en el mapa
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OffMapEntry {
    pub id: EntityId,
    pub label: String,
    pub status: VehicleStatus,
    pub status_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestVehicle {
    pub id: EntityId,
    pub label: String,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayout {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub background: &'static str,
    pub zones: Vec<ZoneBox>,
    pub pins: Vec<MapPin>,
    pub off_map: Vec<OffMapEntry>,
    pub nearest: Option<NearestVehicle>,
}

impl MapLayout {
    pub fn vehicle_pins(&self) -> impl Iterator<Item = &MapPin> {
        self.pins.iter().filter(|p| p.kind == PinKind::Vehicle)
    }

    pub fn observer_pin(&self) -> Option<&MapPin> {
        self.pins.iter().find(|p| p.kind == PinKind::Observer)
    }
}

/// Una moto se dibuja sólo si está en el pátio con posición válida
fn is_drawable(model: &YardPositionModel, vehicle: &Vehicle) -> Option<NormalizedPoint> {
    match (vehicle.status, vehicle.position) {
        (VehicleStatus::InYard, Some(position)) if model.is_within_yard(position) => Some(position),
        _ => None,
    }
}

/// Construir el layout del mapa
///
/// Con `yard` presente sólo se consideran las motos de ese pátio (o sin
/// pátio asignado).
pub fn render_map(
    model: &YardPositionModel,
    yard: Option<&Yard>,
    vehicles: &[Vehicle],
    observer: NormalizedPoint,
    display: &DisplayConfig,
) -> MapLayout {
    let palette = display.palette();
    let texts = display.texts();

    // Sin estructura válida no hay escala para las zonas
    let zones = yard
        .filter(|yard| yard.extent.has_positive_size())
        .map(|yard| {
            yard.zones
                .iter()
                .map(|zone| ZoneBox {
                    id: zone.id.clone(),
                    name: zone.name.clone(),
                    left: model.scale_x(zone.rect.x, yard.extent.width),
                    top: model.scale_y(zone.rect.y, yard.extent.height),
                    width: model.scale_x(zone.rect.width, yard.extent.width),
                    height: model.scale_y(zone.rect.height, yard.extent.height),
                    border_color: palette.zone_border,
                })
                .collect()
        })
        .unwrap_or_default();

    let mut pins = Vec::new();
    if let Some(yard) = yard {
        pins.extend(yard.anchors.iter().map(|anchor| MapPin {
            kind: PinKind::Anchor,
            id: None,
            label: anchor.label.clone(),
            position: model.to_canvas_point(anchor.position),
            color: palette.anchor_pin,
        }));
    }

    let mut off_map = Vec::new();
    let mut nearest: Option<NearestVehicle> = None;

    let in_scope = vehicles
        .iter()
        .filter(|v| yard.map_or(true, |y| v.belongs_to(&y.id)));

    for vehicle in in_scope {
        match is_drawable(model, vehicle) {
            Some(position) => {
                let distance = model.display_distance(observer, position);
                if nearest.as_ref().map_or(true, |n| distance < n.distance) {
                    nearest = Some(NearestVehicle {
                        id: vehicle.id.clone(),
                        label: vehicle.identity_label().to_string(),
                        distance,
                    });
                }
                pins.push(MapPin {
                    kind: PinKind::Vehicle,
                    id: Some(vehicle.id.clone()),
                    label: vehicle.identity_label().to_string(),
                    position: model.to_canvas_point(position),
                    color: palette.vehicle_pin,
                });
            }
            None => off_map.push(OffMapEntry {
                id: vehicle.id.clone(),
                label: vehicle.identity_label().to_string(),
                // Posición fuera del pátio: se muestra como pendiente
                status: match vehicle.status {
                    VehicleStatus::InYard => VehicleStatus::Pending,
                    other => other,
                },
                status_label: match vehicle.status {
                    VehicleStatus::InYard => VehicleStatus::Pending.label(texts),
                    other => other.label(texts),
                },
            }),
        }
    }

    pins.push(MapPin {
        kind: PinKind::Observer,
        id: None,
        label: texts.observer_label.to_string(),
        position: model.to_canvas_point(observer),
        color: palette.observer_pin,
    });

    MapLayout {
        canvas_width: model.canvas_width,
        canvas_height: model.canvas_height,
        background: palette.background,
        zones,
        pins,
        off_map,
        nearest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::display::{Language, Theme};
    use crate::models::geometry::Rect;
    use crate::models::vehicle::{Category, MotoModel, YardRef};
    use crate::models::yard::AnchorPoint;

    fn moto(id: &str, status: VehicleStatus, position: Option<NormalizedPoint>) -> Vehicle {
        Vehicle {
            id: EntityId::from(id),
            plate: Some(format!("ABC{}234", id.len())),
            chassis: None,
            code: None,
            model: MotoModel::MottuSport,
            category: Category::Rental,
            description: None,
            status,
            repair_class: None,
            yard: Some(YardRef { id: EntityId::from("p1") }),
            position,
            zone_id: None,
        }
    }

    fn yard() -> Yard {
        let mut yard = Yard::new("Pátio Central", Rect::new(50.0, 50.0, 200.0, 200.0)).unwrap();
        yard.id = EntityId::from("p1");
        yard.add_zone("Zona 1", Rect::new(20.0, 20.0, 100.0, 100.0)).unwrap();
        yard.anchors.push(AnchorPoint::new("ESP32-Central-001", NormalizedPoint::new(0.5, 0.0)));
        yard
    }

    #[test]
    fn test_layout_splits_drawable_and_off_map() {
        let model = YardPositionModel::default();
        let vehicles = vec![
            moto("a", VehicleStatus::InYard, Some(NormalizedPoint::new(0.4, 0.7))),
            moto("bb", VehicleStatus::Pending, None),
            moto("ccc", VehicleStatus::InMaintenance, None),
            moto("dddd", VehicleStatus::InYard, Some(NormalizedPoint::new(1.3, 0.2))),
        ];
        let display = DisplayConfig::new(Theme::Light, Language::En);
        let layout = render_map(&model, Some(&yard()), &vehicles, NormalizedPoint::new(0.1, 0.9), &display);

        let drawn: Vec<_> = layout.vehicle_pins().collect();
        assert_eq!(drawn.len(), 1);
        assert!((drawn[0].position.left - 105.0).abs() < 1e-9);
        assert!((drawn[0].position.top - 195.0).abs() < 1e-9);

        assert_eq!(layout.off_map.len(), 3);
        assert_eq!(layout.off_map[2].status, VehicleStatus::Pending);
        assert_eq!(layout.off_map[2].status_label, "Pending placement");
        assert_eq!(layout.off_map[1].status_label, "In maintenance");

        let nearest = layout.nearest.unwrap();
        assert_eq!(nearest.id, EntityId::from("a"));
        assert!((nearest.distance - 10_816.653_826_391_968).abs() < 1e-6);
    }

    #[test]
    fn test_zones_and_anchors_scaled_to_canvas() {
        let model = YardPositionModel::default();
        let layout = render_map(
            &model,
            Some(&yard()),
            &[],
            NormalizedPoint::new(0.1, 0.9),
            &DisplayConfig::default(),
        );

        let zone = &layout.zones[0];
        assert_eq!((zone.left, zone.top, zone.width, zone.height), (30.0, 30.0, 150.0, 150.0));

        let anchor = layout.pins.iter().find(|p| p.kind == PinKind::Anchor).unwrap();
        assert_eq!(anchor.position, CanvasPoint { left: 135.0, top: -15.0 });
        assert_eq!(layout.observer_pin().unwrap().label, "Você");
        assert!(layout.nearest.is_none());
    }

    #[test]
    fn test_theme_changes_colors() {
        let model = YardPositionModel::default();
        let light = render_map(&model, None, &[], NormalizedPoint::default(), &DisplayConfig::default());
        let dark = render_map(
            &model,
            None,
            &[],
            NormalizedPoint::default(),
            &DisplayConfig::new(Theme::Dark, Language::Pt),
        );
        assert_ne!(light.background, dark.background);
        assert_ne!(light.observer_pin().unwrap().color, dark.observer_pin().unwrap().color);
    }

    #[test]
    fn test_other_yards_are_excluded() {
        let model = YardPositionModel::default();
        let mut foreign = moto("x", VehicleStatus::InYard, Some(NormalizedPoint::new(0.5, 0.5)));
        foreign.yard = Some(YardRef { id: EntityId::from("p2") });
        let layout = render_map(
            &model,
            Some(&yard()),
            &[foreign],
            NormalizedPoint::default(),
            &DisplayConfig::default(),
        );
        assert_eq!(layout.vehicle_pins().count(), 0);
        assert!(layout.off_map.is_empty());
    }

    #[test]
    fn test_yard_without_extent_draws_no_zones() {
        let model = YardPositionModel::default();
        let mut flat = yard();
        flat.extent.width = 0.0;
        let layout = render_map(
            &model,
            Some(&flat),
            &[],
            NormalizedPoint::default(),
            &DisplayConfig::default(),
        );
        assert!(layout.zones.is_empty());
        assert!(layout.pins.iter().all(|p| p.position.left.is_finite() && p.position.top.is_finite()));
    }
}

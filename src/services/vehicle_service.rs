//! Servicio de motos
//!
//! Registro, transiciones de estado y actualización de posición. Cada
//! operación trabaja sobre una copia: si el backend falla, la moto original
//! queda igual.

use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

use super::position_source::PositionSource;
use crate::client::YardApi;
use crate::dto::moto_dto::RegisterMotoRequest;
use crate::models::geometry::NormalizedPoint;
use crate::models::ids::EntityId;
use crate::models::vehicle::{generate_code, Vehicle};
use crate::models::yard::Yard;
use crate::utils::errors::AppResult;

pub struct VehicleService {
    api: Arc<dyn YardApi>,
    positions: Arc<dyn PositionSource>,
}

fn assign_zone(vehicle: &mut Vehicle, yard: Option<&Yard>, position: NormalizedPoint) {
    vehicle.zone_id = yard.and_then(|y| y.zone_at(position)).map(|z| z.id.clone());
}

impl VehicleService {
    pub fn new(api: Arc<dyn YardApi>, positions: Arc<dyn PositionSource>) -> Self {
        Self { api, positions }
    }

    /// Registrar una moto; sin placa, chassi ni código se genera `MOTO-<ms>`
    pub async fn register(&self, form: RegisterMotoRequest) -> AppResult<Vehicle> {
        let mut request = form.normalized();
        if !request.has_identity() {
            let code = generate_code();
            debug!("🏷️ Moto sin identificación, código generado {}", code);
            request.codigo = Some(code);
        }
        request.validate()?;

        let vehicle = self.api.register_vehicle(&request).await?;
        info!("🏍️ Moto {} registrada ({})", vehicle.identity_label(), vehicle.id);
        Ok(vehicle)
    }

    /// Pendiente -> en el pátio, en la posición que informe la fuente
    pub async fn place_in_yard(&self, vehicle: &Vehicle, yard: &Yard) -> AppResult<Vehicle> {
        let position = self.positions.locate(vehicle).await?;
        let mut updated = vehicle.clone();
        updated.place_in_yard(yard.id.clone(), position)?;
        assign_zone(&mut updated, Some(yard), position);

        let saved = self.api.update_vehicle(&updated).await?;
        info!("📍 Moto {} ubicada en {}", saved.identity_label(), yard.name);
        Ok(saved)
    }

    pub async fn send_to_maintenance(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let mut updated = vehicle.clone();
        updated.send_to_maintenance()?;

        let saved = self.api.update_vehicle(&updated).await?;
        info!("🔧 Moto {} enviada a mantenimiento", saved.identity_label());
        Ok(saved)
    }

    pub async fn return_to_yard(&self, vehicle: &Vehicle, yard: &Yard) -> AppResult<Vehicle> {
        let position = self.positions.locate(vehicle).await?;
        let mut updated = vehicle.clone();
        updated.return_to_yard(yard.id.clone(), position)?;
        assign_zone(&mut updated, Some(yard), position);

        let saved = self.api.update_vehicle(&updated).await?;
        info!("↩️ Moto {} volvió a {}", saved.identity_label(), yard.name);
        Ok(saved)
    }

    /// Nueva lectura de posición, enviada con `PUT /motos/{id}/localizacao`
    pub async fn update_location(&self, vehicle: &Vehicle, yard: Option<&Yard>) -> AppResult<Vehicle> {
        let position = self.positions.locate(vehicle).await?;
        let mut updated = vehicle.clone();
        updated.update_location(position)?;
        assign_zone(&mut updated, yard, position);

        self.api.update_location(&updated.id, position).await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: &EntityId) -> AppResult<()> {
        self.api.delete_vehicle(id).await
    }
}

/// Búsqueda sin distinción de mayúsculas por placa, chassi o código
pub fn search<'a>(vehicles: &'a [Vehicle], query: &str) -> Vec<&'a Vehicle> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return vehicles.iter().collect();
    }

    vehicles
        .iter()
        .filter(|v| {
            [&v.plate, &v.chassis, &v.code]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::{Category, MotoModel, VehicleStatus};

    fn moto(id: &str, plate: Option<&str>, chassis: Option<&str>, code: Option<&str>) -> Vehicle {
        Vehicle {
            id: EntityId::from(id),
            plate: plate.map(str::to_string),
            chassis: chassis.map(str::to_string),
            code: code.map(str::to_string),
            model: MotoModel::MottuPop,
            category: Category::Rental,
            description: None,
            status: VehicleStatus::Pending,
            repair_class: None,
            yard: None,
            position: None,
            zone_id: None,
        }
    }

    #[test]
    fn test_search_matches_plate_chassis_and_code() {
        let vehicles = vec![
            moto("1", Some("ABC1D23"), None, None),
            moto("2", None, Some("9C2KC1670JR123456"), None),
            moto("3", None, None, Some("MOTO-1718000000000")),
        ];

        let ids = |found: Vec<&Vehicle>| found.iter().map(|v| v.id.to_string()).collect::<Vec<_>>();
        assert_eq!(ids(search(&vehicles, "abc")), vec!["1"]);
        assert_eq!(ids(search(&vehicles, "jr12")), vec!["2"]);
        assert_eq!(ids(search(&vehicles, "moto-17")), vec!["3"]);
        assert_eq!(search(&vehicles, "  ").len(), 3);
        assert!(search(&vehicles, "zzz").is_empty());
    }
}

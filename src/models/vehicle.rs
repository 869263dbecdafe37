//! Modelo de Moto
//!
//! Este módulo contiene la moto rastreada, su ciclo de estados y
//! los catálogos fijos (modelo, categoría, clasificación por color).
//! Los nombres de campo en JSON siguen la API del backend.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::geometry::NormalizedPoint;
use super::ids::EntityId;
use crate::config::display::Texts;
use crate::utils::errors::{precondition_error, transition_error, AppResult};

/// Modelos de moto de la flota
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotoModel {
    #[serde(rename = "MOTTU_SPORT", alias = "Mottu Sport")]
    MottuSport,
    #[serde(rename = "MOTTU_E", alias = "Mottu-E")]
    MottuE,
    #[serde(rename = "MOTTU_POP", alias = "Mottu Pop")]
    MottuPop,
}

impl MotoModel {
    pub const ALL: [MotoModel; 3] = [MotoModel::MottuSport, MotoModel::MottuE, MotoModel::MottuPop];

    pub fn display_name(&self) -> &'static str {
        match self {
            MotoModel::MottuSport => "Mottu Sport",
            MotoModel::MottuE => "Mottu-E",
            MotoModel::MottuPop => "Mottu Pop",
        }
    }
}

/// Categoría de la moto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "ALUGUEL", alias = "aluguel")]
    Rental,
    #[serde(rename = "AQUISICAO", alias = "aquisicao", alias = "aquisição")]
    Acquisition,
}

/// Clasificación de reparo por color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepairClass {
    #[serde(rename = "verde")]
    Light,
    #[serde(rename = "azul")]
    Medium,
    #[serde(rename = "vermelho", alias = "vermelha")]
    Complex,
}

/// Estado del ciclo de vida
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VehicleStatus {
    #[default]
    #[serde(rename = "PENDENTE")]
    Pending,
    #[serde(rename = "NO_PATIO")]
    InYard,
    #[serde(rename = "EM_MANUTENCAO")]
    InMaintenance,
}

impl VehicleStatus {
    pub fn label(&self, texts: &Texts) -> &'static str {
        match self {
            VehicleStatus::Pending => texts.status_pending,
            VehicleStatus::InYard => texts.status_in_yard,
            VehicleStatus::InMaintenance => texts.status_in_maintenance,
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            VehicleStatus::Pending => "pending placement",
            VehicleStatus::InYard => "in yard",
            VehicleStatus::InMaintenance => "in maintenance",
        };
        f.write_str(value)
    }
}

/// Referencia al pátio (`"patio": {"id": ...}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YardRef {
    pub id: EntityId,
}

/// Moto rastreada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: EntityId,
    #[serde(rename = "placa", default, skip_serializing_if = "Option::is_none")]
    pub plate: Option<String>,
    #[serde(rename = "chassi", default, skip_serializing_if = "Option::is_none")]
    pub chassis: Option<String>,
    #[serde(rename = "codigo", default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "modelo")]
    pub model: MotoModel,
    #[serde(rename = "categoria")]
    pub category: Category,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: VehicleStatus,
    #[serde(rename = "classificacao", default, skip_serializing_if = "Option::is_none")]
    pub repair_class: Option<RepairClass>,
    #[serde(rename = "patio", default, skip_serializing_if = "Option::is_none")]
    pub yard: Option<YardRef>,
    #[serde(rename = "posicao", default, skip_serializing_if = "Option::is_none")]
    pub position: Option<NormalizedPoint>,
    #[serde(rename = "zonaId", default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<EntityId>,
}

/// Código para motos sin placa, chassi ni código
pub fn generate_code() -> String {
    format!("MOTO-{}", Utc::now().timestamp_millis())
}

impl Vehicle {
    /// Identificador visible: placa, chassi o código, en ese orden
    pub fn identity_label(&self) -> &str {
        [&self.plate, &self.chassis, &self.code]
            .into_iter()
            .flatten()
            .map(|s| s.as_str())
            .find(|s| !s.trim().is_empty())
            .unwrap_or_else(|| self.id.as_str())
    }

    pub fn has_identity(&self) -> bool {
        [&self.plate, &self.chassis, &self.code]
            .into_iter()
            .flatten()
            .any(|s| !s.trim().is_empty())
    }

    pub fn yard_id(&self) -> Option<&EntityId> {
        self.yard.as_ref().map(|y| &y.id)
    }

    pub fn belongs_to(&self, yard_id: &EntityId) -> bool {
        self.yard_id().map_or(true, |id| id == yard_id)
    }

    /// Ajustar estado y posición a los invariantes tras leer del servidor
    pub fn reconcile(mut self) -> Self {
        match (self.status, self.position) {
            (VehicleStatus::InYard, None) => self.status = VehicleStatus::Pending,
            (VehicleStatus::Pending, Some(_)) => self.status = VehicleStatus::InYard,
            (VehicleStatus::InMaintenance, Some(_)) => self.position = None,
            _ => {}
        }
        self
    }

    fn check_position(position: &NormalizedPoint) -> AppResult<()> {
        if !position.is_finite() {
            return Err(precondition_error("position must be a finite point"));
        }
        Ok(())
    }

    /// pendiente -> en el pátio
    pub fn place_in_yard(&mut self, yard_id: EntityId, position: NormalizedPoint) -> AppResult<()> {
        if self.status != VehicleStatus::Pending {
            return Err(transition_error("place", &self.status.to_string()));
        }
        Self::check_position(&position)?;
        self.status = VehicleStatus::InYard;
        self.yard = Some(YardRef { id: yard_id });
        self.position = Some(position);
        Ok(())
    }

    /// en el pátio -> en mantenimiento; la posición se descarta
    pub fn send_to_maintenance(&mut self) -> AppResult<()> {
        if self.status != VehicleStatus::InYard {
            return Err(transition_error("send to maintenance", &self.status.to_string()));
        }
        self.status = VehicleStatus::InMaintenance;
        self.position = None;
        self.zone_id = None;
        Ok(())
    }

    /// en mantenimiento -> en el pátio
    pub fn return_to_yard(&mut self, yard_id: EntityId, position: NormalizedPoint) -> AppResult<()> {
        if self.status != VehicleStatus::InMaintenance {
            return Err(transition_error("return to yard", &self.status.to_string()));
        }
        Self::check_position(&position)?;
        self.status = VehicleStatus::InYard;
        self.yard = Some(YardRef { id: yard_id });
        self.position = Some(position);
        Ok(())
    }

    /// en el pátio -> en el pátio, con nueva posición
    pub fn update_location(&mut self, position: NormalizedPoint) -> AppResult<()> {
        if self.status != VehicleStatus::InYard {
            return Err(transition_error("update the location of", &self.status.to_string()));
        }
        Self::check_position(&position)?;
        self.position = Some(position);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;
    use crate::utils::validation::is_generated_code;

    fn pending() -> Vehicle {
        Vehicle {
            id: EntityId::from("1"),
            plate: Some("ABC1234".to_string()),
            chassis: None,
            code: None,
            model: MotoModel::MottuSport,
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
    fn test_full_lifecycle() {
        let mut moto = pending();
        let yard = EntityId::from("p1");

        moto.place_in_yard(yard.clone(), NormalizedPoint::new(0.4, 0.7)).unwrap();
        assert_eq!(moto.status, VehicleStatus::InYard);
        assert_eq!(moto.yard_id(), Some(&yard));

        moto.update_location(NormalizedPoint::new(0.5, 0.5)).unwrap();
        moto.update_location(NormalizedPoint::new(0.6, 0.5)).unwrap();
        assert_eq!(moto.position, Some(NormalizedPoint::new(0.6, 0.5)));

        moto.send_to_maintenance().unwrap();
        assert_eq!(moto.status, VehicleStatus::InMaintenance);
        assert_eq!(moto.position, None);

        moto.return_to_yard(yard, NormalizedPoint::new(0.2, 0.2)).unwrap();
        assert_eq!(moto.status, VehicleStatus::InYard);
    }

    #[test]
    fn test_invalid_transitions_leave_vehicle_untouched() {
        let mut moto = pending();
        let before = moto.clone();

        assert!(matches!(moto.send_to_maintenance(), Err(AppError::InvalidTransition(_))));
        assert!(moto.update_location(NormalizedPoint::new(0.1, 0.1)).is_err());
        assert!(moto.return_to_yard(EntityId::from("p1"), NormalizedPoint::new(0.1, 0.1)).is_err());
        assert_eq!(moto, before);

        moto.place_in_yard(EntityId::from("p1"), NormalizedPoint::new(0.1, 0.1)).unwrap();
        assert!(moto.place_in_yard(EntityId::from("p1"), NormalizedPoint::new(0.1, 0.1)).is_err());
    }

    #[test]
    fn test_non_finite_position_rejected() {
        let mut moto = pending();
        assert!(moto.place_in_yard(EntityId::from("p1"), NormalizedPoint::new(f64::NAN, 0.1)).is_err());
        assert_eq!(moto.status, VehicleStatus::Pending);
    }

    #[test]
    fn test_reconcile() {
        let mut moto = pending();
        moto.status = VehicleStatus::InYard;
        assert_eq!(moto.clone().reconcile().status, VehicleStatus::Pending);

        moto.status = VehicleStatus::Pending;
        moto.position = Some(NormalizedPoint::new(0.3, 0.3));
        assert_eq!(moto.clone().reconcile().status, VehicleStatus::InYard);

        moto.status = VehicleStatus::InMaintenance;
        assert_eq!(moto.reconcile().position, None);
    }

    #[test]
    fn test_identity_label_order() {
        let mut moto = pending();
        assert_eq!(moto.identity_label(), "ABC1234");
        moto.plate = Some("  ".to_string());
        moto.chassis = Some("9C2KC1670JR123456".to_string());
        assert_eq!(moto.identity_label(), "9C2KC1670JR123456");
        moto.chassis = None;
        assert!(!moto.has_identity());
        assert_eq!(moto.identity_label(), "1");
    }

    #[test]
    fn test_generated_code_pattern() {
        assert!(is_generated_code(&generate_code()));
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{
            "id": 7,
            "placa": "ABC1234",
            "modelo": "MOTTU_POP",
            "categoria": "aquisição",
            "classificacao": "vermelha",
            "status": "NO_PATIO",
            "patio": {"id": 3},
            "posicao": {"x": 0.4, "y": 0.7}
        }"#;
        let moto: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(moto.category, Category::Acquisition);
        assert_eq!(moto.repair_class, Some(RepairClass::Complex));
        assert_eq!(moto.yard_id(), Some(&EntityId::from("3")));

        let value = serde_json::to_value(&moto).unwrap();
        assert_eq!(value["categoria"], "AQUISICAO");
        assert_eq!(value["patio"]["id"], "3");
        assert!(value.get("chassi").is_none());
    }
}

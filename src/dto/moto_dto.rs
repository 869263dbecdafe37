use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::geometry::NormalizedPoint;
use crate::models::ids::EntityId;
use crate::models::vehicle::{Category, MotoModel, RepairClass, Vehicle, VehicleStatus, YardRef};
use crate::utils::validation::{normalize_plate, validate_chassis, validate_license_plate};

/// Formulario de registro de moto
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterMotoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_license_plate")]
    pub placa: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_chassis")]
    pub chassi: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 40))]
    pub codigo: Option<String>,

    pub modelo: MotoModel,

    pub categoria: Category,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub descricao: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classificacao: Option<RepairClass>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patio: Option<YardRef>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RegisterMotoRequest {
    pub fn new(modelo: MotoModel, categoria: Category) -> Self {
        Self {
            placa: None,
            chassi: None,
            codigo: None,
            modelo,
            categoria,
            descricao: None,
            classificacao: None,
            patio: None,
        }
    }

    /// Campos en blanco pasan a `None`; placa y chassi en mayúsculas
    pub fn normalized(self) -> Self {
        Self {
            placa: non_blank(self.placa).map(|p| normalize_plate(&p)),
            chassi: non_blank(self.chassi).map(|c| c.to_uppercase()),
            codigo: non_blank(self.codigo),
            descricao: non_blank(self.descricao),
            ..self
        }
    }

    pub fn has_identity(&self) -> bool {
        self.placa.is_some() || self.chassi.is_some() || self.codigo.is_some()
    }

    /// Moto pendiente construida localmente (id generado en el cliente)
    pub fn into_vehicle(self, id: EntityId) -> Vehicle {
        Vehicle {
            id,
            plate: self.placa,
            chassis: self.chassi,
            code: self.codigo,
            model: self.modelo,
            category: self.categoria,
            description: self.descricao,
            status: VehicleStatus::Pending,
            repair_class: self.classificacao,
            yard: self.patio,
            position: None,
            zone_id: None,
        }
    }
}

/// Cuerpo de `PUT /motos/{id}/localizacao`
pub type LocationPayload = NormalizedPoint;

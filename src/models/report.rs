//! Modelos de Relatórios
//!
//! Resúmenes del pátio: totales por estado, por clasificación de color,
//! por categoría y por zona.

use serde::Serialize;

use super::ids::EntityId;

/// Conteo por clasificación de reparo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepairClassCounts {
    pub verde: usize,
    pub azul: usize,
    pub vermelha: usize,
    pub sem_classificacao: usize,
}

/// Conteo por categoría
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub aluguel: usize,
    pub aquisicao: usize,
}

/// Resumen para el panel del pátio
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct YardSummary {
    pub total: usize,

    // Por estado
    pub pending: usize,
    pub in_yard: usize,
    pub in_maintenance: usize,

    pub classificacao: RepairClassCounts,
    pub categorias: CategoryCounts,
}

/// Motos ubicadas dentro de una zona
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneCount {
    pub zone_id: EntityId,
    pub name: String,
    pub count: usize,
}

/// Resumen por zonas; `outside_zones` cuenta motos en el pátio sin zona
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ZoneReport {
    pub zones: Vec<ZoneCount>,
    pub outside_zones: usize,
}

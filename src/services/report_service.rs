use crate::models::report::{YardSummary, ZoneCount, ZoneReport};
use crate::models::vehicle::{Category, RepairClass, Vehicle, VehicleStatus};
use crate::models::yard::Yard;

/// Servicio de relatórios
pub struct ReportService;

impl ReportService {
    /// Totales por estado, clasificación y categoría
    pub fn summarize(vehicles: &[Vehicle]) -> YardSummary {
        let mut summary = YardSummary {
            total: vehicles.len(),
            ..Default::default()
        };

        for vehicle in vehicles {
            match vehicle.status {
                VehicleStatus::Pending => summary.pending += 1,
                VehicleStatus::InYard => summary.in_yard += 1,
                VehicleStatus::InMaintenance => summary.in_maintenance += 1,
            }

            match vehicle.repair_class {
                Some(RepairClass::Light) => summary.classificacao.verde += 1,
                Some(RepairClass::Medium) => summary.classificacao.azul += 1,
                Some(RepairClass::Complex) => summary.classificacao.vermelha += 1,
                None => summary.classificacao.sem_classificacao += 1,
            }

            match vehicle.category {
                Category::Rental => summary.categorias.aluguel += 1,
                Category::Acquisition => summary.categorias.aquisicao += 1,
            }
        }

        summary
    }

    /// Motos en el pátio agrupadas por la zona que contiene su posición
    pub fn summarize_by_zone(yard: &Yard, vehicles: &[Vehicle]) -> ZoneReport {
        let mut report = ZoneReport {
            zones: yard
                .zones
                .iter()
                .map(|z| ZoneCount {
                    zone_id: z.id.clone(),
                    name: z.name.clone(),
                    count: 0,
                })
                .collect(),
            outside_zones: 0,
        };

        let placed = vehicles.iter().filter(|v| {
            v.status == VehicleStatus::InYard && v.yard_id() == Some(&yard.id)
        });

        for position in placed.filter_map(|v| v.position) {
            match yard.zone_at(position) {
                Some(zone) => {
                    if let Some(entry) = report.zones.iter_mut().find(|c| c.zone_id == zone.id) {
                        entry.count += 1;
                    }
                }
                None => report.outside_zones += 1,
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::geometry::{NormalizedPoint, Rect};
    use crate::models::ids::EntityId;
    use crate::models::vehicle::{MotoModel, YardRef};

    fn moto(status: VehicleStatus, class: Option<RepairClass>, position: Option<NormalizedPoint>) -> Vehicle {
        Vehicle {
            id: EntityId::generate(),
            plate: None,
            chassis: None,
            code: Some("MOTO-1".to_string()),
            model: MotoModel::MottuSport,
            category: Category::Rental,
            description: None,
            status,
            repair_class: class,
            yard: Some(YardRef { id: EntityId::from("p1") }),
            position,
            zone_id: None,
        }
    }

    #[test]
    fn test_summarize() {
        let vehicles = vec![
            moto(VehicleStatus::Pending, None, None),
            moto(VehicleStatus::InYard, Some(RepairClass::Light), Some(NormalizedPoint::new(0.2, 0.2))),
            moto(VehicleStatus::InMaintenance, Some(RepairClass::Complex), None),
        ];
        let summary = ReportService::summarize(&vehicles);
        assert_eq!(summary.total, 3);
        assert_eq!((summary.pending, summary.in_yard, summary.in_maintenance), (1, 1, 1));
        assert_eq!(summary.classificacao.verde, 1);
        assert_eq!(summary.classificacao.vermelha, 1);
        assert_eq!(summary.classificacao.sem_classificacao, 1);
        assert_eq!(summary.categorias.aluguel, 3);
    }

    #[test]
    fn test_summarize_by_zone() {
        let mut yard = Yard::new("Pátio", Rect::new(0.0, 0.0, 200.0, 200.0)).unwrap();
        yard.id = EntityId::from("p1");
        yard.add_zone("Zona 1", Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();

        let vehicles = vec![
            moto(VehicleStatus::InYard, None, Some(NormalizedPoint::new(0.25, 0.25))),
            moto(VehicleStatus::InYard, None, Some(NormalizedPoint::new(0.9, 0.9))),
            moto(VehicleStatus::Pending, None, None),
        ];
        let report = ReportService::summarize_by_zone(&yard, &vehicles);
        assert_eq!(report.zones[0].count, 1);
        assert_eq!(report.outside_zones, 1);
    }
}

//! Fuentes de posición de las motos
//!
//! La posición de una moto puede venir del hardware (balizas ESP32 que el
//! backend expone por moto) o de un simulador aleatorio para desarrollo.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::client::YardApi;
use crate::config::environment::PositionSourceKind;
use crate::models::geometry::NormalizedPoint;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::{AppError, AppResult};

/// Paso máximo del paseo aleatorio por lectura
const WALK_STEP: f64 = 0.05;

#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Posición actual de la moto
    async fn locate(&self, vehicle: &Vehicle) -> AppResult<NormalizedPoint>;
}

/// Posiciones simuladas
pub struct SimulatedPositionSource {
    rng: Mutex<StdRng>,
}

impl SimulatedPositionSource {
    /// Con semilla las posiciones son reproducibles
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng: Mutex::new(rng) }
    }

    fn next_point(&self, current: Option<NormalizedPoint>) -> AppResult<NormalizedPoint> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AppError::Internal("position generator poisoned".to_string()))?;

        let point = match current {
            Some(p) if p.is_finite() => NormalizedPoint::new(
                p.x + rng.gen_range(-WALK_STEP..=WALK_STEP),
                p.y + rng.gen_range(-WALK_STEP..=WALK_STEP),
            )
            .clamped(),
            _ => NormalizedPoint::new(rng.gen_range(0.0..=1.0), rng.gen_range(0.0..=1.0)),
        };
        Ok(point)
    }
}

#[async_trait]
impl PositionSource for SimulatedPositionSource {
    async fn locate(&self, vehicle: &Vehicle) -> AppResult<NormalizedPoint> {
        let point = self.next_point(vehicle.position)?;
        debug!("🎲 Posición simulada para {}: ({:.3}, {:.3})", vehicle.identity_label(), point.x, point.y);
        Ok(point)
    }
}

/// Posiciones leídas del backend (`GET /motos/{id}/localizacao`)
pub struct HardwarePositionSource {
    api: Arc<dyn YardApi>,
}

impl HardwarePositionSource {
    pub fn new(api: Arc<dyn YardApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PositionSource for HardwarePositionSource {
    async fn locate(&self, vehicle: &Vehicle) -> AppResult<NormalizedPoint> {
        let point = self.api.fetch_location(&vehicle.id).await?;
        if !point.is_finite() {
            return Err(AppError::Server {
                status: 200,
                message: format!("invalid location received for {}", vehicle.id),
            });
        }
        debug!("📡 Posición de hardware para {}: ({:.3}, {:.3})", vehicle.id, point.x, point.y);
        Ok(point)
    }
}

/// Construir la fuente configurada
pub fn build_position_source(
    kind: PositionSourceKind,
    seed: Option<u64>,
    api: Arc<dyn YardApi>,
) -> Arc<dyn PositionSource> {
    match kind {
        PositionSourceKind::Simulated => Arc::new(SimulatedPositionSource::new(seed)),
        PositionSourceKind::Hardware => Arc::new(HardwarePositionSource::new(api)),
    }
}

//! Estado compartido de la aplicación
//!
//! Este módulo arma los componentes del cliente (almacenamiento, API
//! remota, fuente de posiciones) y entrega los servicios construidos
//! sobre ellos.

use std::sync::Arc;
use tracing::info;

use crate::client::{HttpYardApi, YardApi};
use crate::config::display::DisplayConfig;
use crate::config::environment::EnvironmentConfig;
use crate::config::logging::init_tracing;
use crate::map::YardPositionModel;
use crate::services::{
    build_position_source, AuthService, PositionSource, PreferencesService, VehicleService,
    YardService,
};
use crate::storage::{FileStore, KeyValueStore};
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub display: DisplayConfig,
    pub store: Arc<dyn KeyValueStore>,
    pub api: Arc<dyn YardApi>,
    pub positions: Arc<dyn PositionSource>,
}

impl AppState {
    /// Inicializar con almacenamiento en archivo y API HTTP
    pub async fn initialize(config: EnvironmentConfig) -> AppResult<Self> {
        init_tracing(config.log_level);

        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.storage_dir).await?);
        let api: Arc<dyn YardApi> = Arc::new(HttpYardApi::new(
            config.api_base_url.clone(),
            config.request_timeout_secs,
            store.clone(),
        )?);
        let positions =
            build_position_source(config.position_source, config.simulation_seed, api.clone());

        let display = PreferencesService::new(store.clone()).load().await?;

        info!(
            "🚀 Cliente listo: API {} | posiciones {} | entorno {}",
            config.api_base_url, config.position_source, config.environment
        );

        Ok(Self {
            config,
            display,
            store,
            api,
            positions,
        })
    }

    /// Armar el estado con componentes ya construidos
    pub fn with_components(
        config: EnvironmentConfig,
        display: DisplayConfig,
        store: Arc<dyn KeyValueStore>,
        api: Arc<dyn YardApi>,
        positions: Arc<dyn PositionSource>,
    ) -> Self {
        Self {
            config,
            display,
            store,
            api,
            positions,
        }
    }

    pub fn position_model(&self) -> YardPositionModel {
        YardPositionModel::from_config(&self.config.map)
    }

    pub fn auth_service(&self) -> AuthService {
        AuthService::new(self.api.clone(), self.store.clone())
    }

    pub fn yard_service(&self) -> YardService {
        YardService::new(self.api.clone(), self.store.clone())
    }

    pub fn vehicle_service(&self) -> VehicleService {
        VehicleService::new(self.api.clone(), self.positions.clone())
    }

    pub fn preferences_service(&self) -> PreferencesService {
        PreferencesService::new(self.store.clone())
    }
}

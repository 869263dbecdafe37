//! Backend falso y helpers compartidos por los tests de integración

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use moto_yard_tracker::client::YardApi;
use moto_yard_tracker::config::{DisplayConfig, EnvironmentConfig};
use moto_yard_tracker::dto::{LoginRequest, LoginResponse, RegisterMotoRequest, RegisterUserRequest, UserRole};
use moto_yard_tracker::models::{AnchorPoint, EntityId, NormalizedPoint, Rect, Vehicle, Yard};
use moto_yard_tracker::services::SimulatedPositionSource;
use moto_yard_tracker::storage::{KeyValueStore, MemoryStore};
use moto_yard_tracker::{AppError, AppResult, AppState};

fn unavailable() -> AppError {
    AppError::Server {
        status: 503,
        message: "Serviço indisponível".to_string(),
    }
}

#[derive(Default)]
pub struct FakeApi {
    pub yards: Mutex<Vec<Yard>>,
    pub vehicles: Mutex<Vec<Vehicle>>,
    pub location: Mutex<Option<NormalizedPoint>>,

    pub registered: Mutex<Vec<RegisterMotoRequest>>,
    pub pushed_locations: Mutex<Vec<(EntityId, NormalizedPoint)>>,
    pub deleted_yards: Mutex<Vec<EntityId>>,
    pub logins: Mutex<Vec<LoginRequest>>,

    pub fail_vehicles: AtomicBool,
    pub fail_yards: AtomicBool,
    pub fail_anchors: AtomicBool,
    pub fail_writes: AtomicBool,

    next_id: AtomicU64,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_yards(yards: Vec<Yard>) -> Arc<Self> {
        let api = Self::default();
        *api.yards.lock().unwrap() = yards;
        Arc::new(api)
    }

    pub fn set(flag: &AtomicBool, value: bool) {
        flag.store(value, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool) -> AppResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }

    fn missing(message: &str) -> AppError {
        AppError::Server {
            status: 404,
            message: message.to_string(),
        }
    }

    fn next_id(&self) -> EntityId {
        EntityId::from(self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1)
    }
}

#[async_trait]
impl YardApi for FakeApi {
    async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        self.logins.lock().unwrap().push(request.clone());
        if request.senha != "segredo1" {
            return Err(AppError::Unauthorized("Credenciais inválidas".to_string()));
        }
        Ok(LoginResponse {
            token: "token-123".to_string(),
            nome: Some("Ana".to_string()),
        })
    }

    async fn register_user(&self, _role: UserRole, _request: &RegisterUserRequest) -> AppResult<()> {
        Self::check(&self.fail_writes)
    }

    async fn list_yards(&self) -> AppResult<Vec<Yard>> {
        Self::check(&self.fail_yards)?;
        Ok(self.yards.lock().unwrap().clone())
    }

    async fn fetch_yard(&self, id: &EntityId) -> AppResult<Yard> {
        Self::check(&self.fail_anchors)?;
        self.yards
            .lock()
            .unwrap()
            .iter()
            .find(|y| &y.id == id)
            .cloned()
            .ok_or_else(|| Self::missing(&format!("Pátio {} não encontrado", id)))
    }

    async fn create_yard(&self, yard: &Yard) -> AppResult<Yard> {
        Self::check(&self.fail_writes)?;
        let mut created = yard.clone();
        created.id = self.next_id();
        self.yards.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn delete_yard(&self, id: &EntityId) -> AppResult<()> {
        Self::check(&self.fail_writes)?;
        self.yards.lock().unwrap().retain(|y| &y.id != id);
        self.deleted_yards.lock().unwrap().push(id.clone());
        Ok(())
    }

    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        Self::check(&self.fail_vehicles)?;
        Ok(self.vehicles.lock().unwrap().clone())
    }

    async fn register_vehicle(&self, request: &RegisterMotoRequest) -> AppResult<Vehicle> {
        Self::check(&self.fail_writes)?;
        self.registered.lock().unwrap().push(request.clone());
        let vehicle = request.clone().into_vehicle(self.next_id());
        self.vehicles.lock().unwrap().push(vehicle.clone());
        Ok(vehicle)
    }

    async fn update_vehicle(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        Self::check(&self.fail_writes)?;
        let mut vehicles = self.vehicles.lock().unwrap();
        match vehicles.iter_mut().find(|v| v.id == vehicle.id) {
            Some(slot) => *slot = vehicle.clone(),
            None => vehicles.push(vehicle.clone()),
        }
        Ok(vehicle.clone())
    }

    async fn delete_vehicle(&self, id: &EntityId) -> AppResult<()> {
        Self::check(&self.fail_writes)?;
        self.vehicles.lock().unwrap().retain(|v| &v.id != id);
        Ok(())
    }

    async fn fetch_location(&self, id: &EntityId) -> AppResult<NormalizedPoint> {
        (*self.location.lock().unwrap())
            .ok_or_else(|| Self::missing(&format!("Localização da moto {} não encontrada", id)))
    }

    async fn update_location(&self, id: &EntityId, position: NormalizedPoint) -> AppResult<()> {
        Self::check(&self.fail_writes)?;
        self.pushed_locations.lock().unwrap().push((id.clone(), position));
        Ok(())
    }
}

/// Pátio con id fijo, una zona y una baliza
pub fn sample_yard(id: &str, name: &str) -> Yard {
    let mut yard = Yard::new(name, Rect::new(50.0, 50.0, 200.0, 200.0)).unwrap();
    yard.id = EntityId::from(id);
    yard.add_zone("Zona 1", Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
    yard.anchors.push(AnchorPoint::new("ESP32-Central-001", NormalizedPoint::new(0.5, 0.5)));
    yard
}

pub fn test_state(api: Arc<FakeApi>) -> (AppState, Arc<dyn KeyValueStore>) {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let state = AppState::with_components(
        EnvironmentConfig::default(),
        DisplayConfig::default(),
        store.clone(),
        api,
        Arc::new(SimulatedPositionSource::new(Some(11))),
    );
    (state, store)
}

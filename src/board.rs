//! Tablero del pátio
//!
//! Estado de pantalla del operador: pátios, motos, pátio seleccionado y
//! observador. Todas las acciones pasan por aquí; los errores se registran,
//! se convierten en una notificación y se devuelven al llamador.

use futures::future::join_all;
use tracing::{info, warn};

use crate::config::display::{Language, Theme};
use crate::dto::moto_dto::RegisterMotoRequest;
use crate::map::{render_map, MapLayout};
use crate::models::geometry::NormalizedPoint;
use crate::models::ids::EntityId;
use crate::models::report::{YardSummary, ZoneReport};
use crate::models::vehicle::{Vehicle, VehicleStatus, YardRef};
use crate::models::yard::Yard;
use crate::services::{search, ReportService, YardDraft};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, precondition_error, AppResult, ErrorKind};
use crate::utils::notification::Notification;

/// Parte del tablero que refresca una petición
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTarget {
    Vehicles,
    Yards,
    Anchors,
}

/// Resultado de `YardBoard::refresh`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub updated: Vec<RefreshTarget>,
    pub failed: Vec<(RefreshTarget, ErrorKind)>,
}

impl RefreshReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn has_failed(&self, target: RefreshTarget) -> bool {
        self.failed.iter().any(|(t, _)| *t == target)
    }
}

pub struct YardBoard {
    state: AppState,
    yards: Vec<Yard>,
    vehicles: Vec<Vehicle>,
    selected_yard: Option<Yard>,
    observer: NormalizedPoint,
    notifications: Vec<Notification>,
}

impl YardBoard {
    /// Cargar el tablero con la selección y los pátios guardados
    pub async fn load(state: AppState) -> AppResult<Self> {
        let yard_service = state.yard_service();
        let selected_yard = yard_service.selected_yard().await?;
        let yards = yard_service.cached_yards().await?;
        let observer = state.config.map.default_observer;

        Ok(Self {
            state,
            yards,
            vehicles: Vec::new(),
            selected_yard,
            observer,
            notifications: Vec::new(),
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn yards(&self) -> &[Yard] {
        &self.yards
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn selected_yard(&self) -> Option<&Yard> {
        self.selected_yard.as_ref()
    }

    pub fn observer(&self) -> NormalizedPoint {
        self.observer
    }

    pub fn vehicle(&self, id: &EntityId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| &v.id == id)
    }

    /// Notificaciones pendientes de mostrar
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn report<T>(&mut self, action: &str, result: AppResult<T>) -> AppResult<T> {
        if let Err(e) = &result {
            warn!("❌ {} falló [{}]: {}", action, e.code(), e);
            self.notifications
                .push(Notification::from_error(e, self.state.display.texts()));
        }
        result
    }

    fn find_vehicle(&self, id: &EntityId) -> AppResult<Vehicle> {
        self.vehicle(id)
            .cloned()
            .ok_or_else(|| not_found_error("Moto", id.as_str()))
    }

    fn require_selected_yard(&self) -> AppResult<Yard> {
        self.selected_yard
            .clone()
            .ok_or_else(|| precondition_error("select a yard first"))
    }

    fn replace_vehicle(&mut self, vehicle: Vehicle) {
        match self.vehicles.iter_mut().find(|v| v.id == vehicle.id) {
            Some(slot) => *slot = vehicle,
            None => self.vehicles.push(vehicle),
        }
    }

    /// Refrescar motos, pátios y balizas del pátio seleccionado
    ///
    /// Un pátio local no tiene balizas en el backend y no se consulta.
    /// Las tres peticiones corren en paralelo. Una falla no afecta a las
    /// otras: su parte del estado queda como estaba.
    pub async fn refresh(&mut self) -> RefreshReport {
        let yard_service = self.state.yard_service();
        let selected_id = self.selected_yard.as_ref().map(|y| y.id.clone());

        let anchors = async {
            match &selected_id {
                Some(id) if !id.is_generated() => yard_service.fetch_anchors(id).await.map(Some),
                _ => Ok(None),
            }
        };
        let (vehicles, yards, anchors) = tokio::join!(
            self.state.api.list_vehicles(),
            yard_service.list_yards(),
            anchors
        );

        let mut report = RefreshReport::default();

        match self.report("Listar motos", vehicles) {
            Ok(vehicles) => {
                self.vehicles = vehicles;
                report.updated.push(RefreshTarget::Vehicles);
            }
            Err(e) => report.failed.push((RefreshTarget::Vehicles, e.kind())),
        }

        let mut fresh_selection = false;
        match self.report("Listar pátios", yards) {
            Ok(yards) => {
                if let Some(id) = &selected_id {
                    if let Some(fresh) = yards.iter().find(|y| &y.id == id) {
                        self.selected_yard = Some(fresh.clone());
                        fresh_selection = true;
                    }
                }
                self.yards = yards;
                report.updated.push(RefreshTarget::Yards);
            }
            Err(e) => report.failed.push((RefreshTarget::Yards, e.kind())),
        }

        match self.report("Cargar balizas", anchors) {
            Ok(Some(anchors)) => {
                if let Some(selected) = self.selected_yard.as_mut() {
                    selected.anchors = anchors;
                }
                report.updated.push(RefreshTarget::Anchors);
            }
            Ok(None) => {}
            Err(e) => report.failed.push((RefreshTarget::Anchors, e.kind())),
        }

        if fresh_selection {
            if let Some(selected) = self.selected_yard.clone() {
                let result = yard_service.select_yard(&selected).await;
                let _ = self.report("Guardar pátio seleccionado", result);
            }
        }

        info!(
            "🔄 Refresco: {} actualizados, {} fallidos",
            report.updated.len(),
            report.failed.len()
        );
        report
    }

    pub async fn select_yard(&mut self, id: &EntityId) -> AppResult<()> {
        let yard = match self.yards.iter().find(|y| &y.id == id).cloned() {
            Some(yard) => yard,
            None => return self.report("Seleccionar pátio", Err(not_found_error("Pátio", id.as_str()))),
        };

        let result = self.state.yard_service().select_yard(&yard).await;
        self.report("Seleccionar pátio", result)?;
        info!("📌 Pátio seleccionado: {}", yard.name);
        self.selected_yard = Some(yard);
        Ok(())
    }

    fn adopt_new_yard(&mut self, yard: Yard) -> Yard {
        self.yards.retain(|y| y.id != yard.id);
        self.yards.push(yard.clone());
        self.selected_yard = Some(yard.clone());
        yard
    }

    pub async fn create_yard(&mut self, draft: YardDraft) -> AppResult<Yard> {
        let result = self.state.yard_service().create_yard(draft).await;
        let yard = self.report("Crear pátio", result)?;
        Ok(self.adopt_new_yard(yard))
    }

    pub async fn create_local_yard(&mut self, draft: YardDraft) -> AppResult<Yard> {
        let result = self.state.yard_service().create_local_yard(draft).await;
        let yard = self.report("Crear pátio local", result)?;
        Ok(self.adopt_new_yard(yard))
    }

    fn forget_yard(&mut self, id: &EntityId) {
        self.yards.retain(|y| &y.id != id);
        if self.selected_yard.as_ref().map_or(false, |y| &y.id == id) {
            self.selected_yard = None;
        }
    }

    /// Borrar un pátio; si era el seleccionado la selección se limpia
    pub async fn delete_yard(&mut self, id: &EntityId) -> AppResult<()> {
        let result = self.state.yard_service().delete_yard(id).await;
        self.report("Borrar pátio", result)?;
        self.forget_yard(id);
        Ok(())
    }

    pub async fn delete_local_yard(&mut self, id: &EntityId) -> AppResult<()> {
        let result = self.state.yard_service().delete_local_yard(id).await;
        self.report("Borrar pátio local", result)?;
        self.forget_yard(id);
        Ok(())
    }

    async fn apply_yard_edit<F>(&self, edit: F) -> AppResult<Yard>
    where
        F: FnOnce(&mut Yard) -> AppResult<()>,
    {
        let mut yard = self.require_selected_yard()?;
        edit(&mut yard)?;
        yard.validate()?;
        let yard_service = self.state.yard_service();
        yard_service.cache_yard(&yard).await?;
        yard_service.select_yard(&yard).await?;
        Ok(yard)
    }

    /// Editar el pátio seleccionado (zonas, nombre) y guardarlo en la lista y la selección
    pub async fn edit_selected_yard<F>(&mut self, edit: F) -> AppResult<()>
    where
        F: FnOnce(&mut Yard) -> AppResult<()>,
    {
        let result = self.apply_yard_edit(edit).await;
        let yard = self.report("Editar pátio", result)?;
        if let Some(slot) = self.yards.iter_mut().find(|y| y.id == yard.id) {
            *slot = yard.clone();
        }
        self.selected_yard = Some(yard);
        Ok(())
    }

    pub async fn register_vehicle(&mut self, form: RegisterMotoRequest) -> AppResult<Vehicle> {
        let mut form = form;
        if form.patio.is_none() {
            form.patio = self
                .selected_yard
                .as_ref()
                .map(|y| YardRef { id: y.id.clone() });
        }

        let result = self.state.vehicle_service().register(form).await;
        let vehicle = self.report("Registrar moto", result)?;

        let texts = self.state.display.texts();
        self.notifications
            .push(Notification::info(texts.success_title, texts.vehicle_registered));
        self.replace_vehicle(vehicle.clone());
        Ok(vehicle)
    }

    fn vehicle_and_yard(&self, id: &EntityId) -> AppResult<(Vehicle, Yard)> {
        Ok((self.find_vehicle(id)?, self.require_selected_yard()?))
    }

    /// Pendiente -> en el pátio seleccionado
    pub async fn place_vehicle(&mut self, id: &EntityId) -> AppResult<Vehicle> {
        let result = match self.vehicle_and_yard(id) {
            Ok((vehicle, yard)) => {
                self.state
                    .vehicle_service()
                    .place_in_yard(&vehicle, &yard)
                    .await
            }
            Err(e) => Err(e),
        };

        let vehicle = self.report("Ubicar moto", result)?;
        self.replace_vehicle(vehicle.clone());
        Ok(vehicle)
    }

    pub async fn send_to_maintenance(&mut self, id: &EntityId) -> AppResult<Vehicle> {
        let result = match self.find_vehicle(id) {
            Ok(vehicle) => self.state.vehicle_service().send_to_maintenance(&vehicle).await,
            Err(e) => Err(e),
        };

        let vehicle = self.report("Enviar a mantenimiento", result)?;
        self.replace_vehicle(vehicle.clone());
        Ok(vehicle)
    }

    pub async fn return_to_yard(&mut self, id: &EntityId) -> AppResult<Vehicle> {
        let result = match self.vehicle_and_yard(id) {
            Ok((vehicle, yard)) => {
                self.state
                    .vehicle_service()
                    .return_to_yard(&vehicle, &yard)
                    .await
            }
            Err(e) => Err(e),
        };

        let vehicle = self.report("Volver al pátio", result)?;
        self.replace_vehicle(vehicle.clone());
        Ok(vehicle)
    }

    pub async fn update_location(&mut self, id: &EntityId) -> AppResult<Vehicle> {
        let result = match self.find_vehicle(id) {
            Ok(vehicle) => {
                self.state
                    .vehicle_service()
                    .update_location(&vehicle, self.selected_yard.as_ref())
                    .await
            }
            Err(e) => Err(e),
        };

        let vehicle = self.report("Actualizar posición", result)?;
        self.replace_vehicle(vehicle.clone());
        Ok(vehicle)
    }

    /// Nueva lectura de posición para todas las motos del pátio seleccionado
    ///
    /// Devuelve cuántas se actualizaron; cada falla genera su notificación.
    pub async fn refresh_locations(&mut self) -> usize {
        let Some(yard) = self.selected_yard.clone() else {
            return 0;
        };
        let targets: Vec<Vehicle> = self
            .vehicles
            .iter()
            .filter(|v| v.status == VehicleStatus::InYard && v.belongs_to(&yard.id))
            .cloned()
            .collect();

        let service = self.state.vehicle_service();
        let scope = Some(&yard);
        let results = join_all(
            targets
                .iter()
                .map(|vehicle| service.update_location(vehicle, scope)),
        )
        .await;

        let mut updated = 0;
        for result in results {
            if let Ok(vehicle) = self.report("Actualizar posición", result) {
                self.replace_vehicle(vehicle);
                updated += 1;
            }
        }
        updated
    }

    pub async fn delete_vehicle(&mut self, id: &EntityId) -> AppResult<()> {
        let result = self.state.vehicle_service().delete(id).await;
        self.report("Borrar moto", result)?;
        self.vehicles.retain(|v| &v.id != id);
        Ok(())
    }

    pub fn set_observer(&mut self, position: NormalizedPoint) -> AppResult<()> {
        let result = if position.is_finite() {
            Ok(position)
        } else {
            Err(precondition_error("observer position must be a finite point"))
        };
        self.observer = self.report("Mover observador", result)?;
        Ok(())
    }

    pub async fn toggle_theme(&mut self) -> AppResult<Theme> {
        let mut display = self.state.display;
        let result = self
            .state
            .preferences_service()
            .toggle_theme(&mut display)
            .await;
        let theme = self.report("Cambiar tema", result)?;
        self.state.display = display;
        Ok(theme)
    }

    pub async fn change_language(&mut self, language: Language) -> AppResult<()> {
        let mut display = self.state.display;
        let result = self
            .state
            .preferences_service()
            .change_language(&mut display, language)
            .await;
        self.report("Cambiar idioma", result)?;
        self.state.display = display;
        Ok(())
    }

    /// Cerrar sesión y vaciar el tablero
    pub async fn logout(&mut self) -> AppResult<()> {
        let result = self.state.auth_service().logout().await;
        self.report("Cerrar sesión", result)?;
        self.yards.clear();
        self.vehicles.clear();
        self.selected_yard = None;
        self.observer = self.state.config.map.default_observer;
        Ok(())
    }

    /// Motos del pátio seleccionado (todas si no hay selección)
    pub fn vehicles_in_scope(&self) -> Vec<&Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| {
                self.selected_yard
                    .as_ref()
                    .map_or(true, |y| v.belongs_to(&y.id))
            })
            .collect()
    }

    pub fn render(&self) -> MapLayout {
        render_map(
            &self.state.position_model(),
            self.selected_yard.as_ref(),
            &self.vehicles,
            self.observer,
            &self.state.display,
        )
    }

    pub fn summary(&self) -> YardSummary {
        let vehicles: Vec<Vehicle> = self.vehicles_in_scope().into_iter().cloned().collect();
        ReportService::summarize(&vehicles)
    }

    pub fn zone_report(&self) -> Option<ZoneReport> {
        self.selected_yard
            .as_ref()
            .map(|yard| ReportService::summarize_by_zone(yard, &self.vehicles))
    }

    pub fn search(&self, query: &str) -> Vec<&Vehicle> {
        search(&self.vehicles, query)
    }
}

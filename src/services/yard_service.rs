//! Servicio de pátios
//!
//! Listado con cache local, creación remota o local, selección y borrado.
//! Borrar el pátio seleccionado limpia también la selección guardada.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::client::YardApi;
use crate::models::geometry::Rect;
use crate::models::ids::EntityId;
use crate::models::yard::{AnchorPoint, Yard, Zone, DEFAULT_EXTENT};
use crate::storage::{get_json, keys, set_json, KeyValueStore};
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Datos de un pátio a crear
#[derive(Debug, Clone, PartialEq)]
pub struct YardDraft {
    pub name: String,
    pub device_id: Option<String>,
    pub extent: Rect,
    pub zones: Vec<Zone>,
    pub anchors: Vec<AnchorPoint>,
}

impl YardDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            device_id: None,
            extent: DEFAULT_EXTENT,
            zones: Vec::new(),
            anchors: Vec::new(),
        }
    }

    fn into_yard(self) -> AppResult<Yard> {
        let mut yard = Yard::new(&self.name, self.extent)?;
        yard.device_id = self.device_id.filter(|d| !d.trim().is_empty());
        yard.zones = self.zones;
        yard.anchors = self.anchors;
        yard.validate()?;
        Ok(yard)
    }
}

pub struct YardService {
    api: Arc<dyn YardApi>,
    store: Arc<dyn KeyValueStore>,
}

impl YardService {
    pub fn new(api: Arc<dyn YardApi>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { api, store }
    }

    /// Pátios del backend; refresca `@lista_patios`
    ///
    /// Los pátios creados localmente se conservan junto a los remotos. Si el
    /// backend no devuelve ninguno válido se usan los guardados localmente.
    pub async fn list_yards(&self) -> AppResult<Vec<Yard>> {
        let remote = self.api.list_yards().await?;
        let mut yards: Vec<Yard> = remote
            .into_iter()
            .filter(|yard| match yard.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!("⚠️ Pátio {} del backend descartado: {}", yard.id, e);
                    false
                }
            })
            .collect();

        let cached = self.cached_yards().await?;
        if yards.is_empty() {
            if !cached.is_empty() {
                debug!("📦 Backend sin pátios, usando {} guardados", cached.len());
            }
            return Ok(cached);
        }

        let local: Vec<Yard> = cached
            .into_iter()
            .filter(|c| c.id.is_generated() && !yards.iter().any(|y| y.id == c.id))
            .collect();
        if !local.is_empty() {
            debug!("📦 Conservando {} pátios locales", local.len());
        }
        yards.extend(local);

        set_json(self.store.as_ref(), keys::YARD_LIST, &yards).await?;
        Ok(yards)
    }

    pub async fn cached_yards(&self) -> AppResult<Vec<Yard>> {
        Ok(get_json(self.store.as_ref(), keys::YARD_LIST).await?.unwrap_or_default())
    }

    /// Guardar o reemplazar un pátio en `@lista_patios`
    pub(crate) async fn cache_yard(&self, yard: &Yard) -> AppResult<()> {
        let mut yards = self.cached_yards().await?;
        match yards.iter_mut().find(|y| y.id == yard.id) {
            Some(slot) => *slot = yard.clone(),
            None => yards.push(yard.clone()),
        }
        set_json(self.store.as_ref(), keys::YARD_LIST, &yards).await
    }

    /// Crear en el backend y seleccionar
    pub async fn create_yard(&self, draft: YardDraft) -> AppResult<Yard> {
        let yard = draft.into_yard()?;
        let created = self.api.create_yard(&yard).await?;
        self.cache_yard(&created).await?;
        self.select_yard(&created).await?;
        info!("🏗️ Pátio {} creado ({})", created.name, created.id);
        Ok(created)
    }

    /// Crear sólo en el dispositivo y seleccionar
    pub async fn create_local_yard(&self, draft: YardDraft) -> AppResult<Yard> {
        let yard = draft.into_yard()?;
        self.cache_yard(&yard).await?;
        self.select_yard(&yard).await?;
        info!("🏗️ Pátio local {} creado ({})", yard.name, yard.id);
        Ok(yard)
    }

    pub async fn select_yard(&self, yard: &Yard) -> AppResult<()> {
        set_json(self.store.as_ref(), keys::SELECTED_YARD, yard).await
    }

    /// Pátio seleccionado; una entrada ilegible se descarta
    pub async fn selected_yard(&self) -> AppResult<Option<Yard>> {
        match get_json(self.store.as_ref(), keys::SELECTED_YARD).await {
            Ok(yard) => Ok(yard),
            Err(AppError::Serialization(e)) => {
                warn!("⚠️ Pátio seleccionado ilegible, se descarta: {}", e);
                self.store.remove_item(keys::SELECTED_YARD).await?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn clear_selection_if(&self, id: &EntityId) -> AppResult<bool> {
        let selected = self.selected_yard().await?;
        if selected.map_or(false, |y| &y.id == id) {
            self.store.remove_item(keys::SELECTED_YARD).await?;
            info!("🧹 Selección de pátio limpiada");
            return Ok(true);
        }
        Ok(false)
    }

    async fn forget_cached(&self, id: &EntityId) -> AppResult<bool> {
        let mut yards = self.cached_yards().await?;
        let before = yards.len();
        yards.retain(|y| &y.id != id);
        set_json(self.store.as_ref(), keys::YARD_LIST, &yards).await?;
        Ok(yards.len() != before)
    }

    /// Borrar en el backend; devuelve si era el pátio seleccionado
    pub async fn delete_yard(&self, id: &EntityId) -> AppResult<bool> {
        self.api.delete_yard(id).await?;
        self.forget_cached(id).await?;
        self.clear_selection_if(id).await
    }

    /// Borrar un pátio creado localmente
    pub async fn delete_local_yard(&self, id: &EntityId) -> AppResult<bool> {
        if !self.forget_cached(id).await? {
            return Err(not_found_error("Pátio", id.as_str()));
        }
        self.clear_selection_if(id).await
    }

    /// Balizas del pátio (`coordenadasExtremidade`)
    pub async fn fetch_anchors(&self, id: &EntityId) -> AppResult<Vec<AnchorPoint>> {
        let yard = self.api.fetch_yard(id).await?;
        Ok(yard.anchors)
    }
}

//! Almacenamiento en archivo JSON
//!
//! Mantiene todo el mapa en memoria y lo reescribe completo en cada cambio.
//! La memoria sólo cambia cuando la escritura en disco tuvo éxito.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::KeyValueStore;
use crate::utils::errors::AppResult;

const STORE_FILE: &str = "storage.json";

pub struct FileStore {
    path: PathBuf,
    items: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Crear o cargar el store dentro de `dir`
    pub async fn open(dir: &Path) -> AppResult<Self> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(STORE_FILE);

        let items = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(items) => items,
                Err(e) => {
                    warn!("⚠️ Archivo de almacenamiento corrupto {}: {}", path.display(), e);
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        info!("📂 Almacenamiento abierto en {} ({} claves)", path.display(), items.len());
        Ok(Self {
            path,
            items: RwLock::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, items: &HashMap<String, String>) -> AppResult<()> {
        let serialized = serde_json::to_string_pretty(items)?;
        tokio::fs::write(&self.path, serialized).await?;
        debug!("💾 Almacenamiento persistido ({} claves)", items.len());
        Ok(())
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> AppResult<()> {
        let mut items = self.items.write().await;
        let mut next = items.clone();
        next.insert(key.to_string(), value);
        self.persist(&next).await?;
        *items = next;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> AppResult<()> {
        let mut items = self.items.write().await;
        if !items.contains_key(key) {
            return Ok(());
        }
        let mut next = items.clone();
        next.remove(key);
        self.persist(&next).await?;
        *items = next;
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        let mut items = self.items.write().await;
        self.persist(&HashMap::new()).await?;
        items.clear();
        Ok(())
    }
}

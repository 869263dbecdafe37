//! Almacenamiento del dispositivo
//!
//! Almacenamiento clave/valor de strings, con helpers JSON encima.

pub mod file_store;
pub mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::utils::errors::AppResult;

/// Claves usadas por la aplicación
pub mod keys {
    pub const TOKEN: &str = "@token_usuario";
    pub const USER_SESSION: &str = "@usuario_logado";
    pub const SELECTED_YARD: &str = "@patio_selecionado";
    pub const YARD_LIST: &str = "@lista_patios";
    pub const THEME: &str = "@tema";
    pub const LANGUAGE: &str = "@idioma";
}

/// Operaciones de almacenamiento
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, key: &str) -> AppResult<Option<String>>;

    async fn set_item(&self, key: &str, value: String) -> AppResult<()>;

    async fn remove_item(&self, key: &str) -> AppResult<()>;

    async fn clear(&self) -> AppResult<()>;
}

/// Leer y deserializar un valor JSON
pub async fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> AppResult<Option<T>> {
    match store.get_item(key).await? {
        Some(raw) => {
            debug!("📥 Leyendo {} del almacenamiento", key);
            Ok(Some(serde_json::from_str(&raw)?))
        }
        None => Ok(None),
    }
}

/// Serializar y guardar un valor JSON
pub async fn set_json<T: Serialize + Sync>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> AppResult<()> {
    let serialized = serde_json::to_string(value)?;
    store.set_item(key, serialized).await?;
    debug!("💾 Guardado {} en el almacenamiento", key);
    Ok(())
}

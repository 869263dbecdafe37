//! Preferencias de tema e idioma guardadas en el dispositivo

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::display::{DisplayConfig, Language, Theme};
use crate::storage::{keys, KeyValueStore};
use crate::utils::errors::AppResult;

pub struct PreferencesService {
    store: Arc<dyn KeyValueStore>,
}

impl PreferencesService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Valores guardados; lo ausente o desconocido cae en el default
    pub async fn load(&self) -> AppResult<DisplayConfig> {
        let theme = match self.store.get_item(keys::THEME).await? {
            Some(raw) => raw.parse::<Theme>().unwrap_or_else(|e| {
                warn!("⚠️ Tema guardado inválido: {}", e);
                Theme::default()
            }),
            None => Theme::default(),
        };
        let language = match self.store.get_item(keys::LANGUAGE).await? {
            Some(raw) => raw.parse::<Language>().unwrap_or_else(|e| {
                warn!("⚠️ Idioma guardado inválido: {}", e);
                Language::default()
            }),
            None => Language::default(),
        };
        Ok(DisplayConfig::new(theme, language))
    }

    pub async fn save(&self, config: &DisplayConfig) -> AppResult<()> {
        self.store.set_item(keys::THEME, config.theme.as_str().to_string()).await?;
        self.store
            .set_item(keys::LANGUAGE, config.language.as_str().to_string())
            .await
    }

    pub async fn toggle_theme(&self, config: &mut DisplayConfig) -> AppResult<Theme> {
        config.theme = config.theme.toggled();
        self.store.set_item(keys::THEME, config.theme.as_str().to_string()).await?;
        info!("🎨 Tema cambiado a {}", config.theme.as_str());
        Ok(config.theme)
    }

    pub async fn change_language(&self, config: &mut DisplayConfig, language: Language) -> AppResult<()> {
        config.language = language;
        self.store.set_item(keys::LANGUAGE, language.as_str().to_string()).await?;
        info!("🌐 Idioma cambiado a {}", language);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_defaults_and_persistence() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let prefs = PreferencesService::new(store.clone());

        let mut config = prefs.load().await.unwrap();
        assert_eq!(config, DisplayConfig::default());

        assert_eq!(prefs.toggle_theme(&mut config).await.unwrap(), Theme::Dark);
        prefs.change_language(&mut config, Language::Es).await.unwrap();

        assert_eq!(store.get_item(keys::THEME).await.unwrap().as_deref(), Some("escuro"));
        assert_eq!(prefs.load().await.unwrap(), DisplayConfig::new(Theme::Dark, Language::Es));
    }

    #[tokio::test]
    async fn test_unknown_values_fall_back() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set_item(keys::THEME, "sepia".to_string()).await.unwrap();
        store.set_item(keys::LANGUAGE, "fr".to_string()).await.unwrap();

        let config = PreferencesService::new(store).load().await.unwrap();
        assert_eq!(config, DisplayConfig::default());
    }
}

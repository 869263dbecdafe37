use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::client::YardApi;
use crate::config::display::Language;
use crate::dto::auth_dto::{LoginRequest, RegisterUserRequest, UserRole};
use crate::models::session::UserSession;
use crate::storage::{get_json, keys, set_json, KeyValueStore};
use crate::utils::errors::{AppError, AppResult};

/// Servicio de autenticación
pub struct AuthService {
    api: Arc<dyn YardApi>,
    store: Arc<dyn KeyValueStore>,
}

impl AuthService {
    pub fn new(api: Arc<dyn YardApi>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { api, store }
    }

    /// Login y persistencia de token y sesión
    pub async fn login(&self, usuario: &str, senha: &str, lang: Language) -> AppResult<UserSession> {
        if usuario.trim().is_empty() {
            return Err(AppError::MissingField("email"));
        }
        if senha.is_empty() {
            return Err(AppError::MissingField("senha"));
        }

        let request = LoginRequest {
            email: usuario.trim().to_string(),
            senha: senha.to_string(),
        };
        let response = self.api.login(&request).await?;

        self.store.set_item(keys::TOKEN, response.token.clone()).await?;
        let session = UserSession::new(request.email, lang, Some(response.token));
        set_json(self.store.as_ref(), keys::USER_SESSION, &session).await?;

        info!("✅ Sesión iniciada para {}", session.usuario);
        Ok(session)
    }

    /// Registrar un usuario con el perfil indicado
    pub async fn register_user(&self, role: UserRole, request: RegisterUserRequest) -> AppResult<()> {
        let request = RegisterUserRequest {
            nome: request.nome.trim().to_string(),
            email: request.email.trim().to_string(),
            ..request
        };
        request.validate()?;

        self.api.register_user(role, &request).await?;
        info!("👤 Usuario {} registrado como {}", request.email, role);
        Ok(())
    }

    pub async fn current_session(&self) -> AppResult<Option<UserSession>> {
        get_json(self.store.as_ref(), keys::USER_SESSION).await
    }

    /// Cerrar sesión: se limpia todo el almacenamiento
    pub async fn logout(&self) -> AppResult<()> {
        self.store.clear().await?;
        info!("👋 Sesión cerrada");
        Ok(())
    }
}

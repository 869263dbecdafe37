//! Cliente HTTP de la API de pátios y motos
//!
//! `YardApi` es la frontera con el backend. `HttpYardApi` la implementa con
//! `reqwest`, agregando el token Bearer guardado en el dispositivo.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterUserRequest, UserRole};
use crate::dto::moto_dto::{LocationPayload, RegisterMotoRequest};
use crate::models::geometry::NormalizedPoint;
use crate::models::ids::EntityId;
use crate::models::session::UserSession;
use crate::models::vehicle::Vehicle;
use crate::models::yard::Yard;
use crate::storage::{get_json, keys, KeyValueStore};
use crate::utils::errors::{AppError, AppResult};

/// Operaciones remotas
#[async_trait]
pub trait YardApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse>;

    async fn register_user(&self, role: UserRole, request: &RegisterUserRequest) -> AppResult<()>;

    async fn list_yards(&self) -> AppResult<Vec<Yard>>;

    /// Pátio completo, incluidas las balizas
    async fn fetch_yard(&self, id: &EntityId) -> AppResult<Yard>;

    async fn create_yard(&self, yard: &Yard) -> AppResult<Yard>;

    async fn delete_yard(&self, id: &EntityId) -> AppResult<()>;

    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>>;

    async fn register_vehicle(&self, request: &RegisterMotoRequest) -> AppResult<Vehicle>;

    async fn update_vehicle(&self, vehicle: &Vehicle) -> AppResult<Vehicle>;

    async fn delete_vehicle(&self, id: &EntityId) -> AppResult<()>;

    async fn fetch_location(&self, id: &EntityId) -> AppResult<NormalizedPoint>;

    async fn update_location(&self, id: &EntityId, position: NormalizedPoint) -> AppResult<()>;
}

/// Cuerpo de error del backend; el campo varía según el endpoint
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    mensagem: Option<String>,
    erro: Option<String>,
}

/// Convertir una respuesta no exitosa en error
fn error_from_status(status: StatusCode, body: &str) -> AppError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .or(parsed.mensagem)
        .or(parsed.erro)
        .unwrap_or_default();

    if status == StatusCode::UNAUTHORIZED {
        AppError::Unauthorized(message)
    } else {
        AppError::Server {
            status: status.as_u16(),
            message,
        }
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Implementación HTTP
pub struct HttpYardApi {
    client: Client,
    base_url: String,
    store: Arc<dyn KeyValueStore>,
}

impl HttpYardApi {
    /// Crear el cliente con el timeout configurado
    pub fn new(
        base_url: impl Into<String>,
        timeout_secs: u64,
        store: Arc<dyn KeyValueStore>,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token guardado; cae en la sesión si `@token_usuario` no existe
    async fn bearer_token(&self) -> AppResult<Option<String>> {
        if let Some(token) = self.store.get_item(keys::TOKEN).await? {
            return Ok(Some(token));
        }
        let session: Option<UserSession> = get_json(self.store.as_ref(), keys::USER_SESSION).await?;
        Ok(session.and_then(|s| s.token))
    }

    async fn request(&self, method: Method, path: &str) -> AppResult<RequestBuilder> {
        let url = join_url(&self.base_url, path);
        debug!("🌐 {} {}", method, url);

        let builder = self
            .client
            .request(method, url)
            .header("Accept", "application/json");

        Ok(match self.bearer_token().await? {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn check(response: Response) -> AppResult<Response> {
        let status = response.status();
        debug!("📡 Response status: {}", status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = error_from_status(status, &body);
        if status == StatusCode::UNAUTHORIZED {
            warn!("🔒 Sesión rechazada por el servidor");
        } else {
            error!("❌ Request failed with status {}: {}", status, body);
        }
        Err(err)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let response = Self::check(builder.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_empty(&self, builder: RequestBuilder) -> AppResult<()> {
        Self::check(builder.send().await?).await?;
        Ok(())
    }
}

#[async_trait]
impl YardApi for HttpYardApi {
    async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        info!("🔐 Login de {}", request.email);
        let url = join_url(&self.base_url, "login");
        let response: LoginResponse = self.send_json(self.client.post(url).json(request)).await?;
        info!("✅ Login exitoso para {}", request.email);
        Ok(response)
    }

    async fn register_user(&self, role: UserRole, request: &RegisterUserRequest) -> AppResult<()> {
        info!("👤 Registrando usuario {} como {}", request.email, role);
        let path = format!("usuarios/{}", role.path_segment());
        let builder = self.request(Method::POST, &path).await?.json(request);
        self.send_empty(builder).await
    }

    async fn list_yards(&self) -> AppResult<Vec<Yard>> {
        let builder = self.request(Method::GET, "patios").await?;
        let yards: Vec<Yard> = self.send_json(builder).await?;
        info!("🏗️ {} pátios recibidos", yards.len());
        Ok(yards)
    }

    async fn fetch_yard(&self, id: &EntityId) -> AppResult<Yard> {
        let builder = self.request(Method::GET, &format!("patios/{}", id)).await?;
        self.send_json(builder).await
    }

    async fn create_yard(&self, yard: &Yard) -> AppResult<Yard> {
        info!("🏗️ Creando pátio {}", yard.name);
        let builder = self.request(Method::POST, "patios").await?.json(yard);
        self.send_json(builder).await
    }

    async fn delete_yard(&self, id: &EntityId) -> AppResult<()> {
        info!("🗑️ Eliminando pátio {}", id);
        let builder = self.request(Method::DELETE, &format!("patios/{}", id)).await?;
        self.send_empty(builder).await
    }

    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let builder = self.request(Method::GET, "motos").await?;
        let vehicles: Vec<Vehicle> = self.send_json(builder).await?;
        info!("🏍️ {} motos recibidas", vehicles.len());
        Ok(vehicles.into_iter().map(Vehicle::reconcile).collect())
    }

    async fn register_vehicle(&self, request: &RegisterMotoRequest) -> AppResult<Vehicle> {
        let builder = self.request(Method::POST, "motos").await?.json(request);
        let vehicle: Vehicle = self.send_json(builder).await?;
        Ok(vehicle.reconcile())
    }

    async fn update_vehicle(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let builder = self
            .request(Method::PUT, &format!("motos/{}", vehicle.id))
            .await?
            .json(vehicle);
        let updated: Vehicle = self.send_json(builder).await?;
        Ok(updated.reconcile())
    }

    async fn delete_vehicle(&self, id: &EntityId) -> AppResult<()> {
        info!("🗑️ Eliminando moto {}", id);
        let builder = self.request(Method::DELETE, &format!("motos/{}", id)).await?;
        self.send_empty(builder).await
    }

    async fn fetch_location(&self, id: &EntityId) -> AppResult<NormalizedPoint> {
        let builder = self
            .request(Method::GET, &format!("motos/{}/localizacao", id))
            .await?;
        let location: LocationPayload = self.send_json(builder).await?;
        Ok(location)
    }

    async fn update_location(&self, id: &EntityId, position: NormalizedPoint) -> AppResult<()> {
        debug!("📍 Moto {} -> ({:.3}, {:.3})", id, position.x, position.y);
        let payload: LocationPayload = position;
        let builder = self
            .request(Method::PUT, &format!("motos/{}/localizacao", id))
            .await?
            .json(&payload);
        self.send_empty(builder).await
    }
}

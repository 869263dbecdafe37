//! Cliente de rastreo de motos en pátios
//!
//! Núcleo del cliente del operador: modelo de posiciones del mapa, ciclo de
//! vida de las motos, pátios con zonas, frontera con la API remota y
//! almacenamiento del dispositivo.

pub mod board;
pub mod client;
pub mod config;
pub mod dto;
pub mod map;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use board::{RefreshReport, RefreshTarget, YardBoard};
pub use client::{HttpYardApi, YardApi};
pub use state::AppState;
pub use utils::errors::{AppError, AppResult, ErrorKind};

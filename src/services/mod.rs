//! Services module
//!
//! Este módulo contiene la lógica de negocio del cliente. Los servicios
//! reciben la API remota, el almacenamiento y la fuente de posiciones por
//! constructor.

pub mod auth_service;
pub mod position_source;
pub mod preferences_service;
pub mod report_service;
pub mod vehicle_service;
pub mod yard_service;

pub use auth_service::AuthService;
pub use position_source::{
    build_position_source, HardwarePositionSource, PositionSource, SimulatedPositionSource,
};
pub use preferences_service::PreferencesService;
pub use report_service::ReportService;
pub use vehicle_service::{search, VehicleService};
pub use yard_service::{YardDraft, YardService};

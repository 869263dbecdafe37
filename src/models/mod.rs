//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos del cliente. Los nombres
//! serializados siguen exactamente los campos de la API del backend.

pub mod geometry;
pub mod ids;
pub mod report;
pub mod session;
pub mod vehicle;
pub mod yard;

pub use geometry::{CanvasPoint, NormalizedPoint, Rect};
pub use ids::EntityId;
pub use vehicle::{Category, MotoModel, RepairClass, Vehicle, VehicleStatus, YardRef};
pub use yard::{AnchorPoint, Yard, Zone};


//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! y notificaciones al usuario.

pub mod errors;
pub mod notification;
pub mod validation;

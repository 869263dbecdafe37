//! DTOs de la API
//!
//! Payloads de request/response que no son entidades del dominio.

pub mod auth_dto;
pub mod moto_dto;

pub use auth_dto::{LoginRequest, LoginResponse, RegisterUserRequest, UserRole};
pub use moto_dto::{LocationPayload, RegisterMotoRequest};

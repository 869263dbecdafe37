//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! de motos, pátios y coordenadas normalizadas.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use validator::ValidationError;

lazy_static! {
    // Formato antiguo (ABC1234) y Mercosul (ABC1D23)
    static ref PLATE_RE: Regex = Regex::new(r"^[A-Z]{3}[0-9][A-Z0-9][0-9]{2}$").unwrap();
    // VIN: 17 caracteres, sin I, O ni Q
    static ref CHASSIS_RE: Regex = Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").unwrap();
    static ref GENERATED_CODE_RE: Regex = Regex::new(r"^MOTO-[0-9]+$").unwrap();
}

/// Normaliza una placa: mayúsculas, sin espacios ni guiones
pub fn normalize_plate(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .to_uppercase()
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de placa brasileña
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    if !PLATE_RE.is_match(&normalize_plate(value)) {
        let mut error = ValidationError::new("license_plate");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"ABC1234 or ABC1D23".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de chassi (VIN)
pub fn validate_chassis(value: &str) -> Result<(), ValidationError> {
    if !CHASSIS_RE.is_match(&value.trim().to_uppercase()) {
        let mut error = ValidationError::new("chassis");
        error.add_param("value".into(), &value.to_string());
        error.add_param("length".into(), &17);
        return Err(error);
    }
    Ok(())
}

/// Un código generado por el cliente tiene la forma `MOTO-<dígitos>`
pub fn is_generated_code(value: &str) -> bool {
    GENERATED_CODE_RE.is_match(value)
}

/// Validar que una coordenada normalizada esté en [0, 1]
pub fn validate_normalized(value: f64) -> Result<(), ValidationError> {
    if !(0.0..=1.0).contains(&value) {
        let mut error = ValidationError::new("normalized");
        error.add_param("value".into(), &value);
        error.add_param("range".into(), &"0.0 to 1.0".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar formato de email (básico)
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if !value.contains('@') || !value.contains('.') {
        let mut error = ValidationError::new("email");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_license_plate() {
        assert!(validate_license_plate("ABC1234").is_ok());
        assert!(validate_license_plate("abc-1d23").is_ok());
        assert!(validate_license_plate("AB1234").is_err());
        assert!(validate_license_plate("ABCD123").is_err());
    }

    #[test]
    fn test_validate_chassis() {
        assert!(validate_chassis("9C2KC1670JR123456").is_ok());
        assert!(validate_chassis("9C2KC1670JR12345").is_err());
        assert!(validate_chassis("9C2KC1670OR123456").is_err());
    }

    #[test]
    fn test_generated_code() {
        assert!(is_generated_code("MOTO-1718000000000"));
        assert!(!is_generated_code("MOTO-"));
        assert!(!is_generated_code("moto-12"));
    }

    #[test]
    fn test_validate_normalized() {
        assert!(validate_normalized(0.0).is_ok());
        assert!(validate_normalized(1.0).is_ok());
        assert!(validate_normalized(-0.01).is_err());
        assert!(validate_normalized(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(5.0).is_ok());
        assert!(validate_positive(0.0).is_err());
        assert!(validate_non_negative(0.0).is_ok());
        assert!(validate_non_negative(-1.0).is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Pátio Central").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("operador@mottu.com").is_ok());
        assert!(validate_email("operador").is_err());
    }
}

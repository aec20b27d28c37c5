//! Utilidades de validación
//!
//! Validadores custom para `validator` y helpers de montos.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    /// Matrículas: letras, cifras, espacios y guiones (ej. "TG-1234-AB")
    static ref PLATE_RE: Regex = Regex::new(r"^[A-Z0-9][A-Z0-9 \-]{2,19}$").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"^\+?[0-9 ]{6,20}$").unwrap();
}

/// Normalizar matrícula (mayúsculas, sin espacios sobrantes)
pub fn normalize_plate(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Validar formato de matrícula
pub fn validate_plate(value: &str) -> Result<(), ValidationError> {
    if !PLATE_RE.is_match(&normalize_plate(value)) {
        let mut error = ValidationError::new("plate");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if !PHONE_RE.is_match(value.trim()) {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Validar un monto en FCFA: no negativo y como máximo 10 dígitos con 2 decimales
pub fn validate_amount(value: &Decimal) -> Result<(), ValidationError> {
    let max = Decimal::new(99_999_999_99, 2);
    if value.is_sign_negative() || *value > max || value.scale() > 2 {
        let mut error = ValidationError::new("amount");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_plate() {
        assert!(validate_plate("TG-1234-AB").is_ok());
        assert!(validate_plate(" tg 4521 bc ").is_ok());
        assert!(validate_plate("").is_err());
        assert!(validate_plate("#$%").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+228 90 12 34 56").is_ok());
        assert!(validate_phone("abc").is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(&Decimal::from(5000)).is_ok());
        assert!(validate_amount(&Decimal::ZERO).is_ok());
        assert!(validate_amount(&Decimal::from(-1)).is_err());
        assert!(validate_amount(&Decimal::new(1, 3)).is_err());
    }
}

//! Chequeos de presencia compartidos por los payloads de alta y cambio.

use serde::{Deserialize, Deserializer};

use crate::DomainError;

/// Exige un texto presente y no vacío. El valor se conserva tal cual llegó
/// (sin recortar) para que el round-trip no altere lo enviado.
pub(crate) fn requerido(valor: Option<String>, campo: &str) -> Result<String, DomainError> {
    match valor {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(DomainError::CampoRequerido(campo.to_string())),
    }
}

/// Exige un valor presente de cualquier tipo (ids, fechas).
pub(crate) fn presente<T>(valor: Option<T>, campo: &str) -> Result<T, DomainError> {
    valor.ok_or_else(|| DomainError::CampoRequerido(campo.to_string()))
}

/// En actualizaciones: si el campo llega, no puede venir vacío.
pub(crate) fn no_vacio(valor: Option<String>, campo: &str) -> Result<Option<String>, DomainError> {
    match valor {
        Some(v) if v.trim().is_empty() => Err(DomainError::CampoRequerido(campo.to_string())),
        otro => Ok(otro),
    }
}

/// Campo anulable de un payload de cambios: ausente queda `None` (vía
/// `#[serde(default)]`) y `null` explícito llega como `Some(None)`.
pub(crate) fn anulable<'de, T, D>(d: D) -> Result<Option<Option<T>>, D::Error>
    where T: Deserialize<'de>,
          D: Deserializer<'de>
{
    Option::<T>::deserialize(d).map(Some)
}

/// Escala 1..=5 usada por probabilidad e impacto de riesgos.
pub(crate) fn en_escala(valor: i32, campo: &str) -> Result<i32, DomainError> {
    if (1..=5).contains(&valor) {
        Ok(valor)
    } else {
        Err(DomainError::Validacion(format!("{campo} debe estar entre 1 y 5 (recibido {valor})")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requerido_rechaza_vacio_y_ausente() {
        assert_eq!(requerido(None, "codigo"), Err(DomainError::CampoRequerido("codigo".into())));
        assert_eq!(requerido(Some("   ".into()), "codigo"), Err(DomainError::CampoRequerido("codigo".into())));
        assert_eq!(requerido(Some(" P-01".into()), "codigo").unwrap(), " P-01");
    }

    #[test]
    fn escala_fuera_de_rango() {
        assert!(en_escala(0, "impacto").is_err());
        assert!(en_escala(6, "impacto").is_err());
        assert_eq!(en_escala(5, "impacto").unwrap(), 5);
    }
}

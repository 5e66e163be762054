use thiserror::Error;

/// Error del dominio: sólo validaciones, el dominio no hace I/O.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("campo requerido: {0}")]
    CampoRequerido(String),
    #[error("validación fallida: {0}")]
    Validacion(String),
    /// La operación choca con el estado actual del registro (p. ej. bloqueo).
    #[error("operación no permitida: {0}")]
    NoPermitido(String),
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Validacion(e.to_string())
    }
}

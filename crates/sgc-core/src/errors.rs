//! Errores del core. Cada variante corresponde a una clase de respuesta
//! HTTP (ver `sgc-api`).

use sgc_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CoreError {
    /// Payload inválido o referencia inexistente (400).
    #[error("{0}")] Validacion(String),
    /// El registro pedido no existe (404).
    #[error("{0}")] NoEncontrado(String),
    /// Unicidad violada o choque con el estado actual (409).
    #[error("{0}")] Conflicto(String),
    /// Falla del almacenamiento de objetos (500).
    #[error("error de almacenamiento: {0}")] Almacenamiento(String),
    #[error("error interno: {0}")] Interno(String),
}

impl From<DomainError> for CoreError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NoPermitido(m) => CoreError::Conflicto(m),
            otro => CoreError::Validacion(otro.to_string()),
        }
    }
}

impl CoreError {
    pub fn no_encontrado(entidad: &str, id: uuid::Uuid) -> Self {
        CoreError::NoEncontrado(format!("{entidad} no encontrado: {id}"))
    }
}

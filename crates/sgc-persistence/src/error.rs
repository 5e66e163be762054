//! Errores de persistencia.
//! Mapea errores de Diesel / conexión a variantes semánticas y éstas a
//! `CoreError`.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use sgc_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("unique violation: {0}")]
    UniqueViolation(String),
    #[error("check violation: {0}")]
    CheckViolation(String),
    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),
    #[error("not null violation: {0}")]
    NotNullViolation(String),
    #[error("not found")]
    NotFound,
    #[error("connection pool error: {0}")]
    Pool(String),
    #[error("configuración inválida: {0}")]
    Configuracion(String),
    /// Fila con un valor que el dominio no reconoce (p. ej. un estado).
    #[error("fila inválida: {0}")]
    FilaInvalida(String),
    #[error("unknown database error: {0}")]
    Unknown(String),
}

impl From<DieselError> for PersistenceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::UniqueViolation => Self::UniqueViolation(info.message().to_string()),
                DatabaseErrorKind::CheckViolation => Self::CheckViolation(info.message().to_string()),
                DatabaseErrorKind::ForeignKeyViolation => Self::ForeignKeyViolation(info.message().to_string()),
                DatabaseErrorKind::NotNullViolation => Self::NotNullViolation(info.message().to_string()),
                other => Self::Unknown(format!("db error kind {:?}: {}", other, info.message())),
            },
            DieselError::DeserializationError(e) => Self::Unknown(format!("deser: {e}")),
            DieselError::SerializationError(e) => Self::Unknown(format!("ser: {e}")),
            DieselError::QueryBuilderError(e) => Self::Unknown(format!("query builder: {e}")),
            other => Self::Unknown(format!("unhandled diesel error: {other:?}")),
        }
    }
}

impl From<PersistenceError> for CoreError {
    fn from(e: PersistenceError) -> Self {
        match e {
            PersistenceError::UniqueViolation(m) => CoreError::Conflicto(format!("registro duplicado: {m}")),
            PersistenceError::ForeignKeyViolation(m) => CoreError::Validacion(format!("referencia inválida: {m}")),
            PersistenceError::CheckViolation(m) | PersistenceError::NotNullViolation(m) => CoreError::Validacion(m),
            PersistenceError::NotFound => CoreError::NoEncontrado("registro no encontrado".into()),
            otro => CoreError::Interno(otro.to_string()),
        }
    }
}

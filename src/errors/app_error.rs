use sgc_persistence::PersistenceError;
use sgc_storage::StorageError;
use thiserror::Error;

/// Errores de arranque del servidor.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error de persistencia: {0}")]
    Persistencia(#[from] PersistenceError),
    #[error("Error de almacenamiento: {0}")]
    Almacenamiento(#[from] StorageError),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error interno: {0}")]
    Interno(String),
}

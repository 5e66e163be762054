//! Errores del cliente de almacenamiento de objetos.

use sgc_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("error HTTP de almacenamiento: {0}")]
    Http(#[from] reqwest::Error),

    /// El servicio respondió con un estado no exitoso.
    #[error("almacenamiento respondió {status}: {mensaje}")]
    Estado { status: u16, mensaje: String },

    #[error("objeto no encontrado: {0}")]
    NoEncontrado(String),

    #[error("configuración de almacenamiento inválida: {0}")]
    Configuracion(String),
}

impl From<StorageError> for CoreError {
    fn from(e: StorageError) -> Self {
        CoreError::Almacenamiento(e.to_string())
    }
}

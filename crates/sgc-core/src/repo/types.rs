//! Contrato de almacenamiento por entidad.
//!
//! Las operaciones son síncronas: la implementación Postgres usa Diesel y la
//! capa HTTP las ejecuta en `spawn_blocking`. Cada operación es una sola
//! sentencia; no hay transacciones entre llamadas.
use sgc_domain::{Condicion, Entidad};
use uuid::Uuid;

use crate::errors::CoreError;

pub trait Repositorio<E: Entidad>: Send + Sync {
    /// Inserta un registro nuevo y devuelve lo persistido.
    fn insertar(&self, entidad: &E) -> Result<E, CoreError>;
    /// Reemplaza el registro con el mismo id. `None` si no existe.
    fn actualizar(&self, entidad: &E) -> Result<Option<E>, CoreError>;
    fn obtener(&self, id: Uuid) -> Result<Option<E>, CoreError>;
    /// Registros que cumplen todas las condiciones, del más reciente al más
    /// antiguo según `Entidad::marca_orden`.
    fn listar(&self, condiciones: &[Condicion]) -> Result<Vec<E>, CoreError>;
    /// Elimina y devuelve el registro borrado. `None` si no existía.
    fn eliminar(&self, id: Uuid) -> Result<Option<E>, CoreError>;
}

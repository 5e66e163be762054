//! sgc-core: repositorios y reglas de negocio del SGC.
pub mod errors;
pub mod repo;
pub mod servicio;

pub use errors::CoreError;
pub use repo::{EnMemoria, Repositorio, RepositorioDe, Repositorios};
pub use servicio::transiciones::{ArchivoSubido, ResultadoAvance};
pub use servicio::{eliminar, listar, obtener, Actualizable, Alta, Modificacion};

//! sgc-persistence
//!
//! Persistencia Postgres (Diesel + r2d2) de las entidades del SGC con
//! paridad respecto a los repositorios en memoria de `sgc-core`.
//!
//! Módulos:
//! - `pg`: pool, proveedor de conexiones y `PgRepositorio`.
//! - `migrations`: runner embebido de migraciones Diesel.
//! - `config`: configuración desde variables de entorno / `.env`.
//! - `schema`: tablas Diesel.

pub mod config;
pub mod error;
pub mod migrations;
pub mod pg;
pub mod schema;

pub use config::DbConfig;
pub use error::PersistenceError;
pub use pg::{build_pool, repositorio_desde_pool, ConnectionProvider, PgPool, PgRepositorio, PoolProvider};

use sgc_core::Repositorios;

/// Repositorios del SGC sobre un pool ya migrado.
pub fn repositorios_pg(pool: PgPool) -> Repositorios {
    Repositorios::desde(repositorio_desde_pool(pool))
}

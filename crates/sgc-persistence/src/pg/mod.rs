//! Implementación Postgres (Diesel) de los repositorios del core.
//!
//! - Pool r2d2 construido desde `DbConfig`; las migraciones pendientes se
//!   aplican una sola vez al construirlo.
//! - `PgRepositorio` implementa `Repositorio<E>` para las 16 entidades y se
//!   comparte entre todas vía `Repositorios::desde`.

mod filas;
mod repositorio;

use diesel::pg::PgConnection;
use diesel::r2d2::{self, ConnectionManager};
use log::{info, warn};

use crate::config::DbConfig;
use crate::error::PersistenceError;
use crate::migrations::run_pending_migrations;

pub use filas::Columna;
pub use repositorio::PgRepositorio;

/// Pool r2d2 de conexiones Postgres (`min_idle` / `max_size`).
pub type PgPool = r2d2::Pool<ConnectionManager<PgConnection>>;

pub type PgPooledConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

/// Proveedor abstracto de conexiones. Permite inyectar el pool real o uno
/// de pruebas sin acoplar los repositorios a r2d2.
pub trait ConnectionProvider: Send + Sync + 'static {
    fn connection(&self) -> Result<PgPooledConnection, PersistenceError>;
}

#[derive(Clone)]
pub struct PoolProvider {
    pub pool: PgPool,
}

impl ConnectionProvider for PoolProvider {
    fn connection(&self) -> Result<PgPooledConnection, PersistenceError> {
        self.pool
            .get()
            .map_err(|e| PersistenceError::Pool(format!("pool error: {e}")))
    }
}

/// Construye el pool y corre las migraciones pendientes. Tamaños en cero se
/// elevan a 1; si `min > max` se ajusta `min = max`.
pub fn build_pool(cfg: &DbConfig) -> Result<PgPool, PersistenceError> {
    let min = cfg.min_connections.max(1);
    let max = cfg.max_connections.max(1);
    if min > max {
        warn!("min_connections > max_connections ({min} > {max}), ajustando min=max");
    }
    let manager = ConnectionManager::<PgConnection>::new(cfg.url.as_str());
    let pool = r2d2::Pool::builder().min_idle(Some(min.min(max)))
                                    .max_size(max)
                                    .build(manager)
                                    .map_err(|e| PersistenceError::Pool(format!("pool build: {e}")))?;
    {
        let mut conn = pool.get()
                           .map_err(|e| PersistenceError::Pool(format!("pool get for migrations: {e}")))?;
        run_pending_migrations(&mut conn)?;
    }
    info!("pool Postgres listo (min={}, max={max})", min.min(max));
    Ok(pool)
}

/// Repositorio Postgres listo para `Repositorios::desde`.
pub fn repositorio_desde_pool(pool: PgPool) -> PgRepositorio<PoolProvider> {
    PgRepositorio::new(PoolProvider { pool })
}

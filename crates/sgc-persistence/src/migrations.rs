//! Runner de las migraciones SQL embebidas (`migrations/` de este crate).
//! Se ejecutan una vez al construir el pool.

use diesel::pg::PgConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::debug;

use crate::error::PersistenceError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub fn run_pending_migrations(conn: &mut PgConnection) -> Result<(), PersistenceError> {
    let aplicadas = conn.run_pending_migrations(MIGRATIONS)
                        .map_err(|e| PersistenceError::Unknown(format!("migration error: {e}")))?;
    debug!("{} migración(es) aplicada(s)", aplicadas.len());
    Ok(())
}

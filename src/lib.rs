//! sgc-rust
//!
//! Cableado de la aplicación: configuración explícita y construcción del
//! estado compartido (repositorios y almacenamiento) que consume el router.

pub mod config;
pub mod errors;

use std::sync::Arc;

use sgc_api::AppState;
use sgc_core::Repositorios;
use sgc_persistence::{build_pool, repositorios_pg};
use sgc_storage::{AlmacenamientoEnMemoria, Almacenamiento, HttpAlmacenamiento};
use tracing::{info, warn};

pub use config::AppConfig;
pub use errors::AppError;

/// Construye el estado a partir de la configuración. Bloqueante: el pool
/// abre conexiones y corre migraciones.
pub fn construir_estado(cfg: &AppConfig) -> Result<AppState, AppError> {
    let repos = match &cfg.db {
        Some(db) => {
            let pool = build_pool(db)?;
            info!("repositorios Postgres");
            repositorios_pg(pool)
        }
        None => {
            warn!("sin DATABASE_URL: repositorios en memoria (los datos no persisten)");
            Repositorios::en_memoria()
        }
    };
    let almacenamiento: Arc<dyn Almacenamiento> = match &cfg.almacenamiento {
        Some(s) => Arc::new(HttpAlmacenamiento::new(s)?),
        None => {
            warn!("sin SGC_STORAGE_URL: almacenamiento en memoria");
            Arc::new(AlmacenamientoEnMemoria::new())
        }
    };
    Ok(AppState::new(repos, almacenamiento))
}

//! Configuración central de la aplicación.
//!
//! Se lee una sola vez desde el entorno (y `.env`) y se pasa explícitamente
//! a las fábricas (`build_pool`, cliente de almacenamiento). Sin base de
//! datos ni almacenamiento configurados se usan los backends en memoria.

use std::env;
use std::net::SocketAddr;

use sgc_persistence::DbConfig;
use sgc_storage::StorageConfig;

use crate::errors::AppError;

pub const DIRECCION_POR_DEFECTO: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub direccion: SocketAddr,
    /// `None`: repositorios en memoria.
    pub db: Option<DbConfig>,
    /// `None`: almacenamiento en memoria.
    pub almacenamiento: Option<StorageConfig>,
    pub log_json: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();
        Self::desde_variables(|k| env::var(k).ok())
    }

    pub fn desde_variables<F>(var: F) -> Result<Self, AppError>
        where F: Fn(&str) -> Option<String>
    {
        let crudo = var("SGC_DIRECCION").unwrap_or_else(|| DIRECCION_POR_DEFECTO.to_string());
        let direccion = crudo.parse()
                             .map_err(|_| AppError::Config(format!("SGC_DIRECCION no es una dirección válida: {crudo}")))?;
        let db = DbConfig::desde_variables(&var)?;
        let almacenamiento = match var("SGC_STORAGE_URL").filter(|u| !u.trim().is_empty()) {
            None => None,
            Some(url) => {
                let clave = var("SGC_STORAGE_KEY").filter(|k| !k.trim().is_empty())
                                                  .ok_or_else(|| {
                                                      AppError::Config("SGC_STORAGE_URL requiere SGC_STORAGE_KEY".into())
                                                  })?;
                Some(StorageConfig { url, clave })
            }
        };
        let log_json = matches!(var("SGC_LOG_JSON").as_deref(), Some("1" | "true"));
        Ok(Self { direccion,
                  db,
                  almacenamiento,
                  log_json })
    }
}

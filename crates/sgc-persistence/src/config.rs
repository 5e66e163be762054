//! Configuración de conexión a partir de variables de entorno.
//!
//! Convención: `DATABASE_URL` y parámetros opcionales del pool. Con
//! `SGC_ENTORNO=test` se usa `TEST_DATABASE_URL`. La configuración es un
//! valor explícito que se pasa a `build_pool`; no hay estado global.

use std::env;

use log::warn;

use crate::error::PersistenceError;

pub const ENTORNO_PRUEBAS: &str = "test";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
}

impl DbConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(),
               min_connections: 2,
               max_connections: 16 }
    }

    /// Lee la configuración del entorno (y de `.env` si existe). Devuelve
    /// `None` si no hay URL configurada; falla si un parámetro numérico está
    /// mal formado.
    pub fn from_env() -> Result<Option<Self>, PersistenceError> {
        let _ = dotenvy::dotenv();
        Self::desde_variables(|k| env::var(k).ok())
    }

    /// Misma lectura que `from_env` sobre una fuente de variables arbitraria.
    pub fn desde_variables<F>(var: F) -> Result<Option<Self>, PersistenceError>
        where F: Fn(&str) -> Option<String>
    {
        let clave_url = match var("SGC_ENTORNO").as_deref() {
            Some(ENTORNO_PRUEBAS) => "TEST_DATABASE_URL",
            _ => "DATABASE_URL",
        };
        let Some(url) = var(clave_url).filter(|u| !u.trim().is_empty()) else {
            return Ok(None);
        };
        let min_connections = numero(&var, "DATABASE_MIN_CONNECTIONS", 2)?;
        let max_connections = numero(&var, "DATABASE_MAX_CONNECTIONS", 16)?;
        if min_connections > max_connections {
            warn!("DATABASE_MIN_CONNECTIONS ({min_connections}) > DATABASE_MAX_CONNECTIONS ({max_connections})");
        }
        Ok(Some(Self { url,
                       min_connections,
                       max_connections }))
    }
}

fn numero<F>(var: &F, clave: &str, defecto: u32) -> Result<u32, PersistenceError>
    where F: Fn(&str) -> Option<String>
{
    match var(clave) {
        None => Ok(defecto),
        Some(v) => v.trim()
                    .parse()
                    .map_err(|_| PersistenceError::Configuracion(format!("{clave} no es un entero válido: {v}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn desde(pares: &[(&str, &str)]) -> Result<Option<DbConfig>, PersistenceError> {
        let m: HashMap<String, String> = pares.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        DbConfig::desde_variables(|k| m.get(k).cloned())
    }

    #[test]
    fn valores_por_defecto() {
        let c = desde(&[("DATABASE_URL", "postgres://localhost/sgc")]).unwrap();
        assert_eq!(c, Some(DbConfig::new("postgres://localhost/sgc")));
    }

    #[test]
    fn entorno_de_pruebas_usa_otra_url() {
        let c = desde(&[("SGC_ENTORNO", "test"),
                        ("DATABASE_URL", "postgres://localhost/sgc"),
                        ("TEST_DATABASE_URL", "postgres://localhost/sgc_test")]).unwrap()
                                                                               .unwrap();
        assert_eq!(c.url, "postgres://localhost/sgc_test");
    }

    #[test]
    fn sin_url_y_numeros_invalidos() {
        assert_eq!(desde(&[]).unwrap(), None);
        let r = desde(&[("DATABASE_URL", "postgres://x"), ("DATABASE_MAX_CONNECTIONS", "muchas")]);
        assert!(matches!(r, Err(PersistenceError::Configuracion(_))));
    }
}

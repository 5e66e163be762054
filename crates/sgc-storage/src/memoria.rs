//! Almacenamiento en memoria para desarrollo y pruebas.
use async_trait::async_trait;
use dashmap::DashMap;

use crate::{ruta_para, Almacenamiento, ObjetoSubido, StorageError};

#[derive(Debug, Clone)]
pub struct ObjetoGuardado {
    pub bytes: Vec<u8>,
    pub tipo_mime: Option<String>,
}

/// Objetos indexados por `(bucket, ruta)`. Las URLs usan el esquema
/// `memoria://`.
#[derive(Debug, Default)]
pub struct AlmacenamientoEnMemoria {
    objetos: DashMap<(String, String), ObjetoGuardado>,
}

impl AlmacenamientoEnMemoria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn obtener(&self, bucket: &str, ruta: &str) -> Option<ObjetoGuardado> {
        self.objetos
            .get(&(bucket.to_string(), ruta.to_string()))
            .map(|o| o.value().clone())
    }

    pub fn len(&self) -> usize {
        self.objetos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objetos.is_empty()
    }
}

#[async_trait]
impl Almacenamiento for AlmacenamientoEnMemoria {
    async fn subir(&self,
                   bucket: &str,
                   nombre: &str,
                   bytes: Vec<u8>,
                   tipo_mime: Option<&str>)
                   -> Result<ObjetoSubido, StorageError> {
        let ruta = ruta_para(nombre);
        self.objetos.insert((bucket.to_string(), ruta.clone()),
                            ObjetoGuardado { bytes,
                                             tipo_mime: tipo_mime.map(str::to_string) });
        Ok(ObjetoSubido { url: format!("memoria://{bucket}/{ruta}"),
                          ruta })
    }

    async fn eliminar(&self, bucket: &str, ruta: &str) -> Result<(), StorageError> {
        self.objetos
            .remove(&(bucket.to_string(), ruta.to_string()))
            .map(|_| ())
            .ok_or_else(|| StorageError::NoEncontrado(format!("{bucket}/{ruta}")))
    }

    fn ruta_de_url(&self, bucket: &str, url: &str) -> Option<String> {
        url.strip_prefix("memoria://")?
           .strip_prefix(bucket)?
           .strip_prefix('/')
           .filter(|r| !r.is_empty())
           .map(str::to_string)
    }

    async fn url_firmada(&self, bucket: &str, ruta: &str, ttl_segundos: u64) -> Result<String, StorageError> {
        if !self.objetos.contains_key(&(bucket.to_string(), ruta.to_string())) {
            return Err(StorageError::NoEncontrado(format!("{bucket}/{ruta}")));
        }
        Ok(format!("memoria://{bucket}/{ruta}?ttl={ttl_segundos}"))
    }
}

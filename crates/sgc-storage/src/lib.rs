//! sgc-storage: frontera con el servicio de almacenamiento de objetos.
//!
//! Los bytes viven en el servicio externo; la base de datos sólo guarda la
//! ruta y la URL que devuelve `subir`.

use async_trait::async_trait;
use serde::Serialize;

pub mod error;
pub mod http;
pub mod memoria;

pub use error::StorageError;
pub use http::{HttpAlmacenamiento, StorageConfig};
pub use memoria::AlmacenamientoEnMemoria;

/// TTL por defecto de las URLs firmadas (segundos).
pub const TTL_POR_DEFECTO: u64 = 3600;

/// Resultado de una subida: ruta dentro del bucket y URL pública.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjetoSubido {
    pub ruta: String,
    pub url: String,
}

#[async_trait]
pub trait Almacenamiento: Send + Sync {
    async fn subir(&self,
                   bucket: &str,
                   nombre: &str,
                   bytes: Vec<u8>,
                   tipo_mime: Option<&str>)
                   -> Result<ObjetoSubido, StorageError>;

    async fn eliminar(&self, bucket: &str, ruta: &str) -> Result<(), StorageError>;

    async fn url_firmada(&self, bucket: &str, ruta: &str, ttl_segundos: u64) -> Result<String, StorageError>;

    /// Ruta del objeto a partir de la URL devuelta por `subir`. `None` si la
    /// URL no pertenece a este almacenamiento o a ese bucket.
    fn ruta_de_url(&self, bucket: &str, url: &str) -> Option<String>;
}

/// Ruta única para un archivo: prefijo aleatorio más el nombre saneado
/// (sólo alfanuméricos, `.`, `-` y `_`).
pub fn ruta_para(nombre: &str) -> String {
    let limpio: String = nombre.chars()
                               .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
                               .collect();
    let limpio = if limpio.trim_matches(&['.', '_'][..]).is_empty() { "archivo".to_string() } else { limpio };
    format!("{}-{limpio}", uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ruta_sanea_el_nombre() {
        let r = ruta_para("informe anual/2024.pdf");
        assert!(r.ends_with("-informe_anual_2024.pdf"));
        assert!(!r.contains('/'));
        assert!(ruta_para("..").ends_with("-archivo"));
        assert_ne!(ruta_para("a.txt"), ruta_para("a.txt"));
    }
}

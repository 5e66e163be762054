//! Cliente HTTP del servicio de objetos (API estilo Supabase Storage).
//!
//! - `POST {base}/object/{bucket}/{ruta}` sube los bytes.
//! - `DELETE {base}/object/{bucket}/{ruta}` elimina.
//! - `POST {base}/object/sign/{bucket}/{ruta}` con `{"expiresIn": ttl}`
//!   devuelve `{"signedURL": "/object/sign/..."}`.
//! - La URL pública es `{base}/object/public/{bucket}/{ruta}`.
//!
//! Sin reintentos: cualquier fallo se devuelve tal cual.

use async_trait::async_trait;
use log::debug;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;

use crate::{ruta_para, Almacenamiento, ObjetoSubido, StorageError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// URL base del API de objetos, p. ej. `https://x.supabase.co/storage/v1`.
    pub url: String,
    /// Clave de servicio enviada como `Bearer`.
    pub clave: String,
}

#[derive(Debug, Clone)]
pub struct HttpAlmacenamiento {
    cliente: reqwest::Client,
    base: String,
    clave: String,
}

#[derive(Deserialize)]
struct RespuestaFirma {
    #[serde(rename = "signedURL", alias = "signedUrl")]
    signed_url: String,
}

impl HttpAlmacenamiento {
    pub fn new(cfg: &StorageConfig) -> Result<Self, StorageError> {
        let base = cfg.url.trim_end_matches('/').to_string();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(StorageError::Configuracion(format!("SGC_STORAGE_URL debe ser http(s): {}", cfg.url)));
        }
        Ok(Self { cliente: reqwest::Client::new(),
                  base,
                  clave: cfg.clave.clone() })
    }

    fn url_objeto(&self, bucket: &str, ruta: &str) -> String {
        format!("{}/object/{bucket}/{ruta}", self.base)
    }

    fn url_publica(&self, bucket: &str, ruta: &str) -> String {
        format!("{}/object/public/{bucket}/{ruta}", self.base)
    }

    fn url_firma(&self, bucket: &str, ruta: &str) -> String {
        format!("{}/object/sign/{bucket}/{ruta}", self.base)
    }

    fn portador(&self) -> String {
        format!("Bearer {}", self.clave)
    }
}

/// Convierte un estado no exitoso en `StorageError::Estado` con el cuerpo.
async fn verificar(resp: reqwest::Response) -> Result<reqwest::Response, StorageError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let mensaje = resp.text().await.unwrap_or_default();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(StorageError::NoEncontrado(mensaje));
    }
    Err(StorageError::Estado { status: status.as_u16(),
                               mensaje })
}

#[async_trait]
impl Almacenamiento for HttpAlmacenamiento {
    async fn subir(&self,
                   bucket: &str,
                   nombre: &str,
                   bytes: Vec<u8>,
                   tipo_mime: Option<&str>)
                   -> Result<ObjetoSubido, StorageError> {
        let ruta = ruta_para(nombre);
        let tamano = bytes.len();
        let resp = self.cliente
                       .post(self.url_objeto(bucket, &ruta))
                       .header(AUTHORIZATION, self.portador())
                       .header(CONTENT_TYPE, tipo_mime.unwrap_or("application/octet-stream"))
                       .body(bytes)
                       .send()
                       .await?;
        verificar(resp).await?;
        debug!("subido {bucket}/{ruta} ({tamano} bytes)");
        Ok(ObjetoSubido { url: self.url_publica(bucket, &ruta),
                          ruta })
    }

    async fn eliminar(&self, bucket: &str, ruta: &str) -> Result<(), StorageError> {
        let resp = self.cliente
                       .delete(self.url_objeto(bucket, ruta))
                       .header(AUTHORIZATION, self.portador())
                       .send()
                       .await?;
        verificar(resp).await?;
        debug!("eliminado {bucket}/{ruta}");
        Ok(())
    }

    fn ruta_de_url(&self, bucket: &str, url: &str) -> Option<String> {
        url.strip_prefix(&self.url_publica(bucket, ""))
           .filter(|r| !r.is_empty())
           .map(str::to_string)
    }

    async fn url_firmada(&self, bucket: &str, ruta: &str, ttl_segundos: u64) -> Result<String, StorageError> {
        let resp = self.cliente
                       .post(self.url_firma(bucket, ruta))
                       .header(AUTHORIZATION, self.portador())
                       .json(&json!({ "expiresIn": ttl_segundos }))
                       .send()
                       .await?;
        let firma: RespuestaFirma = verificar(resp).await?.json().await?;
        Ok(format!("{}{}", self.base, firma.signed_url))
    }
}

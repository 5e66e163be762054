//! Subida de archivos al almacenamiento de objetos.
//!
//! El registro se verifica (404) antes de subir bytes. La base sólo guarda
//! ruta y URL; los bytes quedan en el servicio externo.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use sgc_core::servicio::transiciones::{asignar_foto, registrar_archivo};
use sgc_core::{ArchivoSubido, CoreError};
use sgc_domain::{Documento, Usuario, BUCKET_DOCUMENTOS, BUCKET_IMAGENES};
use sgc_storage::{StorageError, TTL_POR_DEFECTO};
use tracing::{info, warn};

use super::bloqueante;
use crate::error::ApiError;
use crate::estado::AppState;
use crate::extractores::IdRuta;

#[derive(Debug, Deserialize)]
pub struct ParametrosSubida {
    pub nombre: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ParametrosFirma {
    pub ttl: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlFirmada {
    pub url: String,
    pub ttl_segundos: u64,
}

fn validar_subida(p: ParametrosSubida, cuerpo: &Bytes) -> Result<String, ApiError> {
    let nombre = p.nombre
                  .filter(|n| !n.trim().is_empty())
                  .ok_or_else(|| ApiError::solicitud_invalida("el parámetro nombre es obligatorio"))?;
    if cuerpo.is_empty() {
        return Err(ApiError::solicitud_invalida("el archivo está vacío"));
    }
    Ok(nombre)
}

fn tipo_mime(headers: &HeaderMap) -> Option<String> {
    headers.get(CONTENT_TYPE)
           .and_then(|v| v.to_str().ok())
           .map(str::to_string)
}

/// `PUT /documentos/:id/archivo?nombre=`. Reemplaza el archivo anterior.
pub async fn subir_archivo_documento(State(estado): State<AppState>,
                                     IdRuta(id): IdRuta,
                                     Query(p): Query<ParametrosSubida>,
                                     headers: HeaderMap,
                                     cuerpo: Bytes)
                                     -> Result<Json<Documento>, ApiError> {
    let nombre = validar_subida(p, &cuerpo)?;
    let repos = estado.repos.clone();
    bloqueante(move || sgc_core::obtener::<Documento>(&repos, id)).await?;

    let tipo_mime = tipo_mime(&headers);
    let tamano_bytes = i64::try_from(cuerpo.len()).map_err(|e| CoreError::Interno(e.to_string()))?;
    let objeto = estado.almacenamiento
                       .subir(BUCKET_DOCUMENTOS, &nombre, cuerpo.to_vec(), tipo_mime.as_deref())
                       .await
                       .map_err(CoreError::from)?;

    let repos = estado.repos.clone();
    let archivo = ArchivoSubido { ruta: objeto.ruta.clone(),
                                  url: objeto.url,
                                  tipo_mime,
                                  tamano_bytes };
    let (documento, anterior) = match bloqueante(move || registrar_archivo(&repos, id, archivo)).await {
        Ok(r) => r,
        Err(e) => {
            if let Err(limpieza) = estado.almacenamiento.eliminar(BUCKET_DOCUMENTOS, &objeto.ruta).await {
                warn!(ruta = %objeto.ruta, error = %limpieza, "no se pudo eliminar el objeto huérfano");
            }
            return Err(e);
        }
    };
    if let Some(ruta) = anterior {
        if let Err(e) = estado.almacenamiento.eliminar(BUCKET_DOCUMENTOS, &ruta).await {
            warn!(%ruta, error = %e, "no se pudo eliminar el archivo anterior");
        }
    }
    info!(documento = %id, ruta = %objeto.ruta, bytes = tamano_bytes, "archivo de documento subido");
    Ok(Json(documento))
}

/// `GET /documentos/:id/url-firmada?ttl=`.
pub async fn url_firmada_documento(State(estado): State<AppState>,
                                   IdRuta(id): IdRuta,
                                   Query(p): Query<ParametrosFirma>)
                                   -> Result<Json<UrlFirmada>, ApiError> {
    let ttl_segundos = p.ttl.unwrap_or(TTL_POR_DEFECTO);
    if ttl_segundos == 0 {
        return Err(ApiError::solicitud_invalida("ttl debe ser mayor que cero"));
    }
    let repos = estado.repos.clone();
    let documento = bloqueante(move || sgc_core::obtener::<Documento>(&repos, id)).await?;
    let ruta = documento.ruta_almacenamiento
                        .ok_or_else(|| CoreError::NoEncontrado(format!("el documento {id} no tiene archivo")))?;
    let url = estado.almacenamiento
                    .url_firmada(BUCKET_DOCUMENTOS, &ruta, ttl_segundos)
                    .await
                    .map_err(CoreError::from)?;
    Ok(Json(UrlFirmada { url, ttl_segundos }))
}

/// `DELETE /documentos/:id`. Elimina primero el objeto almacenado; si ya no
/// existe en el servicio se continúa con el registro.
pub async fn eliminar_documento(State(estado): State<AppState>,
                                IdRuta(id): IdRuta)
                                -> Result<Json<Documento>, ApiError> {
    let repos = estado.repos.clone();
    let documento = bloqueante(move || sgc_core::obtener::<Documento>(&repos, id)).await?;
    if let Some(ruta) = &documento.ruta_almacenamiento {
        match estado.almacenamiento.eliminar(BUCKET_DOCUMENTOS, ruta).await {
            Ok(()) => {}
            Err(StorageError::NoEncontrado(_)) => warn!(%ruta, "el objeto ya no existía en el almacenamiento"),
            Err(e) => return Err(CoreError::from(e).into()),
        }
    }
    let repos = estado.repos;
    Ok(Json(bloqueante(move || sgc_core::eliminar::<Documento>(&repos, id)).await?))
}

/// Borra del almacenamiento la foto referenciada por `foto_url`. Un objeto
/// que ya no existe no es error.
async fn borrar_foto(estado: &AppState, foto_url: &str) -> Result<(), StorageError> {
    let Some(ruta) = estado.almacenamiento.ruta_de_url(BUCKET_IMAGENES, foto_url) else {
        warn!(url = %foto_url, "la foto no pertenece al almacenamiento; se omite");
        return Ok(());
    };
    match estado.almacenamiento.eliminar(BUCKET_IMAGENES, &ruta).await {
        Err(StorageError::NoEncontrado(_)) => {
            warn!(%ruta, "la foto ya no existía en el almacenamiento");
            Ok(())
        }
        otro => otro,
    }
}

/// `PUT /usuarios/:id/foto?nombre=`. Reemplaza la foto anterior.
pub async fn subir_foto_usuario(State(estado): State<AppState>,
                                IdRuta(id): IdRuta,
                                Query(p): Query<ParametrosSubida>,
                                headers: HeaderMap,
                                cuerpo: Bytes)
                                -> Result<Json<Usuario>, ApiError> {
    let nombre = validar_subida(p, &cuerpo)?;
    let repos = estado.repos.clone();
    let anterior = bloqueante(move || sgc_core::obtener::<Usuario>(&repos, id)).await?.foto_url;

    let objeto = estado.almacenamiento
                       .subir(BUCKET_IMAGENES, &nombre, cuerpo.to_vec(), tipo_mime(&headers).as_deref())
                       .await
                       .map_err(CoreError::from)?;
    let repos = estado.repos.clone();
    let url = objeto.url.clone();
    let usuario = match bloqueante(move || asignar_foto(&repos, id, url)).await {
        Ok(u) => u,
        Err(e) => {
            if let Err(limpieza) = estado.almacenamiento.eliminar(BUCKET_IMAGENES, &objeto.ruta).await {
                warn!(ruta = %objeto.ruta, error = %limpieza, "no se pudo eliminar el objeto huérfano");
            }
            return Err(e);
        }
    };
    if let Some(url) = anterior.filter(|u| *u != objeto.url) {
        if let Err(e) = borrar_foto(&estado, &url).await {
            warn!(%url, error = %e, "no se pudo eliminar la foto anterior");
        }
    }
    info!(usuario = %id, ruta = %objeto.ruta, "foto de usuario subida");
    Ok(Json(usuario))
}

/// `DELETE /usuarios/:id`. Igual que con documentos, primero se elimina la
/// foto almacenada.
pub async fn eliminar_usuario(State(estado): State<AppState>,
                              IdRuta(id): IdRuta)
                              -> Result<Json<Usuario>, ApiError> {
    let repos = estado.repos.clone();
    let usuario = bloqueante(move || sgc_core::obtener::<Usuario>(&repos, id)).await?;
    if let Some(url) = &usuario.foto_url {
        borrar_foto(&estado, url).await.map_err(CoreError::from)?;
    }
    let repos = estado.repos;
    Ok(Json(bloqueante(move || sgc_core::eliminar::<Usuario>(&repos, id)).await?))
}

//! Extractores que convierten los rechazos de axum en `ApiError` (400).

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::ApiError;

/// Cuerpo JSON obligatorio.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
    where S: Send + Sync,
          T: DeserializeOwned
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(valor) = Json::<T>::from_request(req, state).await
                                                             .map_err(|r| ApiError::solicitud_invalida(r.body_text()))?;
        Ok(Self(valor))
    }
}

/// Cuerpo JSON opcional: un cuerpo vacío equivale a `T::default()`.
pub struct CuerpoOpcional<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for CuerpoOpcional<T>
    where S: Send + Sync,
          T: DeserializeOwned + Default
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await
                                                   .map_err(|r| ApiError::solicitud_invalida(r.body_text()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }
        serde_json::from_slice(&bytes).map(Self)
                                      .map_err(|e| ApiError::solicitud_invalida(format!("JSON inválido: {e}")))
    }
}

/// `:id` de la ruta como UUID.
pub struct IdRuta(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for IdRuta where S: Send + Sync
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(crudo) = Path::<String>::from_request_parts(parts, state).await
                                                                         .map_err(|r| ApiError::solicitud_invalida(r.body_text()))?;
        Uuid::parse_str(&crudo).map(Self)
                               .map_err(|_| ApiError::solicitud_invalida(format!("id no es un UUID válido: {crudo}")))
    }
}

//! Handlers HTTP. Las llamadas a los repositorios son síncronas (Diesel) y
//! corren en `spawn_blocking`.

pub mod archivos;
pub mod crud;
pub mod transiciones;

use axum::Json;
use serde_json::{json, Value};
use sgc_core::CoreError;

use crate::error::ApiError;

pub(crate) async fn bloqueante<T, F>(f: F) -> Result<T, ApiError>
    where F: FnOnce() -> Result<T, CoreError> + Send + 'static,
          T: Send + 'static
{
    Ok(tokio::task::spawn_blocking(f).await??)
}

pub async fn salud() -> Json<Value> {
    Json(json!({ "estado": "ok" }))
}

//! Errores HTTP: `{message}` y, para 500, además `{error}` con la causa.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use sgc_core::CoreError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub error: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status,
               message: message.into(),
               error: None }
    }

    pub fn solicitud_invalida(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn no_autorizado(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn interno(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR,
               message: message.into(),
               error: Some(error.into()) }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validacion(m) => Self::new(StatusCode::BAD_REQUEST, m),
            CoreError::NoEncontrado(m) => Self::new(StatusCode::NOT_FOUND, m),
            CoreError::Conflicto(m) => Self::new(StatusCode::CONFLICT, m),
            CoreError::Almacenamiento(m) => Self::interno("error de almacenamiento", m),
            CoreError::Interno(m) => Self::interno("error interno del servidor", m),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::interno("error interno del servidor", e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self.error {
            Some(error) => {
                tracing::error!(status = self.status.as_u16(), %error, "{}", self.message);
                json!({ "message": self.message, "error": error })
            }
            None => json!({ "message": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapeo_de_core_a_http() {
        let casos = [(CoreError::Validacion("x".into()), StatusCode::BAD_REQUEST),
                     (CoreError::NoEncontrado("x".into()), StatusCode::NOT_FOUND),
                     (CoreError::Conflicto("x".into()), StatusCode::CONFLICT),
                     (CoreError::Almacenamiento("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
                     (CoreError::Interno("x".into()), StatusCode::INTERNAL_SERVER_ERROR)];
        for (core, status) in casos {
            assert_eq!(ApiError::from(core).status, status);
        }
    }

    #[test]
    fn solo_500_lleva_causa() {
        assert!(ApiError::from(CoreError::Conflicto("dup".into())).error.is_none());
        let e = ApiError::from(CoreError::Interno("db caída".into()));
        assert_eq!(e.error.as_deref(), Some("db caída"));
    }
}

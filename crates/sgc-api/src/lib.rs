//! sgc-api: superficie HTTP (axum) del SGC.
//!
//! - CRUD uniforme por entidad con filtros de igualdad en los listados.
//! - `PATCH` de transición de estado.
//! - Subida de archivos al almacenamiento de objetos.
//! - Token portador obligatorio salvo en `/health`.

pub mod auth;
pub mod error;
pub mod estado;
pub mod extractores;
pub mod handlers;
pub mod router;
mod traza;

pub use auth::TokenPortador;
pub use error::ApiError;
pub use estado::AppState;
pub use router::{router, LIMITE_ARCHIVO};

//! CRUD genérico: un handler por operación, instanciado por entidad.
use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use sgc_core::{Alta, Modificacion, RepositorioDe, Repositorios};
use sgc_domain::Entidad;

use super::bloqueante;
use crate::error::ApiError;
use crate::estado::AppState;
use crate::extractores::{IdRuta, JsonBody};

pub async fn crear<N: Alta>(State(estado): State<AppState>,
                            JsonBody(nuevo): JsonBody<N>)
                            -> Result<(StatusCode, Json<N::Entidad>), ApiError> {
    let repos = estado.repos;
    let creado = bloqueante(move || nuevo.dar_de_alta(&repos)).await?;
    Ok((StatusCode::CREATED, Json(creado)))
}

pub async fn listar<E: Entidad>(State(estado): State<AppState>,
                                Query(parametros): Query<HashMap<String, String>>)
                                -> Result<Json<Vec<E>>, ApiError>
    where Repositorios: RepositorioDe<E>
{
    let repos = estado.repos;
    Ok(Json(bloqueante(move || sgc_core::listar::<E>(&repos, &parametros)).await?))
}

pub async fn obtener<E: Entidad>(State(estado): State<AppState>, IdRuta(id): IdRuta) -> Result<Json<E>, ApiError>
    where Repositorios: RepositorioDe<E>
{
    let repos = estado.repos;
    Ok(Json(bloqueante(move || sgc_core::obtener::<E>(&repos, id)).await?))
}

pub async fn actualizar<C: Modificacion>(State(estado): State<AppState>,
                                         IdRuta(id): IdRuta,
                                         JsonBody(cambios): JsonBody<C>)
                                         -> Result<Json<C::Entidad>, ApiError> {
    let repos = estado.repos;
    Ok(Json(bloqueante(move || cambios.modificar(id, &repos)).await?))
}

pub async fn eliminar<E: Entidad>(State(estado): State<AppState>, IdRuta(id): IdRuta) -> Result<Json<E>, ApiError>
    where Repositorios: RepositorioDe<E>
{
    let repos = estado.repos;
    Ok(Json(bloqueante(move || sgc_core::eliminar::<E>(&repos, id)).await?))
}

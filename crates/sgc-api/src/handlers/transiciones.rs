//! `PATCH` de transición de estado. El cuerpo es opcional.
use axum::extract::State;
use axum::Json;
use sgc_core::servicio::transiciones as t;
use sgc_core::ResultadoAvance;
use sgc_domain::*;

use super::bloqueante;
use crate::error::ApiError;
use crate::estado::AppState;
use crate::extractores::{CuerpoOpcional, IdRuta, JsonBody};

macro_rules! con_cuerpo {
    ($($nombre:ident: $cuerpo:ty => $salida:ty),+ $(,)?) => {
        $(pub async fn $nombre(State(estado): State<AppState>,
                               IdRuta(id): IdRuta,
                               CuerpoOpcional(cuerpo): CuerpoOpcional<$cuerpo>)
                               -> Result<Json<$salida>, ApiError> {
            let repos = estado.repos;
            Ok(Json(bloqueante(move || t::$nombre(&repos, id, cuerpo)).await?))
        })+
    };
}

macro_rules! sin_cuerpo {
    ($($nombre:ident => $salida:ty),+ $(,)?) => {
        $(pub async fn $nombre(State(estado): State<AppState>, IdRuta(id): IdRuta) -> Result<Json<$salida>, ApiError> {
            let repos = estado.repos;
            Ok(Json(bloqueante(move || t::$nombre(&repos, id)).await?))
        })+
    };
}

con_cuerpo! {
    iniciar_tratamiento: Observacion => NoConformidad,
    cerrar_no_conformidad: Observacion => NoConformidad,
    iniciar_accion_correctiva: Observacion => AccionCorrectiva,
    completar_accion_correctiva: Observacion => AccionCorrectiva,
    verificar_accion_correctiva: Observacion => AccionCorrectiva,
    iniciar_instancia: InicioInstancia => InstanciaProceso,
    bloquear_instancia: BloqueoInstancia => InstanciaProceso,
}

sin_cuerpo! {
    desbloquear_instancia => InstanciaProceso,
    completar_instancia => InstanciaProceso,
    cancelar_instancia => InstanciaProceso,
    marcar_entregada => Notificacion,
}

/// `avanzar` exige cuerpo: `etapaId` y `usuarioId` son obligatorios.
pub async fn avanzar_instancia(State(estado): State<AppState>,
                               IdRuta(id): IdRuta,
                               JsonBody(avance): JsonBody<AvanceInstancia>)
                               -> Result<Json<ResultadoAvance>, ApiError> {
    let repos = estado.repos;
    Ok(Json(bloqueante(move || t::avanzar_instancia(&repos, id, avance)).await?))
}

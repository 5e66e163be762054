use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch, put};
use axum::{middleware, Router};
use sgc_domain::*;

use crate::auth::exigir_portador;
use crate::estado::AppState;
use crate::handlers::archivos::*;
use crate::handlers::crud::{actualizar, crear, eliminar, listar, obtener};
use crate::handlers::salud;
use crate::handlers::transiciones::*;
use crate::traza::registrar_peticion;

/// Tamaño máximo aceptado para archivos subidos.
pub const LIMITE_ARCHIVO: usize = 25 * 1024 * 1024;

/// `GET/POST /<recurso>` y `GET/PUT/DELETE /<recurso>/:id`.
macro_rules! crud {
    ($router:expr, $ruta:literal, $entidad:ty, $nuevo:ty, $cambios:ty) => {
        $router.route($ruta, get(listar::<$entidad>).post(crear::<$nuevo>))
               .route(concat!($ruta, "/:id"),
                      get(obtener::<$entidad>).put(actualizar::<$cambios>)
                                              .delete(eliminar::<$entidad>))
    };
}

fn recursos() -> Router<AppState> {
    let r = Router::new().route("/usuarios", get(listar::<Usuario>).post(crear::<NuevoUsuario>))
                          .route("/usuarios/:id",
                                 get(obtener::<Usuario>).put(actualizar::<CambiosUsuario>)
                                                        .delete(eliminar_usuario));
    let r = crud!(r, "/areas", Area, NuevaArea, CambiosArea);
    let r = crud!(r, "/asignaciones", Asignacion, NuevaAsignacion, CambiosAsignacion);
    let r = crud!(r, "/procesos", Proceso, NuevoProceso, CambiosProceso);
    let r = crud!(r, "/etapas-proceso", EtapaProceso, NuevaEtapaProceso, CambiosEtapaProceso);
    let r = crud!(r, "/no-conformidades", NoConformidad, NuevaNoConformidad, CambiosNoConformidad);
    let r = crud!(r, "/acciones-correctivas", AccionCorrectiva, NuevaAccionCorrectiva, CambiosAccionCorrectiva);
    let r = crud!(r, "/riesgos", Riesgo, NuevoRiesgo, CambiosRiesgo);
    let r = crud!(r, "/controles-riesgo", ControlRiesgo, NuevoControlRiesgo, CambiosControlRiesgo);
    let r = crud!(r, "/capacitaciones", Capacitacion, NuevaCapacitacion, CambiosCapacitacion);
    let r = crud!(r, "/asistencias-capacitacion", AsistenciaCapacitacion, NuevaAsistencia, CambiosAsistencia);
    let r = crud!(r, "/notificaciones", Notificacion, NuevaNotificacion, CambiosNotificacion);

    // Sin DELETE: las instancias sólo se cancelan.
    r.route("/instancias-proceso",
            get(listar::<InstanciaProceso>).post(crear::<NuevaInstanciaProceso>))
     .route("/instancias-proceso/:id",
            get(obtener::<InstanciaProceso>).put(actualizar::<CambiosInstanciaProceso>))
     // Bitácoras: sólo alta y lectura.
     .route("/acciones-proceso",
            get(listar::<AccionProceso>).post(crear::<NuevaAccionProceso>))
     .route("/acciones-proceso/:id", get(obtener::<AccionProceso>))
     .route("/auditoria", get(listar::<Auditoria>).post(crear::<NuevaAuditoria>))
     .route("/auditoria/:id", get(obtener::<Auditoria>))
     .route("/documentos", get(listar::<Documento>).post(crear::<NuevoDocumento>))
     .route("/documentos/:id",
            get(obtener::<Documento>).put(actualizar::<CambiosDocumento>)
                                     .delete(eliminar_documento))
}

fn transiciones() -> Router<AppState> {
    Router::new().route("/no-conformidades/:id/iniciar-tratamiento", patch(iniciar_tratamiento))
                 .route("/no-conformidades/:id/cerrar", patch(cerrar_no_conformidad))
                 .route("/acciones-correctivas/:id/iniciar", patch(iniciar_accion_correctiva))
                 .route("/acciones-correctivas/:id/completar", patch(completar_accion_correctiva))
                 .route("/acciones-correctivas/:id/verificar", patch(verificar_accion_correctiva))
                 .route("/instancias-proceso/:id/iniciar", patch(iniciar_instancia))
                 .route("/instancias-proceso/:id/avanzar", patch(avanzar_instancia))
                 .route("/instancias-proceso/:id/bloquear", patch(bloquear_instancia))
                 .route("/instancias-proceso/:id/desbloquear", patch(desbloquear_instancia))
                 .route("/instancias-proceso/:id/completar", patch(completar_instancia))
                 .route("/instancias-proceso/:id/cancelar", patch(cancelar_instancia))
                 .route("/notificaciones/:id/entregada", patch(marcar_entregada))
}

fn archivos() -> Router<AppState> {
    Router::new().route("/documentos/:id/archivo", put(subir_archivo_documento))
                 .route("/documentos/:id/url-firmada", get(url_firmada_documento))
                 .route("/usuarios/:id/foto", put(subir_foto_usuario))
                 .layer(DefaultBodyLimit::max(LIMITE_ARCHIVO))
}

/// Router completo. Todo salvo `GET /health` exige token portador.
pub fn router(estado: AppState) -> Router {
    let protegidas = recursos().merge(transiciones())
                               .merge(archivos())
                               .route_layer(middleware::from_fn(exigir_portador));
    Router::new().route("/health", get(salud))
                 .merge(protegidas)
                 .layer(middleware::from_fn(registrar_peticion))
                 .with_state(estado)
}

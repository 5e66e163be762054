//! Transiciones de estado disparadas por el cliente.
//!
//! Sobrescriben el estado sin mirar el anterior. La única guarda es el
//! bloqueo de instancias: una instancia bloqueada no avanza de etapa.
use log::{debug, info};
use serde::Serialize;
use sgc_domain::*;
use uuid::Uuid;

use super::{etapa_del_proceso, guardar_cambios, por_uuid, referencia, referencia_opcional};
use crate::errors::CoreError;
use crate::repo::Repositorios;

pub fn iniciar_tratamiento(repos: &Repositorios, id: Uuid, obs: Observacion) -> Result<NoConformidad, CoreError> {
    guardar_cambios(repos, id, |nc: &mut NoConformidad| {
        nc.iniciar_tratamiento(obs);
        Ok(())
    })
}

pub fn cerrar_no_conformidad(repos: &Repositorios, id: Uuid, obs: Observacion) -> Result<NoConformidad, CoreError> {
    let nc = guardar_cambios(repos, id, |nc: &mut NoConformidad| {
        nc.cerrar(obs);
        Ok(())
    })?;
    info!("no conformidad {} cerrada", nc.codigo);
    Ok(nc)
}

pub fn iniciar_accion_correctiva(repos: &Repositorios, id: Uuid, obs: Observacion) -> Result<AccionCorrectiva, CoreError> {
    guardar_cambios(repos, id, |ac: &mut AccionCorrectiva| {
        ac.iniciar(obs);
        Ok(())
    })
}

pub fn completar_accion_correctiva(repos: &Repositorios, id: Uuid, obs: Observacion) -> Result<AccionCorrectiva, CoreError> {
    guardar_cambios(repos, id, |ac: &mut AccionCorrectiva| {
        ac.completar(obs);
        Ok(())
    })
}

pub fn verificar_accion_correctiva(repos: &Repositorios, id: Uuid, obs: Observacion) -> Result<AccionCorrectiva, CoreError> {
    guardar_cambios(repos, id, |ac: &mut AccionCorrectiva| {
        ac.verificar(obs);
        Ok(())
    })
}

/// Inicia la instancia. Sin etapa actual, toma la de menor `orden`.
pub fn iniciar_instancia(repos: &Repositorios, id: Uuid, inicio: InicioInstancia) -> Result<InstanciaProceso, CoreError> {
    referencia_opcional::<Usuario>(repos, inicio.usuario_id, "usuarioId")?;
    guardar_cambios(repos, id, |i: &mut InstanciaProceso| {
        let primera = repos.etapas
                           .listar(&[por_uuid("proceso_id", i.proceso_id)])?
                           .into_iter()
                           .min_by_key(|e| e.orden)
                           .map(|e| e.id);
        i.iniciar(inicio.usuario_id, primera);
        Ok(())
    })
}

/// Resultado de `avanzar`: la instancia ya movida y la acción registrada.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultadoAvance {
    pub instancia: InstanciaProceso,
    pub accion: AccionProceso,
}

/// Mueve la instancia a otra etapa del mismo proceso y agrega la acción a
/// la bitácora. Son dos escrituras independientes: si la segunda falla la
/// instancia queda movida.
pub fn avanzar_instancia(repos: &Repositorios, id: Uuid, avance: AvanceInstancia) -> Result<ResultadoAvance, CoreError> {
    super::obtener::<InstanciaProceso>(repos, id)?;
    let accion = avance.accion(id)?;
    referencia::<Usuario>(repos, accion.usuario_id, "usuarioId")?;
    let instancia = guardar_cambios(repos, id, |i: &mut InstanciaProceso| {
        etapa_del_proceso(repos, accion.etapa_id, i.proceso_id)?;
        i.avanzar_a(accion.etapa_id)?;
        if let Some(d) = avance.datos {
            i.datos.fusionar(d);
        }
        Ok(())
    })?;
    let accion = repos.acciones_proceso.insertar(&accion)?;
    debug!("instancia {id} avanzó a la etapa {}", accion.etapa_id);
    Ok(ResultadoAvance { instancia, accion })
}

pub fn bloquear_instancia(repos: &Repositorios, id: Uuid, bloqueo: BloqueoInstancia) -> Result<InstanciaProceso, CoreError> {
    guardar_cambios(repos, id, |i: &mut InstanciaProceso| {
        i.bloquear(bloqueo.motivo);
        Ok(())
    })
}

pub fn desbloquear_instancia(repos: &Repositorios, id: Uuid) -> Result<InstanciaProceso, CoreError> {
    guardar_cambios(repos, id, |i: &mut InstanciaProceso| {
        i.desbloquear();
        Ok(())
    })
}

pub fn completar_instancia(repos: &Repositorios, id: Uuid) -> Result<InstanciaProceso, CoreError> {
    guardar_cambios(repos, id, |i: &mut InstanciaProceso| {
        i.completar();
        Ok(())
    })
}

pub fn cancelar_instancia(repos: &Repositorios, id: Uuid) -> Result<InstanciaProceso, CoreError> {
    guardar_cambios(repos, id, |i: &mut InstanciaProceso| {
        i.cancelar();
        Ok(())
    })
}

pub fn marcar_entregada(repos: &Repositorios, id: Uuid) -> Result<Notificacion, CoreError> {
    guardar_cambios(repos, id, |n: &mut Notificacion| {
        n.marcar_entregada();
        Ok(())
    })
}

/// Archivo ya subido al almacenamiento, listo para enlazarse a su registro.
#[derive(Debug, Clone)]
pub struct ArchivoSubido {
    pub ruta: String,
    pub url: String,
    pub tipo_mime: Option<String>,
    pub tamano_bytes: i64,
}

/// Enlaza el archivo al documento. Devuelve también la ruta anterior, que
/// el llamador debe eliminar del almacenamiento.
pub fn registrar_archivo(repos: &Repositorios,
                         id: Uuid,
                         archivo: ArchivoSubido)
                         -> Result<(Documento, Option<String>), CoreError> {
    let mut anterior = None;
    let d = guardar_cambios(repos, id, |d: &mut Documento| {
        anterior = d.registrar_archivo(archivo.ruta, archivo.url, archivo.tipo_mime, archivo.tamano_bytes);
        Ok(())
    })?;
    Ok((d, anterior))
}

pub fn asignar_foto(repos: &Repositorios, id: Uuid, url: String) -> Result<Usuario, CoreError> {
    guardar_cambios(repos, id, |u: &mut Usuario| {
        u.foto_url = Some(url);
        Ok(())
    })
}

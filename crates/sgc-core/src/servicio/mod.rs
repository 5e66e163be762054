//! Reglas de negocio sobre los repositorios: altas y cambios con chequeos de
//! unicidad y de referencias, lecturas, bajas y transiciones de estado.
//!
//! Los chequeos de unicidad son "consultar y luego insertar"; entre ambas
//! sentencias otra petición puede ganar la carrera. En Postgres el índice
//! único la cierra y la violación llega igualmente como `Conflicto`.
use std::collections::HashMap;

use chrono::Utc;
use log::debug;
use sgc_domain::*;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::repo::{RepositorioDe, Repositorios};

pub mod alta;
pub mod consulta;
pub mod modificacion;
pub mod transiciones;

pub use alta::Alta;
pub use modificacion::Modificacion;

/// Registros con marca de última actualización.
pub trait Actualizable: Entidad {
    fn tocar(&mut self);
}

macro_rules! actualizable {
    ($($tipo:ty),+ $(,)?) => {
        $(impl Actualizable for $tipo {
            fn tocar(&mut self) {
                self.actualizado_en = Some(Utc::now());
            }
        })+
    };
}

actualizable!(Usuario,
              Area,
              Asignacion,
              Proceso,
              EtapaProceso,
              InstanciaProceso,
              NoConformidad,
              AccionCorrectiva,
              Riesgo,
              ControlRiesgo,
              Capacitacion,
              AsistenciaCapacitacion,
              Documento,
              Notificacion);

pub fn obtener<E: Entidad>(repos: &Repositorios, id: Uuid) -> Result<E, CoreError>
    where Repositorios: RepositorioDe<E>
{
    repos.de::<E>().obtener(id)?.ok_or_else(|| CoreError::no_encontrado(E::NOMBRE, id))
}

/// Listado con filtros de igualdad tomados de los parámetros de consulta.
pub fn listar<E: Entidad>(repos: &Repositorios, parametros: &HashMap<String, String>) -> Result<Vec<E>, CoreError>
    where Repositorios: RepositorioDe<E>
{
    let condiciones = consulta::condiciones::<E>(parametros)?;
    debug!("listar {} con {} filtro(s)", E::NOMBRE, condiciones.len());
    repos.de::<E>().listar(&condiciones)
}

/// Elimina y devuelve el registro borrado.
pub fn eliminar<E: Entidad>(repos: &Repositorios, id: Uuid) -> Result<E, CoreError>
    where Repositorios: RepositorioDe<E>
{
    let borrado = repos.de::<E>().eliminar(id)?.ok_or_else(|| CoreError::no_encontrado(E::NOMBRE, id))?;
    debug!("{} eliminado: {id}", E::NOMBRE);
    Ok(borrado)
}

/// Carga, modifica, marca `actualizado_en` y persiste.
pub(crate) fn guardar_cambios<E, F>(repos: &Repositorios, id: Uuid, cambiar: F) -> Result<E, CoreError>
    where E: Actualizable,
          Repositorios: RepositorioDe<E>,
          F: FnOnce(&mut E) -> Result<(), CoreError>
{
    let mut actual: E = obtener(repos, id)?;
    cambiar(&mut actual)?;
    actual.tocar();
    repos.de::<E>().actualizar(&actual)?.ok_or_else(|| CoreError::no_encontrado(E::NOMBRE, id))
}

/// Falla con `Conflicto` si otro registro (distinto de `excluir`) ya tiene
/// `campo = valor`.
pub(crate) fn exigir_unico<E: Entidad>(repos: &Repositorios,
                                       condiciones: &[Condicion],
                                       excluir: Option<Uuid>,
                                       descripcion: &str)
                                       -> Result<(), CoreError>
    where Repositorios: RepositorioDe<E>
{
    let existentes = repos.de::<E>().listar(condiciones)?;
    if existentes.iter().any(|e| Some(e.id()) != excluir) {
        return Err(CoreError::Conflicto(format!("ya existe {} con {descripcion}", E::NOMBRE)));
    }
    Ok(())
}

pub(crate) fn por_texto(campo: &'static str, valor: &str) -> Condicion {
    Condicion { campo,
                valor: ValorCampo::Texto(valor.to_string()) }
}

pub(crate) fn por_uuid(campo: &'static str, valor: Uuid) -> Condicion {
    Condicion { campo,
                valor: ValorCampo::Uuid(valor) }
}

/// El registro referenciado debe existir; si no, el payload es inválido.
pub(crate) fn referencia<E: Entidad>(repos: &Repositorios, id: Uuid, campo: &str) -> Result<E, CoreError>
    where Repositorios: RepositorioDe<E>
{
    repos.de::<E>()
         .obtener(id)?
         .ok_or_else(|| CoreError::Validacion(format!("{campo}: {} inexistente ({id})", E::NOMBRE)))
}

pub(crate) fn referencia_opcional<E: Entidad>(repos: &Repositorios, id: Option<Uuid>, campo: &str) -> Result<(), CoreError>
    where Repositorios: RepositorioDe<E>
{
    if let Some(id) = id {
        referencia::<E>(repos, id, campo)?;
    }
    Ok(())
}

/// La etapa debe existir y pertenecer al proceso indicado.
pub(crate) fn etapa_del_proceso(repos: &Repositorios, etapa_id: Uuid, proceso_id: Uuid) -> Result<EtapaProceso, CoreError> {
    let etapa: EtapaProceso = referencia(repos, etapa_id, "etapaId")?;
    if etapa.proceso_id != proceso_id {
        return Err(CoreError::Validacion(format!("la etapa {etapa_id} no pertenece al proceso {proceso_id}")));
    }
    Ok(etapa)
}

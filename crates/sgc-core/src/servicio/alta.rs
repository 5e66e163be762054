//! Altas: validación del payload, unicidad, referencias y persistencia.
use log::debug;
use sgc_domain::*;

use super::{etapa_del_proceso, exigir_unico, por_texto, por_uuid, referencia, referencia_opcional};
use crate::errors::CoreError;
use crate::repo::{RepositorioDe, Repositorios};

/// Payload de creación de una entidad.
pub trait Alta: serde::de::DeserializeOwned + Send + 'static {
    type Entidad: Entidad;

    fn dar_de_alta(self, repos: &Repositorios) -> Result<Self::Entidad, CoreError>;
}

fn insertar<E: Entidad>(repos: &Repositorios, e: E) -> Result<E, CoreError>
    where Repositorios: RepositorioDe<E>
{
    let creado = repos.de::<E>().insertar(&e)?;
    debug!("{} creado: {}", E::NOMBRE, creado.id());
    Ok(creado)
}

impl Alta for NuevaCapacitacion {
    type Entidad = Capacitacion;

    fn dar_de_alta(self, repos: &Repositorios) -> Result<Capacitacion, CoreError> {
        insertar(repos, self.validar()?)
    }
}

impl Alta for NuevoUsuario {
    type Entidad = Usuario;

    fn dar_de_alta(self, repos: &Repositorios) -> Result<Usuario, CoreError> {
        let u = self.validar()?;
        exigir_unico::<Usuario>(repos,
                                &[por_texto("nombre_usuario", &u.nombre_usuario)],
                                None,
                                &format!("nombreUsuario {}", u.nombre_usuario))?;
        insertar(repos, u)
    }
}

impl Alta for NuevaArea {
    type Entidad = Area;

    fn dar_de_alta(self, repos: &Repositorios) -> Result<Area, CoreError> {
        let a = self.validar()?;
        exigir_unico::<Area>(repos, &[por_texto("codigo", &a.codigo)], None, &format!("código {}", a.codigo))?;
        insertar(repos, a)
    }
}

impl Alta for NuevaAsignacion {
    type Entidad = Asignacion;

    fn dar_de_alta(self, repos: &Repositorios) -> Result<Asignacion, CoreError> {
        let a = self.validar()?;
        referencia::<Area>(repos, a.area_id, "areaId")?;
        referencia::<Usuario>(repos, a.usuario_id, "usuarioId")?;
        exigir_unico::<Asignacion>(repos,
                                   &[por_uuid("area_id", a.area_id), por_uuid("usuario_id", a.usuario_id)],
                                   None,
                                   "el mismo área y usuario")?;
        insertar(repos, a)
    }
}

impl Alta for NuevoProceso {
    type Entidad = Proceso;

    fn dar_de_alta(self, repos: &Repositorios) -> Result<Proceso, CoreError> {
        let p = self.validar()?;
        exigir_unico::<Proceso>(repos, &[por_texto("codigo", &p.codigo)], None, &format!("código {}", p.codigo))?;
        referencia_opcional::<Area>(repos, p.area_id, "areaId")?;
        insertar(repos, p)
    }
}

impl Alta for NuevaEtapaProceso {
    type Entidad = EtapaProceso;

    fn dar_de_alta(self, repos: &Repositorios) -> Result<EtapaProceso, CoreError> {
        let proceso_id = self.proceso_id
                             .ok_or_else(|| CoreError::from(DomainError::CampoRequerido("procesoId".into())))?;
        referencia::<Proceso>(repos, proceso_id, "procesoId")?;
        let ultimo = repos.etapas
                          .listar(&[por_uuid("proceso_id", proceso_id)])?
                          .iter()
                          .map(|e| e.orden)
                          .max()
                          .unwrap_or(0);
        let siguiente = ultimo.checked_add(1)
                              .ok_or_else(|| CoreError::Validacion("orden de etapa fuera de rango".into()))?;
        insertar(repos, self.validar(siguiente)?)
    }
}

impl Alta for NuevaInstanciaProceso {
    type Entidad = InstanciaProceso;

    fn dar_de_alta(self, repos: &Repositorios) -> Result<InstanciaProceso, CoreError> {
        let i = self.validar()?;
        referencia::<Proceso>(repos, i.proceso_id, "procesoId")?;
        if let Some(etapa) = i.etapa_actual_id {
            etapa_del_proceso(repos, etapa, i.proceso_id)?;
        }
        referencia_opcional::<Usuario>(repos, i.iniciado_por, "iniciadoPor")?;
        insertar(repos, i)
    }
}

impl Alta for NuevaAccionProceso {
    type Entidad = AccionProceso;

    fn dar_de_alta(self, repos: &Repositorios) -> Result<AccionProceso, CoreError> {
        let a = self.validar()?;
        let instancia: InstanciaProceso = referencia(repos, a.instancia_id, "instanciaId")?;
        etapa_del_proceso(repos, a.etapa_id, instancia.proceso_id)?;
        referencia::<Usuario>(repos, a.usuario_id, "usuarioId")?;
        insertar(repos, a)
    }
}

impl Alta for NuevaNoConformidad {
    type Entidad = NoConformidad;

    fn dar_de_alta(self, repos: &Repositorios) -> Result<NoConformidad, CoreError> {
        let nc = self.validar()?;
        exigir_unico::<NoConformidad>(repos, &[por_texto("codigo", &nc.codigo)], None, &format!("código {}", nc.codigo))?;
        referencia_opcional::<Area>(repos, nc.area_id, "areaId")?;
        referencia_opcional::<Usuario>(repos, nc.responsable_id, "responsableId")?;
        insertar(repos, nc)
    }
}

impl Alta for NuevaAccionCorrectiva {
    type Entidad = AccionCorrectiva;

    fn dar_de_alta(self, repos: &Repositorios) -> Result<AccionCorrectiva, CoreError> {
        let ac = self.validar()?;
        referencia::<NoConformidad>(repos, ac.no_conformidad_id, "noConformidadId")?;
        referencia_opcional::<Usuario>(repos, ac.responsable_id, "responsableId")?;
        insertar(repos, ac)
    }
}

impl Alta for NuevoRiesgo {
    type Entidad = Riesgo;

    fn dar_de_alta(self, repos: &Repositorios) -> Result<Riesgo, CoreError> {
        let r = self.validar()?;
        exigir_unico::<Riesgo>(repos, &[por_texto("codigo", &r.codigo)], None, &format!("código {}", r.codigo))?;
        referencia_opcional::<Proceso>(repos, r.proceso_id, "procesoId")?;
        referencia_opcional::<Area>(repos, r.area_id, "areaId")?;
        insertar(repos, r)
    }
}

impl Alta for NuevoControlRiesgo {
    type Entidad = ControlRiesgo;

    fn dar_de_alta(self, repos: &Repositorios) -> Result<ControlRiesgo, CoreError> {
        let c = self.validar()?;
        referencia::<Riesgo>(repos, c.riesgo_id, "riesgoId")?;
        referencia_opcional::<Usuario>(repos, c.responsable_id, "responsableId")?;
        insertar(repos, c)
    }
}

impl Alta for NuevaAsistencia {
    type Entidad = AsistenciaCapacitacion;

    fn dar_de_alta(self, repos: &Repositorios) -> Result<AsistenciaCapacitacion, CoreError> {
        let a = self.validar()?;
        referencia::<Capacitacion>(repos, a.capacitacion_id, "capacitacionId")?;
        referencia::<Usuario>(repos, a.usuario_id, "usuarioId")?;
        exigir_unico::<AsistenciaCapacitacion>(repos,
                                               &[por_uuid("capacitacion_id", a.capacitacion_id),
                                                 por_uuid("usuario_id", a.usuario_id)],
                                               None,
                                               "la misma capacitación y usuario")?;
        insertar(repos, a)
    }
}

impl Alta for NuevoDocumento {
    type Entidad = Documento;

    fn dar_de_alta(self, repos: &Repositorios) -> Result<Documento, CoreError> {
        let d = self.validar()?;
        referencia_opcional::<Proceso>(repos, d.proceso_id, "procesoId")?;
        referencia_opcional::<Usuario>(repos, d.subido_por, "subidoPor")?;
        referencia_opcional::<Usuario>(repos, d.revisado_por, "revisadoPor")?;
        insertar(repos, d)
    }
}

impl Alta for NuevaNotificacion {
    type Entidad = Notificacion;

    fn dar_de_alta(self, repos: &Repositorios) -> Result<Notificacion, CoreError> {
        let n = self.validar()?;
        referencia::<Usuario>(repos, n.usuario_id, "usuarioId")?;
        insertar(repos, n)
    }
}

impl Alta for NuevaAuditoria {
    type Entidad = Auditoria;

    fn dar_de_alta(self, repos: &Repositorios) -> Result<Auditoria, CoreError> {
        let a = self.validar()?;
        referencia_opcional::<Usuario>(repos, a.usuario_id, "usuarioId")?;
        insertar(repos, a)
    }
}

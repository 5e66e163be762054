//! Cambios parciales: sólo los campos presentes en el payload se aplican.
use sgc_domain::*;
use uuid::Uuid;

use super::{etapa_del_proceso, exigir_unico, guardar_cambios, por_texto, por_uuid, referencia, referencia_opcional,
            Actualizable};
use crate::errors::CoreError;
use crate::repo::Repositorios;

/// Payload de actualización de una entidad existente.
pub trait Modificacion: serde::de::DeserializeOwned + Send + 'static {
    type Entidad: Actualizable;

    fn modificar(self, id: Uuid, repos: &Repositorios) -> Result<Self::Entidad, CoreError>;
}

macro_rules! modificacion_directa {
    ($($cambios:ty => $entidad:ty),+ $(,)?) => {
        $(impl Modificacion for $cambios {
            type Entidad = $entidad;

            fn modificar(self, id: Uuid, repos: &Repositorios) -> Result<$entidad, CoreError> {
                guardar_cambios(repos, id, |e: &mut $entidad| Ok(self.aplicar(e)?))
            }
        })+
    };
}

modificacion_directa!(CambiosEtapaProceso => EtapaProceso,
                      CambiosCapacitacion => Capacitacion,
                      CambiosAsistencia => AsistenciaCapacitacion,
                      CambiosNotificacion => Notificacion);

impl Modificacion for CambiosUsuario {
    type Entidad = Usuario;

    fn modificar(self, id: Uuid, repos: &Repositorios) -> Result<Usuario, CoreError> {
        guardar_cambios(repos, id, |u: &mut Usuario| {
            if let Some(nuevo) = self.nuevo_nombre_usuario(u) {
                exigir_unico::<Usuario>(repos,
                                        &[por_texto("nombre_usuario", nuevo)],
                                        Some(u.id),
                                        &format!("nombreUsuario {nuevo}"))?;
            }
            Ok(self.aplicar(u)?)
        })
    }
}

impl Modificacion for CambiosArea {
    type Entidad = Area;

    fn modificar(self, id: Uuid, repos: &Repositorios) -> Result<Area, CoreError> {
        guardar_cambios(repos, id, |a: &mut Area| {
            if let Some(nuevo) = self.nuevo_codigo(a) {
                exigir_unico::<Area>(repos, &[por_texto("codigo", nuevo)], Some(a.id), &format!("código {nuevo}"))?;
            }
            Ok(self.aplicar(a)?)
        })
    }
}

impl Modificacion for CambiosAsignacion {
    type Entidad = Asignacion;

    fn modificar(self, id: Uuid, repos: &Repositorios) -> Result<Asignacion, CoreError> {
        guardar_cambios(repos, id, |a: &mut Asignacion| {
            let cambia_clave = self.cambia_clave(a);
            self.aplicar(a)?;
            if cambia_clave {
                referencia::<Area>(repos, a.area_id, "areaId")?;
                referencia::<Usuario>(repos, a.usuario_id, "usuarioId")?;
                exigir_unico::<Asignacion>(repos,
                                           &[por_uuid("area_id", a.area_id), por_uuid("usuario_id", a.usuario_id)],
                                           Some(a.id),
                                           "el mismo área y usuario")?;
            }
            Ok(())
        })
    }
}

impl Modificacion for CambiosProceso {
    type Entidad = Proceso;

    fn modificar(self, id: Uuid, repos: &Repositorios) -> Result<Proceso, CoreError> {
        guardar_cambios(repos, id, |p: &mut Proceso| {
            if let Some(nuevo) = self.nuevo_codigo(p) {
                exigir_unico::<Proceso>(repos, &[por_texto("codigo", nuevo)], Some(p.id), &format!("código {nuevo}"))?;
            }
            referencia_opcional::<Area>(repos, self.area_id.flatten(), "areaId")?;
            Ok(self.aplicar(p)?)
        })
    }
}

impl Modificacion for CambiosInstanciaProceso {
    type Entidad = InstanciaProceso;

    fn modificar(self, id: Uuid, repos: &Repositorios) -> Result<InstanciaProceso, CoreError> {
        guardar_cambios(repos, id, |i: &mut InstanciaProceso| {
            if let Some(Some(etapa)) = self.etapa_actual_id {
                etapa_del_proceso(repos, etapa, i.proceso_id)?;
            }
            Ok(self.aplicar(i)?)
        })
    }
}

impl Modificacion for CambiosNoConformidad {
    type Entidad = NoConformidad;

    fn modificar(self, id: Uuid, repos: &Repositorios) -> Result<NoConformidad, CoreError> {
        guardar_cambios(repos, id, |nc: &mut NoConformidad| {
            if let Some(nuevo) = self.nuevo_codigo(nc) {
                exigir_unico::<NoConformidad>(repos,
                                              &[por_texto("codigo", nuevo)],
                                              Some(nc.id),
                                              &format!("código {nuevo}"))?;
            }
            referencia_opcional::<Area>(repos, self.area_id.flatten(), "areaId")?;
            referencia_opcional::<Usuario>(repos, self.responsable_id.flatten(), "responsableId")?;
            self.aplicar(nc)?;
            if let Some(limite) = nc.fecha_limite.filter(|l| *l < nc.fecha_deteccion) {
                return Err(CoreError::Validacion(format!("fechaLimite ({limite}) anterior a fechaDeteccion ({})",
                                                         nc.fecha_deteccion)));
            }
            Ok(())
        })
    }
}

impl Modificacion for CambiosAccionCorrectiva {
    type Entidad = AccionCorrectiva;

    fn modificar(self, id: Uuid, repos: &Repositorios) -> Result<AccionCorrectiva, CoreError> {
        guardar_cambios(repos, id, |ac: &mut AccionCorrectiva| {
            referencia_opcional::<Usuario>(repos, self.responsable_id.flatten(), "responsableId")?;
            Ok(self.aplicar(ac)?)
        })
    }
}

impl Modificacion for CambiosRiesgo {
    type Entidad = Riesgo;

    fn modificar(self, id: Uuid, repos: &Repositorios) -> Result<Riesgo, CoreError> {
        guardar_cambios(repos, id, |r: &mut Riesgo| {
            if let Some(nuevo) = self.nuevo_codigo(r) {
                exigir_unico::<Riesgo>(repos, &[por_texto("codigo", nuevo)], Some(r.id), &format!("código {nuevo}"))?;
            }
            referencia_opcional::<Proceso>(repos, self.proceso_id.flatten(), "procesoId")?;
            referencia_opcional::<Area>(repos, self.area_id.flatten(), "areaId")?;
            Ok(self.aplicar(r)?)
        })
    }
}

impl Modificacion for CambiosControlRiesgo {
    type Entidad = ControlRiesgo;

    fn modificar(self, id: Uuid, repos: &Repositorios) -> Result<ControlRiesgo, CoreError> {
        guardar_cambios(repos, id, |c: &mut ControlRiesgo| {
            referencia_opcional::<Usuario>(repos, self.responsable_id.flatten(), "responsableId")?;
            Ok(self.aplicar(c)?)
        })
    }
}

impl Modificacion for CambiosDocumento {
    type Entidad = Documento;

    fn modificar(self, id: Uuid, repos: &Repositorios) -> Result<Documento, CoreError> {
        guardar_cambios(repos, id, |d: &mut Documento| {
            referencia_opcional::<Proceso>(repos, self.proceso_id.flatten(), "procesoId")?;
            referencia_opcional::<Usuario>(repos, self.subido_por.flatten(), "subidoPor")?;
            referencia_opcional::<Usuario>(repos, self.revisado_por.flatten(), "revisadoPor")?;
            Ok(self.aplicar(d)?)
        })
    }
}

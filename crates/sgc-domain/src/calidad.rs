//! No conformidades y acciones correctivas.
//!
//! Las transiciones de estado se invocan con acciones explícitas
//! (`iniciar-tratamiento`, `cerrar`, ...) y sobrescriben el estado sin mirar
//! el anterior: cerrar dos veces una no conformidad no es un error.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entidad::{Entidad, Filtrable, TipoCampo, ValorCampo};
use crate::estados::{EstadoAccionCorrectiva, EstadoNoConformidad, Gravedad};
use crate::validacion::{anulable, no_vacio, presente, requerido};
use crate::DomainError;

/// Cuerpo opcional de las acciones de transición.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observacion {
    pub observaciones: Option<String>,
}

/// Desviación detectada respecto de un estándar de calidad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoConformidad {
    pub id: Uuid,
    pub codigo: String,
    pub descripcion: String,
    pub gravedad: Gravedad,
    pub origen: Option<String>,
    pub fecha_deteccion: NaiveDate,
    pub fecha_limite: Option<NaiveDate>,
    pub area_id: Option<Uuid>,
    pub responsable_id: Option<Uuid>,
    pub estado: EstadoNoConformidad,
    pub observaciones: Option<String>,
    pub fecha_cierre: Option<DateTime<Utc>>,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: Option<DateTime<Utc>>,
}

impl NoConformidad {
    pub fn iniciar_tratamiento(&mut self, obs: Observacion) {
        self.estado = EstadoNoConformidad::EnTratamiento;
        if obs.observaciones.is_some() {
            self.observaciones = obs.observaciones;
        }
    }

    pub fn cerrar(&mut self, obs: Observacion) {
        self.estado = EstadoNoConformidad::Cerrada;
        self.fecha_cierre = Some(Utc::now());
        if obs.observaciones.is_some() {
            self.observaciones = obs.observaciones;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevaNoConformidad {
    pub codigo: Option<String>,
    pub descripcion: Option<String>,
    pub gravedad: Option<Gravedad>,
    pub origen: Option<String>,
    pub fecha_deteccion: Option<NaiveDate>,
    pub fecha_limite: Option<NaiveDate>,
    pub area_id: Option<Uuid>,
    pub responsable_id: Option<Uuid>,
    pub estado: Option<EstadoNoConformidad>,
    pub observaciones: Option<String>,
}

impl NuevaNoConformidad {
    pub fn validar(self) -> Result<NoConformidad, DomainError> {
        let ahora = Utc::now();
        let fecha_deteccion = self.fecha_deteccion.unwrap_or_else(|| ahora.date_naive());
        if let Some(limite) = self.fecha_limite.filter(|l| *l < fecha_deteccion) {
            return Err(DomainError::Validacion(format!("fechaLimite ({limite}) anterior a fechaDeteccion ({fecha_deteccion})")));
        }
        Ok(NoConformidad { id: Uuid::new_v4(),
                           codigo: requerido(self.codigo, "codigo")?,
                           descripcion: requerido(self.descripcion, "descripcion")?,
                           gravedad: self.gravedad.unwrap_or_default(),
                           origen: self.origen,
                           fecha_deteccion,
                           fecha_limite: self.fecha_limite,
                           area_id: self.area_id,
                           responsable_id: self.responsable_id,
                           estado: self.estado.unwrap_or_default(),
                           observaciones: self.observaciones,
                           fecha_cierre: None,
                           creado_en: ahora,
                           actualizado_en: None })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CambiosNoConformidad {
    pub codigo: Option<String>,
    pub descripcion: Option<String>,
    pub gravedad: Option<Gravedad>,
    #[serde(default, deserialize_with = "anulable")]
    pub origen: Option<Option<String>>,
    pub fecha_deteccion: Option<NaiveDate>,
    #[serde(default, deserialize_with = "anulable")]
    pub fecha_limite: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "anulable")]
    pub area_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "anulable")]
    pub responsable_id: Option<Option<Uuid>>,
    pub estado: Option<EstadoNoConformidad>,
    #[serde(default, deserialize_with = "anulable")]
    pub observaciones: Option<Option<String>>,
}

impl CambiosNoConformidad {
    pub fn nuevo_codigo<'a>(&'a self, actual: &NoConformidad) -> Option<&'a str> {
        self.codigo.as_deref().filter(|c| *c != actual.codigo)
    }

    pub fn aplicar(self, nc: &mut NoConformidad) -> Result<(), DomainError> {
        if let Some(v) = no_vacio(self.codigo, "codigo")? {
            nc.codigo = v;
        }
        if let Some(v) = no_vacio(self.descripcion, "descripcion")? {
            nc.descripcion = v;
        }
        if let Some(g) = self.gravedad {
            nc.gravedad = g;
        }
        if let Some(v) = self.origen {
            nc.origen = v;
        }
        if let Some(f) = self.fecha_deteccion {
            nc.fecha_deteccion = f;
        }
        if let Some(v) = self.fecha_limite {
            nc.fecha_limite = v;
        }
        if let Some(v) = self.area_id {
            nc.area_id = v;
        }
        if let Some(v) = self.responsable_id {
            nc.responsable_id = v;
        }
        if let Some(e) = self.estado {
            nc.estado = e;
        }
        if let Some(v) = self.observaciones {
            nc.observaciones = v;
        }
        Ok(())
    }
}

impl Entidad for NoConformidad {
    const NOMBRE: &'static str = "no conformidad";
    const FILTROS: &'static [Filtrable] = &[Filtrable::new("estado", "estado", TipoCampo::Catalogo(EstadoNoConformidad::normalizar)),
                                            Filtrable::new("areaId", "area_id", TipoCampo::Uuid),
                                            Filtrable::new("responsableId", "responsable_id", TipoCampo::Uuid)];

    fn id(&self) -> Uuid {
        self.id
    }

    fn marca_orden(&self) -> DateTime<Utc> {
        self.creado_en
    }

    fn valor_campo(&self, campo: &str) -> Option<ValorCampo> {
        match campo {
            "codigo" => Some(ValorCampo::Texto(self.codigo.clone())),
            "estado" => Some(ValorCampo::Texto(self.estado.as_str().to_string())),
            "area_id" => self.area_id.map(ValorCampo::Uuid),
            "responsable_id" => self.responsable_id.map(ValorCampo::Uuid),
            _ => None,
        }
    }
}

/// Acción correctiva ligada a una no conformidad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccionCorrectiva {
    pub id: Uuid,
    pub no_conformidad_id: Uuid,
    pub descripcion: String,
    pub responsable_id: Option<Uuid>,
    pub fecha_compromiso: Option<NaiveDate>,
    pub estado: EstadoAccionCorrectiva,
    pub observaciones: Option<String>,
    pub fecha_completado: Option<DateTime<Utc>>,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: Option<DateTime<Utc>>,
}

impl AccionCorrectiva {
    fn anotar(&mut self, obs: Observacion) {
        if obs.observaciones.is_some() {
            self.observaciones = obs.observaciones;
        }
    }

    pub fn iniciar(&mut self, obs: Observacion) {
        self.estado = EstadoAccionCorrectiva::EnProceso;
        self.anotar(obs);
    }

    pub fn completar(&mut self, obs: Observacion) {
        self.estado = EstadoAccionCorrectiva::Completada;
        self.fecha_completado = Some(Utc::now());
        self.anotar(obs);
    }

    pub fn verificar(&mut self, obs: Observacion) {
        self.estado = EstadoAccionCorrectiva::Verificada;
        self.anotar(obs);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevaAccionCorrectiva {
    pub no_conformidad_id: Option<Uuid>,
    pub descripcion: Option<String>,
    pub responsable_id: Option<Uuid>,
    pub fecha_compromiso: Option<NaiveDate>,
    pub estado: Option<EstadoAccionCorrectiva>,
    pub observaciones: Option<String>,
}

impl NuevaAccionCorrectiva {
    pub fn validar(self) -> Result<AccionCorrectiva, DomainError> {
        Ok(AccionCorrectiva { id: Uuid::new_v4(),
                              no_conformidad_id: presente(self.no_conformidad_id, "noConformidadId")?,
                              descripcion: requerido(self.descripcion, "descripcion")?,
                              responsable_id: self.responsable_id,
                              fecha_compromiso: self.fecha_compromiso,
                              estado: self.estado.unwrap_or_default(),
                              observaciones: self.observaciones,
                              fecha_completado: None,
                              creado_en: Utc::now(),
                              actualizado_en: None })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CambiosAccionCorrectiva {
    pub descripcion: Option<String>,
    #[serde(default, deserialize_with = "anulable")]
    pub responsable_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "anulable")]
    pub fecha_compromiso: Option<Option<NaiveDate>>,
    pub estado: Option<EstadoAccionCorrectiva>,
    #[serde(default, deserialize_with = "anulable")]
    pub observaciones: Option<Option<String>>,
}

impl CambiosAccionCorrectiva {
    pub fn aplicar(self, ac: &mut AccionCorrectiva) -> Result<(), DomainError> {
        if let Some(v) = no_vacio(self.descripcion, "descripcion")? {
            ac.descripcion = v;
        }
        if let Some(v) = self.responsable_id {
            ac.responsable_id = v;
        }
        if let Some(v) = self.fecha_compromiso {
            ac.fecha_compromiso = v;
        }
        if let Some(e) = self.estado {
            ac.estado = e;
        }
        if let Some(v) = self.observaciones {
            ac.observaciones = v;
        }
        Ok(())
    }
}

impl Entidad for AccionCorrectiva {
    const NOMBRE: &'static str = "acción correctiva";
    const FILTROS: &'static [Filtrable] = &[Filtrable::new("noConformidadId", "no_conformidad_id", TipoCampo::Uuid),
                                            Filtrable::new("estado", "estado", TipoCampo::Catalogo(EstadoAccionCorrectiva::normalizar))];

    fn id(&self) -> Uuid {
        self.id
    }

    fn marca_orden(&self) -> DateTime<Utc> {
        self.creado_en
    }

    fn valor_campo(&self, campo: &str) -> Option<ValorCampo> {
        match campo {
            "no_conformidad_id" => Some(ValorCampo::Uuid(self.no_conformidad_id)),
            "estado" => Some(ValorCampo::Texto(self.estado.as_str().to_string())),
            _ => None,
        }
    }
}

//! Capacitaciones y asistencia por usuario.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entidad::{Entidad, Filtrable, TipoCampo, ValorCampo};
use crate::estados::EstadoCapacitacion;
use crate::validacion::{anulable, no_vacio, presente, requerido};
use crate::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capacitacion {
    pub id: Uuid,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub instructor: Option<String>,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: Option<NaiveDate>,
    pub duracion_horas: Option<f64>,
    pub modalidad: Option<String>,
    pub estado: EstadoCapacitacion,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: Option<DateTime<Utc>>,
}

fn validar_fechas(inicio: NaiveDate, fin: Option<NaiveDate>) -> Result<(), DomainError> {
    match fin {
        Some(f) if f < inicio => Err(DomainError::Validacion(format!("fechaFin ({f}) anterior a fechaInicio ({inicio})"))),
        _ => Ok(()),
    }
}

fn validar_duracion(horas: Option<f64>) -> Result<(), DomainError> {
    match horas {
        Some(h) if !h.is_finite() || h < 0.0 => Err(DomainError::Validacion(format!("duracionHoras no válida: {h}"))),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevaCapacitacion {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub instructor: Option<String>,
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_fin: Option<NaiveDate>,
    pub duracion_horas: Option<f64>,
    pub modalidad: Option<String>,
    pub estado: Option<EstadoCapacitacion>,
}

impl NuevaCapacitacion {
    pub fn validar(self) -> Result<Capacitacion, DomainError> {
        let nombre = requerido(self.nombre, "nombre")?;
        let fecha_inicio = presente(self.fecha_inicio, "fechaInicio")?;
        validar_fechas(fecha_inicio, self.fecha_fin)?;
        validar_duracion(self.duracion_horas)?;
        Ok(Capacitacion { id: Uuid::new_v4(),
                          nombre,
                          descripcion: self.descripcion,
                          instructor: self.instructor,
                          fecha_inicio,
                          fecha_fin: self.fecha_fin,
                          duracion_horas: self.duracion_horas,
                          modalidad: self.modalidad,
                          estado: self.estado.unwrap_or_default(),
                          creado_en: Utc::now(),
                          actualizado_en: None })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CambiosCapacitacion {
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "anulable")]
    pub descripcion: Option<Option<String>>,
    #[serde(default, deserialize_with = "anulable")]
    pub instructor: Option<Option<String>>,
    pub fecha_inicio: Option<NaiveDate>,
    #[serde(default, deserialize_with = "anulable")]
    pub fecha_fin: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "anulable")]
    pub duracion_horas: Option<Option<f64>>,
    #[serde(default, deserialize_with = "anulable")]
    pub modalidad: Option<Option<String>>,
    pub estado: Option<EstadoCapacitacion>,
}

impl CambiosCapacitacion {
    pub fn aplicar(self, c: &mut Capacitacion) -> Result<(), DomainError> {
        if let Some(v) = no_vacio(self.nombre, "nombre")? {
            c.nombre = v;
        }
        if let Some(v) = self.descripcion {
            c.descripcion = v;
        }
        if let Some(v) = self.instructor {
            c.instructor = v;
        }
        if let Some(f) = self.fecha_inicio {
            c.fecha_inicio = f;
        }
        if let Some(v) = self.fecha_fin {
            c.fecha_fin = v;
        }
        validar_fechas(c.fecha_inicio, c.fecha_fin)?;
        if let Some(horas) = self.duracion_horas {
            validar_duracion(horas)?;
            c.duracion_horas = horas;
        }
        if let Some(v) = self.modalidad {
            c.modalidad = v;
        }
        if let Some(e) = self.estado {
            c.estado = e;
        }
        Ok(())
    }
}

impl Entidad for Capacitacion {
    const NOMBRE: &'static str = "capacitación";
    const FILTROS: &'static [Filtrable] = &[Filtrable::new("estado", "estado", TipoCampo::Catalogo(EstadoCapacitacion::normalizar))];

    fn id(&self) -> Uuid {
        self.id
    }

    fn marca_orden(&self) -> DateTime<Utc> {
        self.creado_en
    }

    fn valor_campo(&self, campo: &str) -> Option<ValorCampo> {
        match campo {
            "estado" => Some(ValorCampo::Texto(self.estado.as_str().to_string())),
            _ => None,
        }
    }
}

/// Asistencia de un usuario a una capacitación. Única por
/// (capacitación, usuario); la pareja no cambia después del alta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsistenciaCapacitacion {
    pub id: Uuid,
    pub capacitacion_id: Uuid,
    pub usuario_id: Uuid,
    pub asistio: bool,
    pub calificacion: Option<f64>,
    pub comentarios: Option<String>,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevaAsistencia {
    pub capacitacion_id: Option<Uuid>,
    pub usuario_id: Option<Uuid>,
    pub asistio: Option<bool>,
    pub calificacion: Option<f64>,
    pub comentarios: Option<String>,
}

impl NuevaAsistencia {
    pub fn validar(self) -> Result<AsistenciaCapacitacion, DomainError> {
        Ok(AsistenciaCapacitacion { id: Uuid::new_v4(),
                                    capacitacion_id: presente(self.capacitacion_id, "capacitacionId")?,
                                    usuario_id: presente(self.usuario_id, "usuarioId")?,
                                    asistio: self.asistio.unwrap_or(false),
                                    calificacion: self.calificacion,
                                    comentarios: self.comentarios,
                                    creado_en: Utc::now(),
                                    actualizado_en: None })
    }
}

/// Sólo los datos de asistencia son editables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CambiosAsistencia {
    pub asistio: Option<bool>,
    #[serde(default, deserialize_with = "anulable")]
    pub calificacion: Option<Option<f64>>,
    #[serde(default, deserialize_with = "anulable")]
    pub comentarios: Option<Option<String>>,
}

impl CambiosAsistencia {
    pub fn aplicar(self, a: &mut AsistenciaCapacitacion) -> Result<(), DomainError> {
        if let Some(v) = self.asistio {
            a.asistio = v;
        }
        if let Some(v) = self.calificacion {
            a.calificacion = v;
        }
        if let Some(v) = self.comentarios {
            a.comentarios = v;
        }
        Ok(())
    }
}

impl Entidad for AsistenciaCapacitacion {
    const NOMBRE: &'static str = "asistencia";
    const FILTROS: &'static [Filtrable] = &[Filtrable::new("capacitacionId", "capacitacion_id", TipoCampo::Uuid),
                                            Filtrable::new("usuarioId", "usuario_id", TipoCampo::Uuid)];

    fn id(&self) -> Uuid {
        self.id
    }

    fn marca_orden(&self) -> DateTime<Utc> {
        self.creado_en
    }

    fn valor_campo(&self, campo: &str) -> Option<ValorCampo> {
        match campo {
            "capacitacion_id" => Some(ValorCampo::Uuid(self.capacitacion_id)),
            "usuario_id" => Some(ValorCampo::Uuid(self.usuario_id)),
            _ => None,
        }
    }
}

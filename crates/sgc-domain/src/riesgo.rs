//! Riesgos y sus controles mitigantes.

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::entidad::{Entidad, Filtrable, TipoCampo, ValorCampo};
use crate::estados::{Efectividad, EstadoRiesgo, TipoControl};
use crate::validacion::{anulable, en_escala, no_vacio, presente, requerido};
use crate::DomainError;

/// Se serializa a mano para incluir `nivel`, que no se persiste.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Riesgo {
    pub id: Uuid,
    pub codigo: String,
    pub descripcion: String,
    pub proceso_id: Option<Uuid>,
    pub area_id: Option<Uuid>,
    /// Escala 1..=5.
    pub probabilidad: i32,
    /// Escala 1..=5.
    pub impacto: i32,
    pub estado: EstadoRiesgo,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: Option<DateTime<Utc>>,
}

impl Riesgo {
    /// Nivel derivado: probabilidad × impacto (1..=25).
    pub fn nivel(&self) -> i32 {
        self.probabilidad * self.impacto
    }
}

impl Serialize for Riesgo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut r = serializer.serialize_struct("Riesgo", 11)?;
        r.serialize_field("id", &self.id)?;
        r.serialize_field("codigo", &self.codigo)?;
        r.serialize_field("descripcion", &self.descripcion)?;
        r.serialize_field("procesoId", &self.proceso_id)?;
        r.serialize_field("areaId", &self.area_id)?;
        r.serialize_field("probabilidad", &self.probabilidad)?;
        r.serialize_field("impacto", &self.impacto)?;
        r.serialize_field("nivel", &self.nivel())?;
        r.serialize_field("estado", &self.estado)?;
        r.serialize_field("creadoEn", &self.creado_en)?;
        r.serialize_field("actualizadoEn", &self.actualizado_en)?;
        r.end()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevoRiesgo {
    pub codigo: Option<String>,
    pub descripcion: Option<String>,
    pub proceso_id: Option<Uuid>,
    pub area_id: Option<Uuid>,
    pub probabilidad: Option<i32>,
    pub impacto: Option<i32>,
    pub estado: Option<EstadoRiesgo>,
}

impl NuevoRiesgo {
    pub fn validar(self) -> Result<Riesgo, DomainError> {
        Ok(Riesgo { id: Uuid::new_v4(),
                    codigo: requerido(self.codigo, "codigo")?,
                    descripcion: requerido(self.descripcion, "descripcion")?,
                    proceso_id: self.proceso_id,
                    area_id: self.area_id,
                    probabilidad: en_escala(self.probabilidad.unwrap_or(1), "probabilidad")?,
                    impacto: en_escala(self.impacto.unwrap_or(1), "impacto")?,
                    estado: self.estado.unwrap_or_default(),
                    creado_en: Utc::now(),
                    actualizado_en: None })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CambiosRiesgo {
    pub codigo: Option<String>,
    pub descripcion: Option<String>,
    #[serde(default, deserialize_with = "anulable")]
    pub proceso_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "anulable")]
    pub area_id: Option<Option<Uuid>>,
    pub probabilidad: Option<i32>,
    pub impacto: Option<i32>,
    pub estado: Option<EstadoRiesgo>,
}

impl CambiosRiesgo {
    pub fn nuevo_codigo<'a>(&'a self, actual: &Riesgo) -> Option<&'a str> {
        self.codigo.as_deref().filter(|c| *c != actual.codigo)
    }

    pub fn aplicar(self, r: &mut Riesgo) -> Result<(), DomainError> {
        if let Some(v) = no_vacio(self.codigo, "codigo")? {
            r.codigo = v;
        }
        if let Some(v) = no_vacio(self.descripcion, "descripcion")? {
            r.descripcion = v;
        }
        if let Some(v) = self.proceso_id {
            r.proceso_id = v;
        }
        if let Some(v) = self.area_id {
            r.area_id = v;
        }
        if let Some(p) = self.probabilidad {
            r.probabilidad = en_escala(p, "probabilidad")?;
        }
        if let Some(i) = self.impacto {
            r.impacto = en_escala(i, "impacto")?;
        }
        if let Some(e) = self.estado {
            r.estado = e;
        }
        Ok(())
    }
}

impl Entidad for Riesgo {
    const NOMBRE: &'static str = "riesgo";
    const FILTROS: &'static [Filtrable] = &[Filtrable::new("procesoId", "proceso_id", TipoCampo::Uuid),
                                            Filtrable::new("estado", "estado", TipoCampo::Catalogo(EstadoRiesgo::normalizar))];

    fn id(&self) -> Uuid {
        self.id
    }

    fn marca_orden(&self) -> DateTime<Utc> {
        self.creado_en
    }

    fn valor_campo(&self, campo: &str) -> Option<ValorCampo> {
        match campo {
            "codigo" => Some(ValorCampo::Texto(self.codigo.clone())),
            "proceso_id" => self.proceso_id.map(ValorCampo::Uuid),
            "estado" => Some(ValorCampo::Texto(self.estado.as_str().to_string())),
            _ => None,
        }
    }
}

/// Control mitigante; pertenece a exactamente un riesgo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlRiesgo {
    pub id: Uuid,
    pub riesgo_id: Uuid,
    pub descripcion: String,
    pub tipo: TipoControl,
    pub responsable_id: Option<Uuid>,
    pub frecuencia: Option<String>,
    pub efectividad: Option<Efectividad>,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevoControlRiesgo {
    pub riesgo_id: Option<Uuid>,
    pub descripcion: Option<String>,
    pub tipo: Option<TipoControl>,
    pub responsable_id: Option<Uuid>,
    pub frecuencia: Option<String>,
    pub efectividad: Option<Efectividad>,
}

impl NuevoControlRiesgo {
    pub fn validar(self) -> Result<ControlRiesgo, DomainError> {
        Ok(ControlRiesgo { id: Uuid::new_v4(),
                           riesgo_id: presente(self.riesgo_id, "riesgoId")?,
                           descripcion: requerido(self.descripcion, "descripcion")?,
                           tipo: presente(self.tipo, "tipo")?,
                           responsable_id: self.responsable_id,
                           frecuencia: self.frecuencia,
                           efectividad: self.efectividad,
                           creado_en: Utc::now(),
                           actualizado_en: None })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CambiosControlRiesgo {
    pub descripcion: Option<String>,
    pub tipo: Option<TipoControl>,
    #[serde(default, deserialize_with = "anulable")]
    pub responsable_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "anulable")]
    pub frecuencia: Option<Option<String>>,
    #[serde(default, deserialize_with = "anulable")]
    pub efectividad: Option<Option<Efectividad>>,
}

impl CambiosControlRiesgo {
    pub fn aplicar(self, c: &mut ControlRiesgo) -> Result<(), DomainError> {
        if let Some(v) = no_vacio(self.descripcion, "descripcion")? {
            c.descripcion = v;
        }
        if let Some(t) = self.tipo {
            c.tipo = t;
        }
        if let Some(v) = self.responsable_id {
            c.responsable_id = v;
        }
        if let Some(v) = self.frecuencia {
            c.frecuencia = v;
        }
        if let Some(v) = self.efectividad {
            c.efectividad = v;
        }
        Ok(())
    }
}

impl Entidad for ControlRiesgo {
    const NOMBRE: &'static str = "control de riesgo";
    const FILTROS: &'static [Filtrable] = &[Filtrable::new("riesgoId", "riesgo_id", TipoCampo::Uuid)];

    fn id(&self) -> Uuid {
        self.id
    }

    fn marca_orden(&self) -> DateTime<Utc> {
        self.creado_en
    }

    fn valor_campo(&self, campo: &str) -> Option<ValorCampo> {
        match campo {
            "riesgo_id" => Some(ValorCampo::Uuid(self.riesgo_id)),
            _ => None,
        }
    }
}

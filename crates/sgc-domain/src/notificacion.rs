//! Notificaciones a usuarios y bitácora de auditoría.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::datos::DatosJson;
use crate::entidad::{Entidad, Filtrable, TipoCampo, ValorCampo};
use crate::validacion::{no_vacio, presente, requerido};
use crate::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notificacion {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub tipo: String,
    pub contenido: DatosJson,
    pub entregada: bool,
    pub entregada_en: Option<DateTime<Utc>>,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: Option<DateTime<Utc>>,
}

impl Notificacion {
    pub fn marcar_entregada(&mut self) {
        self.entregada = true;
        self.entregada_en = Some(Utc::now());
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevaNotificacion {
    pub usuario_id: Option<Uuid>,
    pub tipo: Option<String>,
    pub contenido: Option<DatosJson>,
    pub entregada: Option<bool>,
}

impl NuevaNotificacion {
    pub fn validar(self) -> Result<Notificacion, DomainError> {
        let ahora = Utc::now();
        let entregada = self.entregada.unwrap_or(false);
        Ok(Notificacion { id: Uuid::new_v4(),
                          usuario_id: presente(self.usuario_id, "usuarioId")?,
                          tipo: requerido(self.tipo, "tipo")?,
                          contenido: self.contenido.unwrap_or_default(),
                          entregada,
                          entregada_en: entregada.then_some(ahora),
                          creado_en: ahora,
                          actualizado_en: None })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CambiosNotificacion {
    pub tipo: Option<String>,
    pub contenido: Option<DatosJson>,
    pub entregada: Option<bool>,
}

impl CambiosNotificacion {
    pub fn aplicar(self, n: &mut Notificacion) -> Result<(), DomainError> {
        if let Some(v) = no_vacio(self.tipo, "tipo")? {
            n.tipo = v;
        }
        if let Some(c) = self.contenido {
            n.contenido = c;
        }
        match self.entregada {
            Some(true) if !n.entregada => n.marcar_entregada(),
            Some(false) => {
                n.entregada = false;
                n.entregada_en = None;
            }
            _ => {}
        }
        Ok(())
    }
}

impl Entidad for Notificacion {
    const NOMBRE: &'static str = "notificación";
    const FILTROS: &'static [Filtrable] = &[Filtrable::new("usuarioId", "usuario_id", TipoCampo::Uuid),
                                            Filtrable::new("entregada", "entregada", TipoCampo::Booleano)];

    fn id(&self) -> Uuid {
        self.id
    }

    fn marca_orden(&self) -> DateTime<Utc> {
        self.creado_en
    }

    fn valor_campo(&self, campo: &str) -> Option<ValorCampo> {
        match campo {
            "usuario_id" => Some(ValorCampo::Uuid(self.usuario_id)),
            "entregada" => Some(ValorCampo::Booleano(self.entregada)),
            _ => None,
        }
    }
}

/// Entrada de auditoría. Sólo se agrega: no hay cambios ni bajas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Auditoria {
    pub id: Uuid,
    /// Actor; `None` si el usuario ya no existe.
    pub usuario_id: Option<Uuid>,
    pub entidad_tipo: String,
    pub entidad_id: Uuid,
    pub accion: String,
    pub detalles: DatosJson,
    pub creado_en: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevaAuditoria {
    pub usuario_id: Option<Uuid>,
    pub entidad_tipo: Option<String>,
    pub entidad_id: Option<Uuid>,
    pub accion: Option<String>,
    pub detalles: Option<DatosJson>,
}

impl NuevaAuditoria {
    pub fn validar(self) -> Result<Auditoria, DomainError> {
        Ok(Auditoria { id: Uuid::new_v4(),
                       usuario_id: self.usuario_id,
                       entidad_tipo: requerido(self.entidad_tipo, "entidadTipo")?,
                       entidad_id: presente(self.entidad_id, "entidadId")?,
                       accion: requerido(self.accion, "accion")?,
                       detalles: self.detalles.unwrap_or_default(),
                       creado_en: Utc::now() })
    }
}

impl Entidad for Auditoria {
    const NOMBRE: &'static str = "registro de auditoría";
    const FILTROS: &'static [Filtrable] = &[Filtrable::new("entidadTipo", "entidad_tipo", TipoCampo::Texto),
                                            Filtrable::new("entidadId", "entidad_id", TipoCampo::Uuid),
                                            Filtrable::new("usuarioId", "usuario_id", TipoCampo::Uuid)];

    fn id(&self) -> Uuid {
        self.id
    }

    fn marca_orden(&self) -> DateTime<Utc> {
        self.creado_en
    }

    fn valor_campo(&self, campo: &str) -> Option<ValorCampo> {
        match campo {
            "entidad_tipo" => Some(ValorCampo::Texto(self.entidad_tipo.clone())),
            "entidad_id" => Some(ValorCampo::Uuid(self.entidad_id)),
            "usuario_id" => self.usuario_id.map(ValorCampo::Uuid),
            _ => None,
        }
    }
}

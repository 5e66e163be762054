//! Procesos, sus etapas, sus ejecuciones (instancias) y la bitácora de
//! acciones tomadas en cada ejecución.
//!
//! Relación entre tipos:
//! - `Proceso` 1..N `EtapaProceso` (definición de etapas, ordenadas por `orden`).
//! - `Proceso` 1..N `InstanciaProceso` (cada corrida del proceso).
//! - `InstanciaProceso` 1..N `AccionProceso` (append-only, una por acción).
//!
//! Invariante lógico: `InstanciaProceso::etapa_actual_id`, cuando existe,
//! apunta a una etapa del MISMO proceso. La base de datos no lo garantiza; lo
//! verifica el servicio antes de persistir.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::datos::DatosJson;
use crate::entidad::{Entidad, Filtrable, TipoCampo, ValorCampo};
use crate::estados::{EstadoInstancia, EstadoProceso};
use crate::validacion::{anulable, no_vacio, presente, requerido};
use crate::DomainError;

pub const VERSION_INICIAL: &str = "1.0";

/// Proceso organizacional definido. Único por `codigo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proceso {
    pub id: Uuid,
    pub codigo: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub objetivo: Option<String>,
    pub area_id: Option<Uuid>,
    pub estado: EstadoProceso,
    pub version: String,
    pub fecha_revision: Option<NaiveDate>,
    pub proxima_revision: Option<NaiveDate>,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevoProceso {
    pub codigo: Option<String>,
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub objetivo: Option<String>,
    pub area_id: Option<Uuid>,
    pub estado: Option<EstadoProceso>,
    pub version: Option<String>,
    pub fecha_revision: Option<NaiveDate>,
    pub proxima_revision: Option<NaiveDate>,
}

impl NuevoProceso {
    pub fn validar(self) -> Result<Proceso, DomainError> {
        Ok(Proceso { id: Uuid::new_v4(),
                     codigo: requerido(self.codigo, "codigo")?,
                     nombre: requerido(self.nombre, "nombre")?,
                     descripcion: self.descripcion,
                     objetivo: self.objetivo,
                     area_id: self.area_id,
                     estado: self.estado.unwrap_or_default(),
                     version: self.version.unwrap_or_else(|| VERSION_INICIAL.to_string()),
                     fecha_revision: self.fecha_revision,
                     proxima_revision: self.proxima_revision,
                     creado_en: Utc::now(),
                     actualizado_en: None })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CambiosProceso {
    pub codigo: Option<String>,
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "anulable")]
    pub descripcion: Option<Option<String>>,
    #[serde(default, deserialize_with = "anulable")]
    pub objetivo: Option<Option<String>>,
    #[serde(default, deserialize_with = "anulable")]
    pub area_id: Option<Option<Uuid>>,
    pub estado: Option<EstadoProceso>,
    pub version: Option<String>,
    #[serde(default, deserialize_with = "anulable")]
    pub fecha_revision: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "anulable")]
    pub proxima_revision: Option<Option<NaiveDate>>,
}

impl CambiosProceso {
    /// Nuevo código si el cambio lo renombra.
    pub fn nuevo_codigo<'a>(&'a self, actual: &Proceso) -> Option<&'a str> {
        self.codigo.as_deref().filter(|c| *c != actual.codigo)
    }

    pub fn aplicar(self, p: &mut Proceso) -> Result<(), DomainError> {
        if let Some(v) = no_vacio(self.codigo, "codigo")? {
            p.codigo = v;
        }
        if let Some(v) = no_vacio(self.nombre, "nombre")? {
            p.nombre = v;
        }
        if let Some(v) = no_vacio(self.version, "version")? {
            p.version = v;
        }
        if let Some(v) = self.descripcion {
            p.descripcion = v;
        }
        if let Some(v) = self.objetivo {
            p.objetivo = v;
        }
        if let Some(v) = self.area_id {
            p.area_id = v;
        }
        if let Some(e) = self.estado {
            p.estado = e;
        }
        if let Some(v) = self.fecha_revision {
            p.fecha_revision = v;
        }
        if let Some(v) = self.proxima_revision {
            p.proxima_revision = v;
        }
        Ok(())
    }
}

impl Entidad for Proceso {
    const NOMBRE: &'static str = "proceso";
    const FILTROS: &'static [Filtrable] = &[Filtrable::new("areaId", "area_id", TipoCampo::Uuid),
                                            Filtrable::new("estado", "estado", TipoCampo::Catalogo(EstadoProceso::normalizar))];

    fn id(&self) -> Uuid {
        self.id
    }

    fn marca_orden(&self) -> DateTime<Utc> {
        self.creado_en
    }

    fn valor_campo(&self, campo: &str) -> Option<ValorCampo> {
        match campo {
            "codigo" => Some(ValorCampo::Texto(self.codigo.clone())),
            "area_id" => self.area_id.map(ValorCampo::Uuid),
            "estado" => Some(ValorCampo::Texto(self.estado.as_str().to_string())),
            _ => None,
        }
    }
}

/// Etapa nombrada de un proceso.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtapaProceso {
    pub id: Uuid,
    pub proceso_id: Uuid,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub orden: i32,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevaEtapaProceso {
    pub proceso_id: Option<Uuid>,
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub orden: Option<i32>,
}

impl NuevaEtapaProceso {
    /// `orden_siguiente` se usa cuando el cliente no envía `orden`.
    pub fn validar(self, orden_siguiente: i32) -> Result<EtapaProceso, DomainError> {
        let orden = self.orden.unwrap_or(orden_siguiente);
        if orden < 1 {
            return Err(DomainError::Validacion(format!("orden debe ser positivo (recibido {orden})")));
        }
        Ok(EtapaProceso { id: Uuid::new_v4(),
                          proceso_id: presente(self.proceso_id, "procesoId")?,
                          nombre: requerido(self.nombre, "nombre")?,
                          descripcion: self.descripcion,
                          orden,
                          creado_en: Utc::now(),
                          actualizado_en: None })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CambiosEtapaProceso {
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "anulable")]
    pub descripcion: Option<Option<String>>,
    pub orden: Option<i32>,
}

impl CambiosEtapaProceso {
    pub fn aplicar(self, e: &mut EtapaProceso) -> Result<(), DomainError> {
        if let Some(v) = no_vacio(self.nombre, "nombre")? {
            e.nombre = v;
        }
        if let Some(v) = self.descripcion {
            e.descripcion = v;
        }
        if let Some(o) = self.orden {
            if o < 1 {
                return Err(DomainError::Validacion(format!("orden debe ser positivo (recibido {o})")));
            }
            e.orden = o;
        }
        Ok(())
    }
}

impl Entidad for EtapaProceso {
    const NOMBRE: &'static str = "etapa de proceso";
    const FILTROS: &'static [Filtrable] = &[Filtrable::new("procesoId", "proceso_id", TipoCampo::Uuid)];

    fn id(&self) -> Uuid {
        self.id
    }

    fn marca_orden(&self) -> DateTime<Utc> {
        self.creado_en
    }

    fn valor_campo(&self, campo: &str) -> Option<ValorCampo> {
        match campo {
            "proceso_id" => Some(ValorCampo::Uuid(self.proceso_id)),
            _ => None,
        }
    }
}

/// Una corrida de un `Proceso`.
///
/// Se crea en `borrador`, se inicia, avanza por etapas y se completa o
/// cancela. Nunca se elimina físicamente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanciaProceso {
    pub id: Uuid,
    pub proceso_id: Uuid,
    pub estado: EstadoInstancia,
    pub iniciado_por: Option<Uuid>,
    pub fecha_inicio: Option<DateTime<Utc>>,
    pub fecha_completado: Option<DateTime<Utc>>,
    pub etapa_actual_id: Option<Uuid>,
    pub datos: DatosJson,
    pub bloqueado: bool,
    pub motivo_bloqueo: Option<String>,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: Option<DateTime<Utc>>,
}

impl InstanciaProceso {
    /// Pasa a `en_progreso`. Si no hay etapa actual toma `etapa_inicial`.
    pub fn iniciar(&mut self, iniciado_por: Option<Uuid>, etapa_inicial: Option<Uuid>) {
        self.estado = EstadoInstancia::EnProgreso;
        self.fecha_inicio = Some(Utc::now());
        if iniciado_por.is_some() {
            self.iniciado_por = iniciado_por;
        }
        if self.etapa_actual_id.is_none() {
            self.etapa_actual_id = etapa_inicial;
        }
    }

    /// Mueve la etapa actual. Una instancia bloqueada no avanza.
    pub fn avanzar_a(&mut self, etapa_id: Uuid) -> Result<(), DomainError> {
        if self.bloqueado {
            return Err(DomainError::NoPermitido(format!("la instancia {} está bloqueada: {}",
                                                       self.id,
                                                       self.motivo_bloqueo.as_deref().unwrap_or("sin motivo"))));
        }
        self.etapa_actual_id = Some(etapa_id);
        if self.estado == EstadoInstancia::Borrador {
            self.estado = EstadoInstancia::EnProgreso;
            self.fecha_inicio.get_or_insert_with(Utc::now);
        }
        Ok(())
    }

    pub fn bloquear(&mut self, motivo: Option<String>) {
        self.bloqueado = true;
        self.motivo_bloqueo = motivo;
    }

    pub fn desbloquear(&mut self) {
        self.bloqueado = false;
        self.motivo_bloqueo = None;
    }

    pub fn completar(&mut self) {
        self.estado = EstadoInstancia::Completada;
        self.fecha_completado = Some(Utc::now());
    }

    pub fn cancelar(&mut self) {
        self.estado = EstadoInstancia::Cancelada;
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevaInstanciaProceso {
    pub proceso_id: Option<Uuid>,
    pub estado: Option<EstadoInstancia>,
    pub iniciado_por: Option<Uuid>,
    pub etapa_actual_id: Option<Uuid>,
    pub datos: Option<DatosJson>,
}

impl NuevaInstanciaProceso {
    pub fn validar(self) -> Result<InstanciaProceso, DomainError> {
        let estado = self.estado.unwrap_or_default();
        let ahora = Utc::now();
        Ok(InstanciaProceso { id: Uuid::new_v4(),
                              proceso_id: presente(self.proceso_id, "procesoId")?,
                              estado,
                              iniciado_por: self.iniciado_por,
                              fecha_inicio: (estado == EstadoInstancia::EnProgreso).then_some(ahora),
                              fecha_completado: None,
                              etapa_actual_id: self.etapa_actual_id,
                              datos: self.datos.unwrap_or_default(),
                              bloqueado: false,
                              motivo_bloqueo: None,
                              creado_en: ahora,
                              actualizado_en: None })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CambiosInstanciaProceso {
    pub estado: Option<EstadoInstancia>,
    #[serde(default, deserialize_with = "anulable")]
    pub etapa_actual_id: Option<Option<Uuid>>,
    pub datos: Option<DatosJson>,
    pub bloqueado: Option<bool>,
    #[serde(default, deserialize_with = "anulable")]
    pub motivo_bloqueo: Option<Option<String>>,
}

impl CambiosInstanciaProceso {
    pub fn aplicar(self, i: &mut InstanciaProceso) -> Result<(), DomainError> {
        if let Some(e) = self.estado {
            i.estado = e;
        }
        if let Some(v) = self.etapa_actual_id {
            i.etapa_actual_id = v;
        }
        if let Some(d) = self.datos {
            i.datos = d;
        }
        if let Some(b) = self.bloqueado {
            i.bloqueado = b;
            if !b {
                i.motivo_bloqueo = None;
            }
        }
        if let Some(v) = self.motivo_bloqueo {
            i.motivo_bloqueo = v;
        }
        Ok(())
    }
}

/// Cuerpo de `iniciar`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InicioInstancia {
    pub usuario_id: Option<Uuid>,
}

/// Cuerpo de `bloquear`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloqueoInstancia {
    pub motivo: Option<String>,
}

/// Cuerpo de `avanzar`: mueve la instancia y registra la acción ejecutada.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvanceInstancia {
    pub etapa_id: Option<Uuid>,
    pub usuario_id: Option<Uuid>,
    pub tipo_accion: Option<String>,
    pub comentario: Option<String>,
    pub tiempo_respuesta_segundos: Option<i64>,
    pub datos: Option<DatosJson>,
}

pub const ACCION_AVANCE: &str = "avance";

impl AvanceInstancia {
    /// Construye la acción a registrar para `instancia_id`.
    pub fn accion(&self, instancia_id: Uuid) -> Result<AccionProceso, DomainError> {
        NuevaAccionProceso { instancia_id: Some(instancia_id),
                             etapa_id: self.etapa_id,
                             usuario_id: self.usuario_id,
                             tipo_accion: Some(self.tipo_accion.clone().unwrap_or_else(|| ACCION_AVANCE.to_string())),
                             comentario: self.comentario.clone(),
                             tiempo_respuesta_segundos: self.tiempo_respuesta_segundos,
                             ejecutado_en: None }.validar()
    }
}

impl Entidad for InstanciaProceso {
    const NOMBRE: &'static str = "instancia de proceso";
    const FILTROS: &'static [Filtrable] = &[Filtrable::new("procesoId", "proceso_id", TipoCampo::Uuid),
                                            Filtrable::new("estado", "estado", TipoCampo::Catalogo(EstadoInstancia::normalizar))];

    fn id(&self) -> Uuid {
        self.id
    }

    fn marca_orden(&self) -> DateTime<Utc> {
        self.creado_en
    }

    fn valor_campo(&self, campo: &str) -> Option<ValorCampo> {
        match campo {
            "proceso_id" => Some(ValorCampo::Uuid(self.proceso_id)),
            "estado" => Some(ValorCampo::Texto(self.estado.as_str().to_string())),
            _ => None,
        }
    }
}

/// Registro append-only de una acción dentro de una instancia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccionProceso {
    pub id: Uuid,
    pub instancia_id: Uuid,
    pub etapa_id: Uuid,
    pub usuario_id: Uuid,
    pub tipo_accion: String,
    pub comentario: Option<String>,
    pub tiempo_respuesta_segundos: Option<i64>,
    pub ejecutado_en: DateTime<Utc>,
    pub creado_en: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevaAccionProceso {
    pub instancia_id: Option<Uuid>,
    pub etapa_id: Option<Uuid>,
    pub usuario_id: Option<Uuid>,
    pub tipo_accion: Option<String>,
    pub comentario: Option<String>,
    pub tiempo_respuesta_segundos: Option<i64>,
    pub ejecutado_en: Option<DateTime<Utc>>,
}

impl NuevaAccionProceso {
    pub fn validar(self) -> Result<AccionProceso, DomainError> {
        if let Some(t) = self.tiempo_respuesta_segundos.filter(|t| *t < 0) {
            return Err(DomainError::Validacion(format!("tiempoRespuestaSegundos no puede ser negativo ({t})")));
        }
        let ahora = Utc::now();
        Ok(AccionProceso { id: Uuid::new_v4(),
                           instancia_id: presente(self.instancia_id, "instanciaId")?,
                           etapa_id: presente(self.etapa_id, "etapaId")?,
                           usuario_id: presente(self.usuario_id, "usuarioId")?,
                           tipo_accion: requerido(self.tipo_accion, "tipoAccion")?,
                           comentario: self.comentario,
                           tiempo_respuesta_segundos: self.tiempo_respuesta_segundos,
                           ejecutado_en: self.ejecutado_en.unwrap_or(ahora),
                           creado_en: ahora })
    }
}

impl Entidad for AccionProceso {
    const NOMBRE: &'static str = "acción de proceso";
    const FILTROS: &'static [Filtrable] = &[Filtrable::new("instanciaId", "instancia_id", TipoCampo::Uuid),
                                            Filtrable::new("usuarioId", "usuario_id", TipoCampo::Uuid)];

    fn id(&self) -> Uuid {
        self.id
    }

    fn marca_orden(&self) -> DateTime<Utc> {
        self.ejecutado_en
    }

    fn valor_campo(&self, campo: &str) -> Option<ValorCampo> {
        match campo {
            "instancia_id" => Some(ValorCampo::Uuid(self.instancia_id)),
            "usuario_id" => Some(ValorCampo::Uuid(self.usuario_id)),
            _ => None,
        }
    }
}

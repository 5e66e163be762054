//! Filas Diesel y su conversión desde/hacia las entidades del dominio.
//!
//! Los catálogos viajan como `TEXT` y los payloads libres como `JSONB`; el
//! resto de columnas coincide 1:1 con el campo de la entidad.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;
use sgc_domain::*;
use uuid::Uuid;

use crate::error::PersistenceError;

/// Conversión de un campo de la entidad a su representación en columna.
pub trait Columna<S>: Sized {
    fn a_columna(&self) -> S;
    fn de_columna(valor: S) -> Result<Self, PersistenceError>;
}

impl<T: Clone> Columna<T> for T {
    fn a_columna(&self) -> T {
        self.clone()
    }

    fn de_columna(valor: T) -> Result<Self, PersistenceError> {
        Ok(valor)
    }
}

impl Columna<Value> for DatosJson {
    fn a_columna(&self) -> Value {
        self.clone().into_value()
    }

    fn de_columna(valor: Value) -> Result<Self, PersistenceError> {
        DatosJson::try_from(valor).map_err(|e| PersistenceError::FilaInvalida(e.to_string()))
    }
}

macro_rules! catalogos_como_texto {
    ($($catalogo:ty),+ $(,)?) => {
        $(
            impl Columna<String> for $catalogo {
                fn a_columna(&self) -> String {
                    self.as_str().to_string()
                }

                fn de_columna(valor: String) -> Result<Self, PersistenceError> {
                    valor.parse().map_err(|e: DomainError| PersistenceError::FilaInvalida(e.to_string()))
                }
            }

            impl Columna<Option<String>> for Option<$catalogo> {
                fn a_columna(&self) -> Option<String> {
                    self.map(|c| c.as_str().to_string())
                }

                fn de_columna(valor: Option<String>) -> Result<Self, PersistenceError> {
                    valor.map(<$catalogo as Columna<String>>::de_columna).transpose()
                }
            }
        )+
    };
}

catalogos_como_texto!(EstadoProceso,
                      EstadoInstancia,
                      EstadoNoConformidad,
                      Gravedad,
                      EstadoAccionCorrectiva,
                      EstadoRiesgo,
                      TipoControl,
                      Efectividad,
                      EstadoCapacitacion,
                      Visibilidad);

/// Declara la fila de una tabla con los tipos del lado SQL y las
/// conversiones con la entidad (`From<&E>` y `TryFrom<Fila>`).
macro_rules! fila {
    ($fila:ident, $tabla:ident, $entidad:ident { $($campo:ident: $tipo:ty),+ $(,)? }) => {
        #[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
        #[diesel(table_name = crate::schema::$tabla, check_for_backend(diesel::pg::Pg), treat_none_as_null = true)]
        pub struct $fila {
            $(pub $campo: $tipo,)+
        }

        impl From<&$entidad> for $fila {
            fn from(e: &$entidad) -> Self {
                Self { $($campo: <_ as Columna<$tipo>>::a_columna(&e.$campo),)+ }
            }
        }

        impl TryFrom<$fila> for $entidad {
            type Error = PersistenceError;

            fn try_from(f: $fila) -> Result<Self, Self::Error> {
                Ok(Self { $($campo: <_ as Columna<$tipo>>::de_columna(f.$campo)?,)+ })
            }
        }
    };
}

fila!(UsuarioFila, usuarios, Usuario {
    id: Uuid,
    nombre: String,
    apellido_paterno: Option<String>,
    apellido_materno: Option<String>,
    nombre_usuario: String,
    email: String,
    foto_url: Option<String>,
    activo: bool,
    creado_en: DateTime<Utc>,
    actualizado_en: Option<DateTime<Utc>>,
});

fila!(AreaFila, areas, Area {
    id: Uuid,
    codigo: String,
    nombre: String,
    descripcion: Option<String>,
    activo: bool,
    creado_en: DateTime<Utc>,
    actualizado_en: Option<DateTime<Utc>>,
});

fila!(AsignacionFila, asignaciones, Asignacion {
    id: Uuid,
    area_id: Uuid,
    usuario_id: Uuid,
    es_principal: bool,
    creado_en: DateTime<Utc>,
    actualizado_en: Option<DateTime<Utc>>,
});

fila!(ProcesoFila, procesos, Proceso {
    id: Uuid,
    codigo: String,
    nombre: String,
    descripcion: Option<String>,
    objetivo: Option<String>,
    area_id: Option<Uuid>,
    estado: String,
    version: String,
    fecha_revision: Option<NaiveDate>,
    proxima_revision: Option<NaiveDate>,
    creado_en: DateTime<Utc>,
    actualizado_en: Option<DateTime<Utc>>,
});

fila!(EtapaFila, etapas_proceso, EtapaProceso {
    id: Uuid,
    proceso_id: Uuid,
    nombre: String,
    descripcion: Option<String>,
    orden: i32,
    creado_en: DateTime<Utc>,
    actualizado_en: Option<DateTime<Utc>>,
});

fila!(InstanciaFila, instancias_proceso, InstanciaProceso {
    id: Uuid,
    proceso_id: Uuid,
    estado: String,
    iniciado_por: Option<Uuid>,
    fecha_inicio: Option<DateTime<Utc>>,
    fecha_completado: Option<DateTime<Utc>>,
    etapa_actual_id: Option<Uuid>,
    datos: Value,
    bloqueado: bool,
    motivo_bloqueo: Option<String>,
    creado_en: DateTime<Utc>,
    actualizado_en: Option<DateTime<Utc>>,
});

fila!(AccionProcesoFila, acciones_proceso, AccionProceso {
    id: Uuid,
    instancia_id: Uuid,
    etapa_id: Uuid,
    usuario_id: Uuid,
    tipo_accion: String,
    comentario: Option<String>,
    tiempo_respuesta_segundos: Option<i64>,
    ejecutado_en: DateTime<Utc>,
    creado_en: DateTime<Utc>,
});

fila!(NoConformidadFila, no_conformidades, NoConformidad {
    id: Uuid,
    codigo: String,
    descripcion: String,
    gravedad: String,
    origen: Option<String>,
    fecha_deteccion: NaiveDate,
    fecha_limite: Option<NaiveDate>,
    area_id: Option<Uuid>,
    responsable_id: Option<Uuid>,
    estado: String,
    observaciones: Option<String>,
    fecha_cierre: Option<DateTime<Utc>>,
    creado_en: DateTime<Utc>,
    actualizado_en: Option<DateTime<Utc>>,
});

fila!(AccionCorrectivaFila, acciones_correctivas, AccionCorrectiva {
    id: Uuid,
    no_conformidad_id: Uuid,
    descripcion: String,
    responsable_id: Option<Uuid>,
    fecha_compromiso: Option<NaiveDate>,
    estado: String,
    observaciones: Option<String>,
    fecha_completado: Option<DateTime<Utc>>,
    creado_en: DateTime<Utc>,
    actualizado_en: Option<DateTime<Utc>>,
});

fila!(RiesgoFila, riesgos, Riesgo {
    id: Uuid,
    codigo: String,
    descripcion: String,
    proceso_id: Option<Uuid>,
    area_id: Option<Uuid>,
    probabilidad: i32,
    impacto: i32,
    estado: String,
    creado_en: DateTime<Utc>,
    actualizado_en: Option<DateTime<Utc>>,
});

fila!(ControlRiesgoFila, controles_riesgo, ControlRiesgo {
    id: Uuid,
    riesgo_id: Uuid,
    descripcion: String,
    tipo: String,
    responsable_id: Option<Uuid>,
    frecuencia: Option<String>,
    efectividad: Option<String>,
    creado_en: DateTime<Utc>,
    actualizado_en: Option<DateTime<Utc>>,
});

fila!(CapacitacionFila, capacitaciones, Capacitacion {
    id: Uuid,
    nombre: String,
    descripcion: Option<String>,
    instructor: Option<String>,
    fecha_inicio: NaiveDate,
    fecha_fin: Option<NaiveDate>,
    duracion_horas: Option<f64>,
    modalidad: Option<String>,
    estado: String,
    creado_en: DateTime<Utc>,
    actualizado_en: Option<DateTime<Utc>>,
});

fila!(AsistenciaFila, asistencias_capacitacion, AsistenciaCapacitacion {
    id: Uuid,
    capacitacion_id: Uuid,
    usuario_id: Uuid,
    asistio: bool,
    calificacion: Option<f64>,
    comentarios: Option<String>,
    creado_en: DateTime<Utc>,
    actualizado_en: Option<DateTime<Utc>>,
});

fila!(DocumentoFila, documentos, Documento {
    id: Uuid,
    titulo: String,
    descripcion: Option<String>,
    tipo_mime: Option<String>,
    ruta_almacenamiento: Option<String>,
    url: Option<String>,
    tamano_bytes: Option<i64>,
    contenido: Option<String>,
    subido_por: Option<Uuid>,
    revisado_por: Option<Uuid>,
    visibilidad: String,
    version: String,
    fecha_revision: Option<NaiveDate>,
    proxima_revision: Option<NaiveDate>,
    proceso_id: Option<Uuid>,
    creado_en: DateTime<Utc>,
    actualizado_en: Option<DateTime<Utc>>,
});

fila!(NotificacionFila, notificaciones, Notificacion {
    id: Uuid,
    usuario_id: Uuid,
    tipo: String,
    contenido: Value,
    entregada: bool,
    entregada_en: Option<DateTime<Utc>>,
    creado_en: DateTime<Utc>,
    actualizado_en: Option<DateTime<Utc>>,
});

fila!(AuditoriaFila, auditoria, Auditoria {
    id: Uuid,
    usuario_id: Option<Uuid>,
    entidad_tipo: String,
    entidad_id: Uuid,
    accion: String,
    detalles: Value,
    creado_en: DateTime<Utc>,
});

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn catalogos_se_guardan_como_texto() {
        assert_eq!(Columna::<String>::a_columna(&EstadoInstancia::EnProgreso), "en_progreso");
        let e: Option<Efectividad> = Columna::<Option<String>>::de_columna(Some("parcial".into())).unwrap();
        assert_eq!(e, Some(Efectividad::Parcial));
        let r: Result<Gravedad, _> = Columna::<String>::de_columna("gravisima".into());
        assert!(matches!(r, Err(PersistenceError::FilaInvalida(_))));
    }

    #[test]
    fn fila_de_instancia_ida_y_vuelta() {
        let mut i = NuevaInstanciaProceso { proceso_id: Some(Uuid::new_v4()),
                                            ..Default::default() }.validar()
                                                                  .unwrap();
        i.datos.insertar("lote", json!(42));
        let fila = InstanciaFila::from(&i);
        assert_eq!(fila.estado, "borrador");
        assert_eq!(fila.datos, json!({"lote": 42}));
        let vuelta = InstanciaProceso::try_from(fila).unwrap();
        assert_eq!(vuelta.id, i.id);
        assert_eq!(vuelta.datos, i.datos);
    }

    #[test]
    fn jsonb_no_objeto_es_fila_invalida() {
        let mut fila = NotificacionFila::from(&NuevaNotificacion { usuario_id: Some(Uuid::new_v4()),
                                                                   tipo: Some("aviso".into()),
                                                                   ..Default::default() }.validar()
                                                                                         .unwrap());
        fila.contenido = json!([1, 2, 3]);
        assert!(matches!(Notificacion::try_from(fila), Err(PersistenceError::FilaInvalida(_))));
    }
}

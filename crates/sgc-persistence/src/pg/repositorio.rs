//! `Repositorio<E>` sobre Postgres para todas las entidades del SGC.
//!
//! Un único `PgRepositorio` comparte el proveedor de conexiones; cada
//! entidad aporta su tabla, su fila y el mapa campo → columna de los filtros
//! admitidos (incluidos los campos con restricción de unicidad, que el core
//! consulta antes de insertar).

use diesel::prelude::*;
use log::debug;
use sgc_core::{CoreError, Repositorio};
use sgc_domain::*;
use uuid::Uuid;

use super::filas::*;
use super::{ConnectionProvider, PoolProvider};
use crate::error::PersistenceError;
use crate::schema;

#[derive(Clone)]
pub struct PgRepositorio<P: ConnectionProvider + Clone = PoolProvider> {
    provider: P,
}

impl<P: ConnectionProvider + Clone> PgRepositorio<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

fn valor_uuid(c: &Condicion) -> Result<Uuid, CoreError> {
    c.valor
     .como_uuid()
     .ok_or_else(|| CoreError::Interno(format!("{} espera un UUID", c.campo)))
}

fn valor_texto(c: &Condicion) -> Result<String, CoreError> {
    c.valor
     .como_texto()
     .map(str::to_string)
     .ok_or_else(|| CoreError::Interno(format!("{} espera texto", c.campo)))
}

fn valor_booleano(c: &Condicion) -> Result<bool, CoreError> {
    c.valor
     .como_booleano()
     .ok_or_else(|| CoreError::Interno(format!("{} espera un booleano", c.campo)))
}

macro_rules! repositorio_pg {
    ($entidad:ty, $fila:ident, $tabla:ident, orden: $orden:ident,
     filtros { $($campo:literal => $columna:ident ($extraer:ident)),* $(,)? }) => {
        impl<P: ConnectionProvider + Clone> Repositorio<$entidad> for PgRepositorio<P> {
            fn insertar(&self, e: &$entidad) -> Result<$entidad, CoreError> {
                let mut conn = self.provider.connection()?;
                let fila = diesel::insert_into(schema::$tabla::table).values(&$fila::from(e))
                                                                     .returning($fila::as_returning())
                                                                     .get_result::<$fila>(&mut conn)
                                                                     .map_err(PersistenceError::from)?;
                Ok(<$entidad>::try_from(fila)?)
            }

            fn actualizar(&self, e: &$entidad) -> Result<Option<$entidad>, CoreError> {
                let mut conn = self.provider.connection()?;
                let fila = diesel::update(schema::$tabla::table.find(e.id)).set(&$fila::from(e))
                                                                           .returning($fila::as_returning())
                                                                           .get_result::<$fila>(&mut conn)
                                                                           .optional()
                                                                           .map_err(PersistenceError::from)?;
                Ok(fila.map(<$entidad>::try_from).transpose()?)
            }

            fn obtener(&self, id: Uuid) -> Result<Option<$entidad>, CoreError> {
                let mut conn = self.provider.connection()?;
                let fila = schema::$tabla::table.find(id)
                                                .select($fila::as_select())
                                                .first::<$fila>(&mut conn)
                                                .optional()
                                                .map_err(PersistenceError::from)?;
                Ok(fila.map(<$entidad>::try_from).transpose()?)
            }

            #[allow(unused_mut)]
            fn listar(&self, condiciones: &[Condicion]) -> Result<Vec<$entidad>, CoreError> {
                let mut conn = self.provider.connection()?;
                let mut consulta = schema::$tabla::table.select($fila::as_select()).into_boxed();
                for c in condiciones {
                    consulta = match c.campo {
                        $($campo => consulta.filter(schema::$tabla::$columna.eq($extraer(c)?)),)*
                        otro => {
                            return Err(CoreError::Interno(format!("{}: campo no filtrable {otro}", <$entidad>::NOMBRE)))
                        }
                    };
                }
                let filas = consulta.order(schema::$tabla::$orden.desc())
                                    .load::<$fila>(&mut conn)
                                    .map_err(PersistenceError::from)?;
                debug!("{}: {} fila(s) con {} condición(es)", <$entidad>::NOMBRE, filas.len(), condiciones.len());
                filas.into_iter()
                     .map(|f| <$entidad>::try_from(f).map_err(CoreError::from))
                     .collect()
            }

            fn eliminar(&self, id: Uuid) -> Result<Option<$entidad>, CoreError> {
                let mut conn = self.provider.connection()?;
                let fila = diesel::delete(schema::$tabla::table.find(id)).returning($fila::as_returning())
                                                                         .get_result::<$fila>(&mut conn)
                                                                         .optional()
                                                                         .map_err(PersistenceError::from)?;
                Ok(fila.map(<$entidad>::try_from).transpose()?)
            }
        }
    };
}

repositorio_pg!(Usuario, UsuarioFila, usuarios, orden: creado_en, filtros {
    "activo" => activo(valor_booleano),
    "nombre_usuario" => nombre_usuario(valor_texto),
});

repositorio_pg!(Area, AreaFila, areas, orden: creado_en, filtros {
    "activo" => activo(valor_booleano),
    "codigo" => codigo(valor_texto),
});

repositorio_pg!(Asignacion, AsignacionFila, asignaciones, orden: creado_en, filtros {
    "area_id" => area_id(valor_uuid),
    "usuario_id" => usuario_id(valor_uuid),
});

repositorio_pg!(Proceso, ProcesoFila, procesos, orden: creado_en, filtros {
    "area_id" => area_id(valor_uuid),
    "estado" => estado(valor_texto),
    "codigo" => codigo(valor_texto),
});

repositorio_pg!(EtapaProceso, EtapaFila, etapas_proceso, orden: creado_en, filtros {
    "proceso_id" => proceso_id(valor_uuid),
});

repositorio_pg!(InstanciaProceso, InstanciaFila, instancias_proceso, orden: creado_en, filtros {
    "proceso_id" => proceso_id(valor_uuid),
    "estado" => estado(valor_texto),
});

repositorio_pg!(AccionProceso, AccionProcesoFila, acciones_proceso, orden: ejecutado_en, filtros {
    "instancia_id" => instancia_id(valor_uuid),
    "usuario_id" => usuario_id(valor_uuid),
});

repositorio_pg!(NoConformidad, NoConformidadFila, no_conformidades, orden: creado_en, filtros {
    "estado" => estado(valor_texto),
    "area_id" => area_id(valor_uuid),
    "responsable_id" => responsable_id(valor_uuid),
    "codigo" => codigo(valor_texto),
});

repositorio_pg!(AccionCorrectiva, AccionCorrectivaFila, acciones_correctivas, orden: creado_en, filtros {
    "no_conformidad_id" => no_conformidad_id(valor_uuid),
    "estado" => estado(valor_texto),
    "responsable_id" => responsable_id(valor_uuid),
});

repositorio_pg!(Riesgo, RiesgoFila, riesgos, orden: creado_en, filtros {
    "proceso_id" => proceso_id(valor_uuid),
    "area_id" => area_id(valor_uuid),
    "estado" => estado(valor_texto),
    "codigo" => codigo(valor_texto),
});

repositorio_pg!(ControlRiesgo, ControlRiesgoFila, controles_riesgo, orden: creado_en, filtros {
    "riesgo_id" => riesgo_id(valor_uuid),
});

repositorio_pg!(Capacitacion, CapacitacionFila, capacitaciones, orden: creado_en, filtros {
    "estado" => estado(valor_texto),
});

repositorio_pg!(AsistenciaCapacitacion, AsistenciaFila, asistencias_capacitacion, orden: creado_en, filtros {
    "capacitacion_id" => capacitacion_id(valor_uuid),
    "usuario_id" => usuario_id(valor_uuid),
});

repositorio_pg!(Documento, DocumentoFila, documentos, orden: creado_en, filtros {
    "proceso_id" => proceso_id(valor_uuid),
    "visibilidad" => visibilidad(valor_texto),
});

repositorio_pg!(Notificacion, NotificacionFila, notificaciones, orden: creado_en, filtros {
    "usuario_id" => usuario_id(valor_uuid),
    "entregada" => entregada(valor_booleano),
});

repositorio_pg!(Auditoria, AuditoriaFila, auditoria, orden: creado_en, filtros {
    "entidad_tipo" => entidad_tipo(valor_texto),
    "entidad_id" => entidad_id(valor_uuid),
    "usuario_id" => usuario_id(valor_uuid),
});

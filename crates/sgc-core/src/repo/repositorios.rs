//! Conjunto de repositorios que comparten los servicios y la capa HTTP.
use std::sync::Arc;

use sgc_domain::*;

use super::{EnMemoria, Repositorio};

/// Acceso tipado al repositorio de una entidad dentro de `Repositorios`.
pub trait RepositorioDe<E: Entidad> {
    fn repositorio(&self) -> &dyn Repositorio<E>;
}

macro_rules! repositorios {
    ($($campo:ident: $tipo:ty),+ $(,)?) => {
        #[derive(Clone)]
        pub struct Repositorios {
            $(pub $campo: Arc<dyn Repositorio<$tipo>>,)+
        }

        impl Repositorios {
            /// Todos los repositorios en memoria.
            pub fn en_memoria() -> Self {
                Self { $($campo: Arc::new(EnMemoria::<$tipo>::new()),)+ }
            }

            /// Usa el mismo backend para todas las entidades (p. ej. un
            /// repositorio Postgres que comparte el pool).
            pub fn desde<R>(backend: R) -> Self
                where R: Clone + 'static $(+ Repositorio<$tipo>)+
            {
                Self { $($campo: Arc::new(backend.clone()),)+ }
            }
        }

        $(
            impl RepositorioDe<$tipo> for Repositorios {
                fn repositorio(&self) -> &dyn Repositorio<$tipo> {
                    self.$campo.as_ref()
                }
            }
        )+
    };
}

repositorios! {
    usuarios: Usuario,
    areas: Area,
    asignaciones: Asignacion,
    procesos: Proceso,
    etapas: EtapaProceso,
    instancias: InstanciaProceso,
    acciones_proceso: AccionProceso,
    no_conformidades: NoConformidad,
    acciones_correctivas: AccionCorrectiva,
    riesgos: Riesgo,
    controles: ControlRiesgo,
    capacitaciones: Capacitacion,
    asistencias: AsistenciaCapacitacion,
    documentos: Documento,
    notificaciones: Notificacion,
    auditoria: Auditoria,
}

impl Repositorios {
    /// Repositorio de la entidad `E`.
    pub fn de<E: Entidad>(&self) -> &dyn Repositorio<E>
        where Self: RepositorioDe<E>
    {
        RepositorioDe::<E>::repositorio(self)
    }
}

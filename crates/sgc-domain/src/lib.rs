// sgc-domain: registros, catálogos y payloads del SGC. Sin I/O.
pub mod calidad;
pub mod capacitacion;
pub mod datos;
pub mod documento;
pub mod entidad;
pub mod error;
pub mod estados;
pub mod notificacion;
pub mod organizacion;
pub mod proceso;
pub mod riesgo;
mod validacion;

pub use calidad::{AccionCorrectiva, CambiosAccionCorrectiva, CambiosNoConformidad, NoConformidad,
                  NuevaAccionCorrectiva, NuevaNoConformidad, Observacion};
pub use capacitacion::{AsistenciaCapacitacion, CambiosAsistencia, CambiosCapacitacion, Capacitacion,
                       NuevaAsistencia, NuevaCapacitacion};
pub use datos::DatosJson;
pub use documento::{CambiosDocumento, Documento, NuevoDocumento, BUCKET_DOCUMENTOS};
pub use entidad::{Condicion, Entidad, Filtrable, TipoCampo, ValorCampo};
pub use error::DomainError;
pub use estados::{Efectividad, EstadoAccionCorrectiva, EstadoCapacitacion, EstadoInstancia, EstadoNoConformidad,
                  EstadoProceso, EstadoRiesgo, Gravedad, TipoControl, Visibilidad};
pub use notificacion::{Auditoria, CambiosNotificacion, Notificacion, NuevaAuditoria, NuevaNotificacion};
pub use organizacion::{Area, Asignacion, CambiosArea, CambiosAsignacion, CambiosUsuario, NuevaArea, NuevaAsignacion,
                       NuevoUsuario, Usuario};
pub use proceso::{AccionProceso, AvanceInstancia, BloqueoInstancia, CambiosEtapaProceso, CambiosInstanciaProceso,
                  CambiosProceso, EtapaProceso, InicioInstancia, InstanciaProceso, NuevaAccionProceso,
                  NuevaEtapaProceso, NuevaInstanciaProceso, NuevoProceso, Proceso, ACCION_AVANCE, VERSION_INICIAL};
pub use riesgo::{CambiosControlRiesgo, CambiosRiesgo, ControlRiesgo, NuevoControlRiesgo, NuevoRiesgo, Riesgo};

/// Bucket de fotos de perfil.
pub const BUCKET_IMAGENES: &str = "imagenes";

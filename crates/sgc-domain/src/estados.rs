//! Catálogos de estados y clasificaciones.
//!
//! Se persisten como texto en minúsculas (snake_case) y viajan igual en JSON.
//! Las transiciones NO se validan aquí: el cliente las dispara y el servicio
//! sobrescribe el valor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

macro_rules! catalogo {
    ($(#[$meta:meta])* $nombre:ident { $($variante:ident => $texto:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $nombre {
            $(#[serde(rename = $texto)] $variante,)+
        }

        impl $nombre {
            pub const TODOS: &'static [$nombre] = &[$($nombre::$variante),+];

            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($nombre::$variante => $texto,)+
                }
            }

            /// Forma canónica de un valor textual del catálogo.
            pub fn normalizar(crudo: &str) -> Result<&'static str, DomainError> {
                crudo.parse::<$nombre>().map(|c| c.as_str())
            }
        }

        impl FromStr for $nombre {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($texto => Ok($nombre::$variante),)+
                    otro => Err(DomainError::Validacion(format!("valor no válido para {}: {otro}", stringify!($nombre)))),
                }
            }
        }

        impl fmt::Display for $nombre {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

catalogo! {
    /// Ciclo de vida de un proceso definido.
    EstadoProceso {
        Activo => "activo",
        Inactivo => "inactivo",
        EnRevision => "en_revision",
        Obsoleto => "obsoleto",
    }
}

catalogo! {
    /// Estado de una ejecución (instancia) de proceso.
    EstadoInstancia {
        Borrador => "borrador",
        EnProgreso => "en_progreso",
        Completada => "completada",
        Cancelada => "cancelada",
    }
}

catalogo! {
    /// abierta → en_tratamiento → cerrada (sin guardas).
    EstadoNoConformidad {
        Abierta => "abierta",
        EnTratamiento => "en_tratamiento",
        Cerrada => "cerrada",
    }
}

catalogo! {
    Gravedad {
        Baja => "baja",
        Media => "media",
        Alta => "alta",
        Critica => "critica",
    }
}

catalogo! {
    EstadoAccionCorrectiva {
        Pendiente => "pendiente",
        EnProceso => "en_proceso",
        Completada => "completada",
        Verificada => "verificada",
    }
}

catalogo! {
    EstadoRiesgo {
        Identificado => "identificado",
        EnTratamiento => "en_tratamiento",
        Mitigado => "mitigado",
        Cerrado => "cerrado",
    }
}

catalogo! {
    TipoControl {
        Preventivo => "preventivo",
        Detectivo => "detectivo",
        Correctivo => "correctivo",
    }
}

catalogo! {
    Efectividad {
        Efectivo => "efectivo",
        Parcial => "parcial",
        Inefectivo => "inefectivo",
    }
}

catalogo! {
    EstadoCapacitacion {
        Programada => "programada",
        EnCurso => "en_curso",
        Finalizada => "finalizada",
        Cancelada => "cancelada",
    }
}

catalogo! {
    Visibilidad {
        Publico => "publico",
        Interno => "interno",
        Restringido => "restringido",
    }
}

impl Default for EstadoProceso {
    fn default() -> Self {
        EstadoProceso::Activo
    }
}

impl Default for EstadoInstancia {
    fn default() -> Self {
        EstadoInstancia::Borrador
    }
}

impl Default for EstadoNoConformidad {
    fn default() -> Self {
        EstadoNoConformidad::Abierta
    }
}

impl Default for Gravedad {
    fn default() -> Self {
        Gravedad::Media
    }
}

impl Default for EstadoAccionCorrectiva {
    fn default() -> Self {
        EstadoAccionCorrectiva::Pendiente
    }
}

impl Default for EstadoRiesgo {
    fn default() -> Self {
        EstadoRiesgo::Identificado
    }
}

impl Default for EstadoCapacitacion {
    fn default() -> Self {
        EstadoCapacitacion::Programada
    }
}

impl Default for Visibilidad {
    fn default() -> Self {
        Visibilidad::Interno
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texto_y_parseo_son_simetricos() {
        for e in EstadoNoConformidad::TODOS {
            assert_eq!(e.as_str().parse::<EstadoNoConformidad>().unwrap(), *e);
        }
        for e in EstadoInstancia::TODOS {
            assert_eq!(e.to_string().parse::<EstadoInstancia>().unwrap(), *e);
        }
    }

    #[test]
    fn serde_usa_snake_case() {
        let v = serde_json::to_value(EstadoNoConformidad::EnTratamiento).unwrap();
        assert_eq!(v, serde_json::json!("en_tratamiento"));
        let g: Gravedad = serde_json::from_value(serde_json::json!("critica")).unwrap();
        assert_eq!(g, Gravedad::Critica);
    }

    #[test]
    fn valor_desconocido_es_error_de_validacion() {
        let err = "cerrado".parse::<EstadoNoConformidad>().unwrap_err();
        assert!(matches!(err, DomainError::Validacion(_)));
    }
}

//! Contrato común de las entidades persistidas.
//!
//! Cada registro del SGC (usuario, proceso, no conformidad, ...) expone:
//! - su identificador (UUID v4 generado por la aplicación),
//! - la marca temporal por la que se ordenan los listados (descendente),
//! - los campos por los que se permite filtrar por igualdad.
//!
//! Los repositorios (en memoria o Postgres) usan este contrato para resolver
//! listados sin conocer cada tipo concreto.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::DomainError;

/// Tipo de un campo filtrable, usado para interpretar el parámetro crudo.
#[derive(Debug, Clone, Copy)]
pub enum TipoCampo {
    Uuid,
    Texto,
    Booleano,
    /// Texto restringido a un catálogo; la función devuelve la forma canónica.
    Catalogo(fn(&str) -> Result<&'static str, DomainError>),
}

/// Valor comparable de un campo de la entidad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValorCampo {
    Uuid(Uuid),
    Texto(String),
    Booleano(bool),
}

impl ValorCampo {
    pub fn como_uuid(&self) -> Option<Uuid> {
        match self {
            ValorCampo::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    pub fn como_texto(&self) -> Option<&str> {
        match self {
            ValorCampo::Texto(t) => Some(t),
            _ => None,
        }
    }

    pub fn como_booleano(&self) -> Option<bool> {
        match self {
            ValorCampo::Booleano(b) => Some(*b),
            _ => None,
        }
    }
}

impl TipoCampo {
    /// Interpreta el valor textual de un parámetro de consulta.
    pub fn interpretar(self, parametro: &str, crudo: &str) -> Result<ValorCampo, DomainError> {
        match self {
            TipoCampo::Texto => Ok(ValorCampo::Texto(crudo.to_string())),
            TipoCampo::Catalogo(normalizar) => normalizar(crudo).map(|t| ValorCampo::Texto(t.to_string())),
            TipoCampo::Uuid => Uuid::parse_str(crudo).map(ValorCampo::Uuid)
                                                     .map_err(|_| DomainError::Validacion(format!("{parametro} no es un UUID válido: {crudo}"))),
            TipoCampo::Booleano => match crudo {
                "true" | "1" => Ok(ValorCampo::Booleano(true)),
                "false" | "0" => Ok(ValorCampo::Booleano(false)),
                otro => Err(DomainError::Validacion(format!("{parametro} debe ser booleano: {otro}"))),
            },
        }
    }
}

/// Declaración de un filtro admitido: nombre del parámetro en la API
/// (camelCase) y nombre del campo/columna (snake_case).
#[derive(Debug, Clone, Copy)]
pub struct Filtrable {
    pub parametro: &'static str,
    pub campo: &'static str,
    pub tipo: TipoCampo,
}

impl Filtrable {
    pub const fn new(parametro: &'static str, campo: &'static str, tipo: TipoCampo) -> Self {
        Self { parametro, campo, tipo }
    }
}

/// Condición de igualdad ya interpretada (`campo = valor`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condicion {
    pub campo: &'static str,
    pub valor: ValorCampo,
}

pub trait Entidad: Clone + Send + Sync + Serialize + 'static {
    /// Nombre legible para mensajes ("proceso", "no conformidad", ...).
    const NOMBRE: &'static str;
    /// Filtros de igualdad admitidos en el listado.
    const FILTROS: &'static [Filtrable];

    fn id(&self) -> Uuid;

    /// Marca por la que se ordena el listado (descendente).
    fn marca_orden(&self) -> DateTime<Utc>;

    /// Valor actual de un campo filtrable; `None` si el campo es nulo o no
    /// es filtrable.
    fn valor_campo(&self, campo: &str) -> Option<ValorCampo>;

    /// Evalúa todas las condiciones (conjunción).
    fn cumple(&self, condiciones: &[Condicion]) -> bool {
        condiciones.iter()
                   .all(|c| self.valor_campo(c.campo).as_ref() == Some(&c.valor))
    }
}

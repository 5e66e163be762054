//! Traducción de parámetros de consulta a condiciones de igualdad.
use std::collections::HashMap;

use sgc_domain::{Condicion, Entidad};

use crate::errors::CoreError;

/// Toma sólo los parámetros declarados en `E::FILTROS`; el resto se ignora.
/// Un valor mal formado (UUID o booleano inválido) es un error de validación.
pub fn condiciones<E: Entidad>(parametros: &HashMap<String, String>) -> Result<Vec<Condicion>, CoreError> {
    E::FILTROS.iter()
              .filter_map(|f| parametros.get(f.parametro).map(|crudo| (f, crudo)))
              .map(|(f, crudo)| -> Result<Condicion, CoreError> {
                  Ok(Condicion { campo: f.campo,
                                 valor: f.tipo.interpretar(f.parametro, crudo)? })
              })
              .collect()
}

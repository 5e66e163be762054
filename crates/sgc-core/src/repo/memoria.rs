//! Repositorio en memoria sobre `DashMap`. Se usa en pruebas y cuando el
//! servidor arranca sin base de datos. No aplica cascadas entre tablas.
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use sgc_domain::{Condicion, Entidad};
use uuid::Uuid;

use super::Repositorio;
use crate::errors::CoreError;

pub struct EnMemoria<E> {
    filas: DashMap<Uuid, E>,
}

impl<E> EnMemoria<E> {
    pub fn new() -> Self {
        Self { filas: DashMap::new() }
    }

    pub fn len(&self) -> usize {
        self.filas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filas.is_empty()
    }
}

impl<E> Default for EnMemoria<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entidad> Repositorio<E> for EnMemoria<E> {
    fn insertar(&self, entidad: &E) -> Result<E, CoreError> {
        match self.filas.entry(entidad.id()) {
            Entry::Occupied(_) => Err(CoreError::Conflicto(format!("{} duplicado: {}", E::NOMBRE, entidad.id()))),
            Entry::Vacant(v) => {
                v.insert(entidad.clone());
                Ok(entidad.clone())
            }
        }
    }

    fn actualizar(&self, entidad: &E) -> Result<Option<E>, CoreError> {
        Ok(self.filas.get_mut(&entidad.id()).map(|mut fila| {
                                                *fila.value_mut() = entidad.clone();
                                                fila.value().clone()
                                            }))
    }

    fn obtener(&self, id: Uuid) -> Result<Option<E>, CoreError> {
        Ok(self.filas.get(&id).map(|f| f.value().clone()))
    }

    fn listar(&self, condiciones: &[Condicion]) -> Result<Vec<E>, CoreError> {
        let mut v: Vec<E> = self.filas
                                .iter()
                                .filter(|f| f.value().cumple(condiciones))
                                .map(|f| f.value().clone())
                                .collect();
        v.sort_by_key(|e| std::cmp::Reverse(e.marca_orden()));
        Ok(v)
    }

    fn eliminar(&self, id: Uuid) -> Result<Option<E>, CoreError> {
        Ok(self.filas.remove(&id).map(|(_, e)| e))
    }
}

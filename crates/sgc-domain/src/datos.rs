//! Contenedor tipado para payloads JSON libres (`datos`, `contenido`,
//! `detalles`).
//!
//! Siempre es un objeto JSON con claves de texto; los valores son los tipos
//! seguros de JSON (null, bool, número, texto, arreglo, objeto). Un JSON que
//! no sea objeto se rechaza al deserializar.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::DomainError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatosJson(Map<String, Value>);

impl DatosJson {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn get(&self, clave: &str) -> Option<&Value> {
        self.0.get(clave)
    }

    pub fn insertar(&mut self, clave: impl Into<String>, valor: Value) -> Option<Value> {
        self.0.insert(clave.into(), valor)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Fusiona claves de `otros` sobre las existentes (sobrescribe).
    pub fn fusionar(&mut self, otros: DatosJson) {
        for (k, v) in otros.0 {
            self.0.insert(k, v);
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for DatosJson {
    fn from(m: Map<String, Value>) -> Self {
        Self(m)
    }
}

impl From<DatosJson> for Value {
    fn from(d: DatosJson) -> Self {
        d.into_value()
    }
}

impl TryFrom<Value> for DatosJson {
    type Error = DomainError;

    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::Object(m) => Ok(Self(m)),
            Value::Null => Ok(Self::new()),
            otro => Err(DomainError::Validacion(format!("se esperaba un objeto JSON, llegó: {otro}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rechaza_json_no_objeto() {
        assert!(DatosJson::try_from(json!([1, 2])).is_err());
        assert!(serde_json::from_value::<DatosJson>(json!("texto")).is_err());
    }

    #[test]
    fn null_es_objeto_vacio() {
        let d = DatosJson::try_from(Value::Null).unwrap();
        assert!(d.is_empty());
    }

    #[test]
    fn fusionar_sobrescribe() {
        let mut a = DatosJson::try_from(json!({"x": 1, "y": 2})).unwrap();
        a.fusionar(DatosJson::try_from(json!({"y": 3})).unwrap());
        assert_eq!(a.into_value(), json!({"x": 1, "y": 3}));
    }
}

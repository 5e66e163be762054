//! Usuarios, áreas y asignaciones de responsabilidad área ↔ usuario.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entidad::{Entidad, Filtrable, TipoCampo, ValorCampo};
use crate::validacion::{anulable, no_vacio, presente, requerido};
use crate::DomainError;

/// Identidad de una persona usuaria. Única por `nombre_usuario`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: Uuid,
    pub nombre: String,
    pub apellido_paterno: Option<String>,
    pub apellido_materno: Option<String>,
    pub nombre_usuario: String,
    pub email: String,
    pub foto_url: Option<String>,
    pub activo: bool,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: Option<DateTime<Utc>>,
}

impl Usuario {
    pub fn nombre_completo(&self) -> String {
        [Some(self.nombre.as_str()), self.apellido_paterno.as_deref(), self.apellido_materno.as_deref()].into_iter()
                                                                                                          .flatten()
                                                                                                          .collect::<Vec<_>>()
                                                                                                          .join(" ")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevoUsuario {
    pub nombre: Option<String>,
    pub apellido_paterno: Option<String>,
    pub apellido_materno: Option<String>,
    pub nombre_usuario: Option<String>,
    pub email: Option<String>,
    pub foto_url: Option<String>,
    pub activo: Option<bool>,
}

impl NuevoUsuario {
    pub fn validar(self) -> Result<Usuario, DomainError> {
        let nombre = requerido(self.nombre, "nombre")?;
        let nombre_usuario = requerido(self.nombre_usuario, "nombreUsuario")?;
        let email = requerido(self.email, "email")?;
        if !email.contains('@') {
            return Err(DomainError::Validacion(format!("email no válido: {email}")));
        }
        Ok(Usuario { id: Uuid::new_v4(),
                     nombre,
                     apellido_paterno: self.apellido_paterno,
                     apellido_materno: self.apellido_materno,
                     nombre_usuario,
                     email,
                     foto_url: self.foto_url,
                     activo: self.activo.unwrap_or(true),
                     creado_en: Utc::now(),
                     actualizado_en: None })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CambiosUsuario {
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "anulable")]
    pub apellido_paterno: Option<Option<String>>,
    #[serde(default, deserialize_with = "anulable")]
    pub apellido_materno: Option<Option<String>>,
    pub nombre_usuario: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "anulable")]
    pub foto_url: Option<Option<String>>,
    pub activo: Option<bool>,
}

impl CambiosUsuario {
    /// Nuevo nombre de usuario si el cambio lo renombra.
    pub fn nuevo_nombre_usuario<'a>(&'a self, actual: &Usuario) -> Option<&'a str> {
        self.nombre_usuario.as_deref().filter(|n| *n != actual.nombre_usuario)
    }

    pub fn aplicar(self, u: &mut Usuario) -> Result<(), DomainError> {
        if let Some(v) = no_vacio(self.nombre, "nombre")? {
            u.nombre = v;
        }
        if let Some(v) = no_vacio(self.nombre_usuario, "nombreUsuario")? {
            u.nombre_usuario = v;
        }
        if let Some(v) = no_vacio(self.email, "email")? {
            if !v.contains('@') {
                return Err(DomainError::Validacion(format!("email no válido: {v}")));
            }
            u.email = v;
        }
        if let Some(v) = self.apellido_paterno {
            u.apellido_paterno = v;
        }
        if let Some(v) = self.apellido_materno {
            u.apellido_materno = v;
        }
        if let Some(v) = self.foto_url {
            u.foto_url = v;
        }
        if let Some(a) = self.activo {
            u.activo = a;
        }
        Ok(())
    }
}

impl Entidad for Usuario {
    const NOMBRE: &'static str = "usuario";
    const FILTROS: &'static [Filtrable] = &[Filtrable::new("activo", "activo", TipoCampo::Booleano)];

    fn id(&self) -> Uuid {
        self.id
    }

    fn marca_orden(&self) -> DateTime<Utc> {
        self.creado_en
    }

    fn valor_campo(&self, campo: &str) -> Option<ValorCampo> {
        match campo {
            "activo" => Some(ValorCampo::Booleano(self.activo)),
            "nombre_usuario" => Some(ValorCampo::Texto(self.nombre_usuario.clone())),
            _ => None,
        }
    }
}

/// Unidad organizacional. Única por `codigo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: Uuid,
    pub codigo: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub activo: bool,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevaArea {
    pub codigo: Option<String>,
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub activo: Option<bool>,
}

impl NuevaArea {
    pub fn validar(self) -> Result<Area, DomainError> {
        Ok(Area { id: Uuid::new_v4(),
                  codigo: requerido(self.codigo, "codigo")?,
                  nombre: requerido(self.nombre, "nombre")?,
                  descripcion: self.descripcion,
                  activo: self.activo.unwrap_or(true),
                  creado_en: Utc::now(),
                  actualizado_en: None })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CambiosArea {
    pub codigo: Option<String>,
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "anulable")]
    pub descripcion: Option<Option<String>>,
    pub activo: Option<bool>,
}

impl CambiosArea {
    pub fn nuevo_codigo<'a>(&'a self, actual: &Area) -> Option<&'a str> {
        self.codigo.as_deref().filter(|c| *c != actual.codigo)
    }

    pub fn aplicar(self, a: &mut Area) -> Result<(), DomainError> {
        if let Some(v) = no_vacio(self.codigo, "codigo")? {
            a.codigo = v;
        }
        if let Some(v) = no_vacio(self.nombre, "nombre")? {
            a.nombre = v;
        }
        if let Some(v) = self.descripcion {
            a.descripcion = v;
        }
        if let Some(v) = self.activo {
            a.activo = v;
        }
        Ok(())
    }
}

impl Entidad for Area {
    const NOMBRE: &'static str = "área";
    const FILTROS: &'static [Filtrable] = &[Filtrable::new("activo", "activo", TipoCampo::Booleano)];

    fn id(&self) -> Uuid {
        self.id
    }

    fn marca_orden(&self) -> DateTime<Utc> {
        self.creado_en
    }

    fn valor_campo(&self, campo: &str) -> Option<ValorCampo> {
        match campo {
            "activo" => Some(ValorCampo::Booleano(self.activo)),
            "codigo" => Some(ValorCampo::Texto(self.codigo.clone())),
            _ => None,
        }
    }
}

/// Vínculo de responsabilidad entre un área y un usuario.
///
/// Invariante: el par (área, usuario) es único. Se borra en cascada cuando se
/// elimina cualquiera de los dos lados.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asignacion {
    pub id: Uuid,
    pub area_id: Uuid,
    pub usuario_id: Uuid,
    pub es_principal: bool,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevaAsignacion {
    pub area_id: Option<Uuid>,
    pub usuario_id: Option<Uuid>,
    pub es_principal: Option<bool>,
}

impl NuevaAsignacion {
    pub fn validar(self) -> Result<Asignacion, DomainError> {
        Ok(Asignacion { id: Uuid::new_v4(),
                        area_id: presente(self.area_id, "areaId")?,
                        usuario_id: presente(self.usuario_id, "usuarioId")?,
                        es_principal: self.es_principal.unwrap_or(false),
                        creado_en: Utc::now(),
                        actualizado_en: None })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CambiosAsignacion {
    pub area_id: Option<Uuid>,
    pub usuario_id: Option<Uuid>,
    pub es_principal: Option<bool>,
}

impl CambiosAsignacion {
    /// Indica si el cambio toca la clave (área, usuario).
    pub fn cambia_clave(&self, actual: &Asignacion) -> bool {
        self.area_id.is_some_and(|a| a != actual.area_id) || self.usuario_id.is_some_and(|u| u != actual.usuario_id)
    }

    pub fn aplicar(self, a: &mut Asignacion) -> Result<(), DomainError> {
        if let Some(v) = self.area_id {
            a.area_id = v;
        }
        if let Some(v) = self.usuario_id {
            a.usuario_id = v;
        }
        if let Some(v) = self.es_principal {
            a.es_principal = v;
        }
        Ok(())
    }
}

impl Entidad for Asignacion {
    const NOMBRE: &'static str = "asignación";
    const FILTROS: &'static [Filtrable] = &[Filtrable::new("areaId", "area_id", TipoCampo::Uuid),
                                            Filtrable::new("usuarioId", "usuario_id", TipoCampo::Uuid)];

    fn id(&self) -> Uuid {
        self.id
    }

    fn marca_orden(&self) -> DateTime<Utc> {
        self.creado_en
    }

    fn valor_campo(&self, campo: &str) -> Option<ValorCampo> {
        match campo {
            "area_id" => Some(ValorCampo::Uuid(self.area_id)),
            "usuario_id" => Some(ValorCampo::Uuid(self.usuario_id)),
            _ => None,
        }
    }
}

//! Documentos controlados. El binario vive en el almacenamiento de objetos;
//! el registro guarda la ruta, la URL y los metadatos.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entidad::{Entidad, Filtrable, TipoCampo, ValorCampo};
use crate::estados::Visibilidad;
use crate::proceso::VERSION_INICIAL;
use crate::validacion::{anulable, no_vacio, requerido};
use crate::DomainError;

/// Bucket donde se guardan los archivos de documentos.
pub const BUCKET_DOCUMENTOS: &str = "documentos";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Documento {
    pub id: Uuid,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub tipo_mime: Option<String>,
    pub ruta_almacenamiento: Option<String>,
    pub url: Option<String>,
    pub tamano_bytes: Option<i64>,
    /// Contenido de texto enriquecido (HTML) editado en línea.
    pub contenido: Option<String>,
    pub subido_por: Option<Uuid>,
    pub revisado_por: Option<Uuid>,
    pub visibilidad: Visibilidad,
    pub version: String,
    pub fecha_revision: Option<NaiveDate>,
    pub proxima_revision: Option<NaiveDate>,
    pub proceso_id: Option<Uuid>,
    pub creado_en: DateTime<Utc>,
    pub actualizado_en: Option<DateTime<Utc>>,
}

impl Documento {
    /// Registra el archivo recién subido. Devuelve la ruta anterior, si
    /// había, para que el llamador la elimine del almacenamiento.
    pub fn registrar_archivo(&mut self,
                             ruta: String,
                             url: String,
                             tipo_mime: Option<String>,
                             tamano_bytes: i64)
                             -> Option<String> {
        let anterior = self.ruta_almacenamiento.replace(ruta);
        self.url = Some(url);
        if tipo_mime.is_some() {
            self.tipo_mime = tipo_mime;
        }
        self.tamano_bytes = Some(tamano_bytes);
        anterior
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevoDocumento {
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub tipo_mime: Option<String>,
    pub ruta_almacenamiento: Option<String>,
    pub url: Option<String>,
    pub tamano_bytes: Option<i64>,
    pub contenido: Option<String>,
    pub subido_por: Option<Uuid>,
    pub revisado_por: Option<Uuid>,
    pub visibilidad: Option<Visibilidad>,
    pub version: Option<String>,
    pub fecha_revision: Option<NaiveDate>,
    pub proxima_revision: Option<NaiveDate>,
    pub proceso_id: Option<Uuid>,
}

fn validar_tamano(tamano: Option<i64>) -> Result<(), DomainError> {
    match tamano {
        Some(t) if t < 0 => Err(DomainError::Validacion(format!("tamanoBytes no puede ser negativo ({t})"))),
        _ => Ok(()),
    }
}

impl NuevoDocumento {
    pub fn validar(self) -> Result<Documento, DomainError> {
        let titulo = requerido(self.titulo, "titulo")?;
        validar_tamano(self.tamano_bytes)?;
        Ok(Documento { id: Uuid::new_v4(),
                       titulo,
                       descripcion: self.descripcion,
                       tipo_mime: self.tipo_mime,
                       ruta_almacenamiento: self.ruta_almacenamiento,
                       url: self.url,
                       tamano_bytes: self.tamano_bytes,
                       contenido: self.contenido,
                       subido_por: self.subido_por,
                       revisado_por: self.revisado_por,
                       visibilidad: self.visibilidad.unwrap_or_default(),
                       version: self.version.unwrap_or_else(|| VERSION_INICIAL.to_string()),
                       fecha_revision: self.fecha_revision,
                       proxima_revision: self.proxima_revision,
                       proceso_id: self.proceso_id,
                       creado_en: Utc::now(),
                       actualizado_en: None })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CambiosDocumento {
    pub titulo: Option<String>,
    #[serde(default, deserialize_with = "anulable")]
    pub descripcion: Option<Option<String>>,
    #[serde(default, deserialize_with = "anulable")]
    pub tipo_mime: Option<Option<String>>,
    #[serde(default, deserialize_with = "anulable")]
    pub ruta_almacenamiento: Option<Option<String>>,
    #[serde(default, deserialize_with = "anulable")]
    pub url: Option<Option<String>>,
    #[serde(default, deserialize_with = "anulable")]
    pub tamano_bytes: Option<Option<i64>>,
    #[serde(default, deserialize_with = "anulable")]
    pub contenido: Option<Option<String>>,
    #[serde(default, deserialize_with = "anulable")]
    pub subido_por: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "anulable")]
    pub revisado_por: Option<Option<Uuid>>,
    pub visibilidad: Option<Visibilidad>,
    pub version: Option<String>,
    #[serde(default, deserialize_with = "anulable")]
    pub fecha_revision: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "anulable")]
    pub proxima_revision: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "anulable")]
    pub proceso_id: Option<Option<Uuid>>,
}

impl CambiosDocumento {
    pub fn aplicar(self, d: &mut Documento) -> Result<(), DomainError> {
        if let Some(v) = no_vacio(self.titulo, "titulo")? {
            d.titulo = v;
        }
        if let Some(v) = no_vacio(self.version, "version")? {
            d.version = v;
        }
        validar_tamano(self.tamano_bytes.flatten())?;
        macro_rules! opcionales {
            ($($campo:ident),+) => {
                $(if let Some(v) = self.$campo {
                    d.$campo = v;
                })+
            };
        }
        opcionales!(descripcion,
                    tipo_mime,
                    ruta_almacenamiento,
                    url,
                    tamano_bytes,
                    contenido,
                    subido_por,
                    revisado_por,
                    fecha_revision,
                    proxima_revision,
                    proceso_id);
        if let Some(v) = self.visibilidad {
            d.visibilidad = v;
        }
        Ok(())
    }
}

impl Entidad for Documento {
    const NOMBRE: &'static str = "documento";
    const FILTROS: &'static [Filtrable] = &[Filtrable::new("procesoId", "proceso_id", TipoCampo::Uuid),
                                            Filtrable::new("visibilidad", "visibilidad", TipoCampo::Catalogo(Visibilidad::normalizar))];

    fn id(&self) -> Uuid {
        self.id
    }

    fn marca_orden(&self) -> DateTime<Utc> {
        self.creado_en
    }

    fn valor_campo(&self, campo: &str) -> Option<ValorCampo> {
        match campo {
            "proceso_id" => self.proceso_id.map(ValorCampo::Uuid),
            "visibilidad" => Some(ValorCampo::Texto(self.visibilidad.as_str().to_string())),
            _ => None,
        }
    }
}

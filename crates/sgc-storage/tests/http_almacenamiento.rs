//! Cliente HTTP contra un servicio de objetos falso levantado con axum.
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use sgc_storage::{Almacenamiento, HttpAlmacenamiento, StorageConfig, StorageError};

type Objetos = Arc<Mutex<HashMap<String, (Vec<u8>, String)>>>;

async fn subir(State(objetos): State<Objetos>,
               Path((bucket, ruta)): Path<(String, String)>,
               headers: HeaderMap,
               cuerpo: Bytes)
               -> StatusCode {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer secreta") {
        return StatusCode::UNAUTHORIZED;
    }
    let tipo = headers.get("content-type")
                      .and_then(|v| v.to_str().ok())
                      .unwrap_or_default()
                      .to_string();
    objetos.lock().unwrap().insert(format!("{bucket}/{ruta}"), (cuerpo.to_vec(), tipo));
    StatusCode::OK
}

async fn eliminar(State(objetos): State<Objetos>, Path((bucket, ruta)): Path<(String, String)>) -> StatusCode {
    match objetos.lock().unwrap().remove(&format!("{bucket}/{ruta}")) {
        Some(_) => StatusCode::OK,
        None => StatusCode::NOT_FOUND,
    }
}

async fn firmar(Path((bucket, ruta)): Path<(String, String)>, Json(cuerpo): Json<Value>) -> Json<Value> {
    Json(json!({ "signedURL": format!("/object/sign/{bucket}/{ruta}?token=t&ttl={}", cuerpo["expiresIn"]) }))
}

async fn servicio_falso() -> (String, Objetos) {
    let objetos = Objetos::default();
    let app = Router::new().route("/object/:bucket/:ruta", post(subir).delete(eliminar))
                           .route("/object/sign/:bucket/:ruta", post(firmar))
                           .with_state(objetos.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), objetos)
}

#[tokio::test]
async fn sube_firma_y_elimina() {
    let (base, objetos) = servicio_falso().await;
    let cliente = HttpAlmacenamiento::new(&StorageConfig { url: base.clone(),
                                                           clave: "secreta".into() }).unwrap();

    let o = cliente.subir("documentos", "acta.pdf", b"contenido".to_vec(), Some("application/pdf"))
                   .await
                   .unwrap();
    assert_eq!(o.url, format!("{base}/object/public/documentos/{}", o.ruta));
    let guardado = objetos.lock().unwrap().get(&format!("documentos/{}", o.ruta)).cloned().unwrap();
    assert_eq!(guardado, (b"contenido".to_vec(), "application/pdf".to_string()));

    let url = cliente.url_firmada("documentos", &o.ruta, 120).await.unwrap();
    assert_eq!(url, format!("{base}/object/sign/documentos/{}?token=t&ttl=120", o.ruta));

    cliente.eliminar("documentos", &o.ruta).await.unwrap();
    assert!(objetos.lock().unwrap().is_empty());
    let r = cliente.eliminar("documentos", &o.ruta).await;
    assert!(matches!(r, Err(StorageError::NoEncontrado(_))));
}

#[tokio::test]
async fn clave_incorrecta_es_error_de_estado() {
    let (base, _) = servicio_falso().await;
    let cliente = HttpAlmacenamiento::new(&StorageConfig { url: base,
                                                           clave: "otra".into() }).unwrap();
    let r = cliente.subir("imagenes", "f.png", vec![0], None).await;
    assert!(matches!(r, Err(StorageError::Estado { status: 401, .. })));
}

use reqwest::StatusCode;
use serde_json::{json, Value};
use sgc_rust::{construir_estado, AppConfig};

#[tokio::test]
async fn arranca_en_memoria_y_atiende_peticiones() {
    let cfg = AppConfig::desde_variables(|k| match k {
                  "SGC_DIRECCION" => Some("127.0.0.1:0".to_string()),
                  _ => None,
              }).unwrap();
    assert!(cfg.db.is_none());
    let estado = construir_estado(&cfg).unwrap();

    let listener = tokio::net::TcpListener::bind(cfg.direccion).await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, sgc_api::router(estado)).await.unwrap();
    });

    let cliente = reqwest::Client::new();
    let salud: Value = cliente.get(format!("{base}/health")).send().await.unwrap().json().await.unwrap();
    assert_eq!(salud["estado"], "ok");

    let resp = cliente.post(format!("{base}/riesgos"))
                      .bearer_auth("t")
                      .json(&json!({"codigo": "R-1", "descripcion": "Proveedor único", "probabilidad": 4, "impacto": 5}))
                      .send()
                      .await
                      .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let riesgo: Value = resp.json().await.unwrap();
    assert_eq!(riesgo["estado"], "identificado");

    let resp = cliente.post(format!("{base}/riesgos"))
                      .bearer_auth("t")
                      .json(&json!({"codigo": "R-2", "descripcion": "x", "probabilidad": 9}))
                      .send()
                      .await
                      .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

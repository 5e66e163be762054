use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;

/// Span por petición con método y ruta; registra estado y duración.
pub async fn registrar_peticion(req: Request, next: Next) -> Response {
    let metodo = req.method().to_string();
    let ruta = req.uri().path().to_string();
    let span = tracing::info_span!("http.request", method = %metodo, route = %ruta);
    let inicio = Instant::now();
    let resp = next.run(req).instrument(span.clone()).await;
    span.in_scope(|| {
        tracing::info!(status = resp.status().as_u16(),
                       ms = inicio.elapsed().as_millis() as u64,
                       "respuesta");
    });
    resp
}

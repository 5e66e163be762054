use sgc_rust::{construir_estado, AppConfig, AppError};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` (por defecto `info`); JSON con `SGC_LOG_JSON=1`. Los registros
/// de `log` (core y persistencia) entran por el puente de `tracing-log`.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::registry().with(filter)
                                      .with(tracing_subscriber::fmt::layer().json())
                                      .init();
    } else {
        tracing_subscriber::registry().with(filter)
                                      .with(tracing_subscriber::fmt::layer())
                                      .init();
    }
}

async fn senal_de_apagado() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
            tokio::select! {
                _ = sigterm.recv() => {}
                _ = tokio::signal::ctrl_c() => {}
            }
            return;
        }
    }
    let _ = tokio::signal::ctrl_c().await;
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cfg = AppConfig::from_env()?;
    init_tracing(cfg.log_json);

    let estado = {
        let cfg = cfg.clone();
        tokio::task::spawn_blocking(move || construir_estado(&cfg)).await
                                                                    .map_err(|e| AppError::Interno(e.to_string()))??
    };
    let listener = TcpListener::bind(cfg.direccion).await?;
    info!("sgc-server escuchando en {}", cfg.direccion);
    axum::serve(listener, sgc_api::router(estado)).with_graceful_shutdown(senal_de_apagado())
                                                  .await?;
    info!("sgc-server detenido");
    Ok(())
}

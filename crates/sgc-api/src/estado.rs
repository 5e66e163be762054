use std::sync::Arc;

use sgc_core::Repositorios;
use sgc_storage::{AlmacenamientoEnMemoria, Almacenamiento};

/// Estado compartido por los handlers.
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositorios,
    pub almacenamiento: Arc<dyn Almacenamiento>,
}

impl AppState {
    pub fn new(repos: Repositorios, almacenamiento: Arc<dyn Almacenamiento>) -> Self {
        Self { repos,
               almacenamiento }
    }

    pub fn en_memoria() -> Self {
        Self::new(Repositorios::en_memoria(), Arc::new(AlmacenamientoEnMemoria::new()))
    }
}

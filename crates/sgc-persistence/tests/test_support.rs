use once_cell::sync::Lazy;
use sgc_core::Repositorios;
use sgc_persistence::{build_pool, repositorios_pg, DbConfig, PgPool};

pub static TEST_POOL: Lazy<Option<PgPool>> = Lazy::new(|| {
    let cfg = match DbConfig::from_env() {
        Ok(Some(c)) => c,
        _ => return None,
    };
    // 1x1 estable
    let cfg = DbConfig { min_connections: 1,
                         max_connections: 1,
                         ..cfg };
    match build_pool(&cfg) {
        Ok(p) => Some(p),
        Err(e) => {
            eprintln!("No se pudo construir pool de test: {e}");
            None
        }
    }
});

pub fn repos() -> Option<Repositorios> {
    TEST_POOL.as_ref().map(|p| repositorios_pg(p.clone()))
}

/// Sufijo único para códigos y nombres de usuario (la base se comparte
/// entre corridas).
pub fn sufijo() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

pub mod memoria;
pub mod repositorios;
pub mod types;
pub use memoria::EnMemoria;
pub use repositorios::{RepositorioDe, Repositorios};
pub use types::Repositorio;

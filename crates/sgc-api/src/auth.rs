//! Frontera de autenticación: exige `Authorization: Bearer <token>`.
//!
//! El token no se valida aquí; queda en las extensiones de la petición para
//! que un colaborador aguas abajo lo reenvíe.

use axum::extract::Request;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPortador(pub String);

pub fn token_de(valor: Option<&str>) -> Option<TokenPortador> {
    valor.and_then(|v| v.strip_prefix("Bearer "))
         .map(str::trim)
         .filter(|t| !t.is_empty())
         .map(|t| TokenPortador(t.to_string()))
}

pub async fn exigir_portador(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let token = token_de(req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok()))
        .ok_or_else(|| ApiError::no_autorizado("se requiere un token de acceso (Authorization: Bearer)"))?;
    req.extensions_mut().insert(token);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formato_del_encabezado() {
        assert_eq!(token_de(Some("Bearer abc")), Some(TokenPortador("abc".into())));
        assert_eq!(token_de(Some("Bearer   ")), None);
        assert_eq!(token_de(Some("Basic abc")), None);
        assert_eq!(token_de(None), None);
    }
}

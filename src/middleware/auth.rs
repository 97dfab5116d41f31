// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{common::error::AppError, config::AppState, models::auth::User};

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

// Remove o prefixo "Bearer " (sem diferenciar maiúsculas)
fn strip_bearer(value: &str) -> Option<&str> {
    let value = value.trim();
    let (scheme, token) = value.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() {
        Some(token.trim())
    } else {
        None
    }
}

/// Procura o token primeiro no header `Authorization` e depois no cookie
/// `access_token`, que pode vir com ou sem o prefixo "Bearer ".
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(header) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        if let Some(token) = strip_bearer(header) {
            return Some(token.to_string());
        }
    }

    let jar = CookieJar::from_headers(headers);
    let cookie = jar.get(ACCESS_TOKEN_COOKIE)?;
    let value = cookie.value().trim();
    let token = strip_bearer(value).unwrap_or(value);
    (!token.is_empty()).then(|| token.to_string())
}

// O middleware em si
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(request.headers());
    let user = app_state
        .auth_service
        .resolve_principal(token.as_deref())
        .await?;

    // Insere o usuário nos "extensions" da requisição
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, HeaderValue};

    fn headers(pairs: &[(axum::http::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn reads_bearer_header() {
        let map = headers(&[(AUTHORIZATION, "Bearer abc.def.ghi")]);
        assert_eq!(extract_token(&map).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let map = headers(&[(AUTHORIZATION, "bearer abc")]);
        assert_eq!(extract_token(&map).as_deref(), Some("abc"));
    }

    #[test]
    fn other_schemes_are_ignored() {
        let map = headers(&[(AUTHORIZATION, "Basic dXNlcjpwYXNz")]);
        assert_eq!(extract_token(&map), None);
    }

    #[test]
    fn falls_back_to_cookie_with_prefix() {
        // O cookie gravado no login vai percent-encoded
        let map = headers(&[(COOKIE, "theme=dark; access_token=Bearer%20xyz")]);
        assert_eq!(extract_token(&map).as_deref(), Some("xyz"));
    }

    #[test]
    fn cookie_without_prefix_is_used_as_is() {
        let map = headers(&[(COOKIE, "access_token=xyz")]);
        assert_eq!(extract_token(&map).as_deref(), Some("xyz"));
    }

    #[test]
    fn header_wins_over_cookie() {
        let map = headers(&[(AUTHORIZATION, "Bearer from-header"), (COOKIE, "access_token=from-cookie")]);
        assert_eq!(extract_token(&map).as_deref(), Some("from-header"));
    }

    #[test]
    fn nothing_present() {
        assert_eq!(extract_token(&HeaderMap::new()), None);
    }
}

// src/handlers/auth.rs

use axum::{
    extract::{FromRequest, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        extract::{AppForm, AppJson},
    },
    config::AppState,
    handlers::MessageResponse,
    middleware::auth::{AuthenticatedUser, ACCESS_TOKEN_COOKIE},
    models::auth::{
        AuthResponse, LoginUserPayload, PasswordGrantForm, RefreshTokenPayload,
        RegisterUserPayload, User,
    },
};

fn access_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, format!("Bearer {}", token)))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .build()
}

/// Credenciais do login: JSON `{email, password}` ou o formulário
/// `username`/`password` do OAuth2 (usado pelo "Authorize" do OpenAPI).
pub struct LoginCredentials(pub LoginUserPayload);

impl<S> FromRequest<S> for LoginCredentials
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let AppForm(form) = AppForm::<PasswordGrantForm>::from_request(req, state).await?;
            Ok(Self(form.into()))
        } else {
            let AppJson(payload) = AppJson::<LoginUserPayload>::from_request(req, state).await?;
            Ok(Self(payload))
        }
    }
}

// Handler de registro
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Usuário criado com papel viewer", body = User),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail já cadastrado")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<RegisterUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = app_state.auth_service.register(&payload).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

// Handler de login: devolve o par de tokens e grava o cookie `access_token`
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body(content(
        (LoginUserPayload = "application/json"),
        (PasswordGrantForm = "application/x-www-form-urlencoded")
    )),
    responses(
        (status = 200, description = "Login efetuado", body = AuthResponse),
        (status = 400, description = "Conta inativa ou corpo inválido"),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    jar: CookieJar,
    LoginCredentials(payload): LoginCredentials,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let response = app_state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    let jar = jar.add(access_cookie(&response.access_token));
    Ok((jar, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    tag = "Auth",
    request_body = RefreshTokenPayload,
    responses(
        (status = 200, description = "Novo par de tokens", body = AuthResponse),
        (status = 401, description = "Refresh token inválido")
    )
)]
pub async fn refresh(
    State(app_state): State<AppState>,
    jar: CookieJar,
    AppJson(payload): AppJson<RefreshTokenPayload>,
) -> Result<impl IntoResponse, AppError> {
    let response = app_state.auth_service.refresh(&payload.refresh_token).await?;

    let jar = jar.add(access_cookie(&response.access_token));
    Ok((jar, Json(response)))
}

// Tokens são stateless: sair é só apagar o cookie
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Cookie removido", body = MessageResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn logout(AuthenticatedUser(user): AuthenticatedUser, jar: CookieJar) -> impl IntoResponse {
    tracing::info!("👋 Logout: id={}", user.id);
    let jar = jar.remove(Cookie::build(ACCESS_TOKEN_COOKIE).path("/"));
    (jar, Json(MessageResponse::new("Logout efetuado com sucesso.")))
}

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Usuário autenticado", body = User),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}

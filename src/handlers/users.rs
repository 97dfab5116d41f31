// src/handlers/users.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        extract::{AppJson, AppPath, AppQuery},
        pagination::ListQuery,
    },
    config::AppState,
    handlers::MessageResponse,
    models::auth::{CreateUserPayload, UpdateUserPayload, User},
};

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    params(ListQuery),
    responses((status = 200, body = Vec<User>)),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Vec<User>>, AppError> {
    let page = query.page(&app_state.config)?;
    Ok(Json(app_state.user_service.list(page, query.dealership_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, body = User),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = app_state.user_service.create(&payload).await?;
    tracing::info!("👤 Usuário criado: id={} papel={:?}", user.id, user.role);

    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "ID do usuário")),
    responses(
        (status = 200, body = User),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_user(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<User>, AppError> {
    Ok(Json(app_state.user_service.get(id).await?))
}

// Senha enviada aqui é re-hasheada; `isActive: false` desativa a conta
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "ID do usuário")),
    request_body = UpdateUserPayload,
    responses(
        (status = 200, body = User),
        (status = 404, description = "Não encontrado"),
        (status = 409, description = "E-mail já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateUserPayload>,
) -> Result<Json<User>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.user_service.update(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "ID do usuário")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "Não encontrado"),
        (status = 409, description = "Usuário ainda referenciado (vendas, notas...)")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.user_service.delete(id).await?;
    tracing::info!("🗑️ Usuário removido: id={}", id);
    Ok(Json(MessageResponse::new("Usuário removido com sucesso.")))
}

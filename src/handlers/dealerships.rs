// src/handlers/dealerships.rs

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
    models::dealership::{CreateDealershipPayload, Dealership, UpdateDealershipPayload},
};

#[utoipa::path(
    get,
    path = "/api/v1/dealerships",
    tag = "Dealerships",
    params(ListQuery),
    responses(
        (status = 200, description = "Concessionárias em ordem de cadastro", body = Vec<Dealership>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_dealerships(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Vec<Dealership>>, AppError> {
    let page = query.page(&app_state.config)?;
    let dealerships = app_state.dealership_repo.list(page).await?;
    Ok(Json(dealerships))
}

#[utoipa::path(
    post,
    path = "/api/v1/dealerships",
    tag = "Dealerships",
    request_body = CreateDealershipPayload,
    responses(
        (status = 201, description = "Concessionária criada", body = Dealership),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Número de revendedor duplicado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_dealership(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateDealershipPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let dealership = app_state.dealership_repo.create(&payload).await?;
    tracing::info!("🏢 Concessionária criada: id={}", dealership.id);

    Ok((StatusCode::CREATED, Json(dealership)))
}

#[utoipa::path(
    get,
    path = "/api/v1/dealerships/{id}",
    tag = "Dealerships",
    params(("id" = i64, Path, description = "ID da concessionária")),
    responses(
        (status = 200, body = Dealership),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_dealership(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Dealership>, AppError> {
    Ok(Json(app_state.dealership_repo.get(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/dealerships/{id}",
    tag = "Dealerships",
    params(("id" = i64, Path, description = "ID da concessionária")),
    request_body = UpdateDealershipPayload,
    responses(
        (status = 200, description = "Só os campos enviados são alterados", body = Dealership),
        (status = 404, description = "Não encontrada"),
        (status = 409, description = "Número de revendedor duplicado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_dealership(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateDealershipPayload>,
) -> Result<Json<Dealership>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.dealership_repo.update(id, &payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/dealerships/{id}",
    tag = "Dealerships",
    params(("id" = i64, Path, description = "ID da concessionária")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "Não encontrada"),
        (status = 409, description = "Ainda há registros ligados a ela")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_dealership(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.dealership_repo.delete(id).await?;
    tracing::info!("🗑️ Concessionária removida: id={}", id);
    Ok(Json(MessageResponse::new("Concessionária removida com sucesso.")))
}

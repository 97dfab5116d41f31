// src/handlers/sales.rs

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
    models::sale::{CreateSaleItemPayload, CreateSalePayload, Sale, SaleItem, UpdateSalePayload},
};

#[utoipa::path(
    get,
    path = "/api/v1/sales",
    tag = "Sales",
    params(ListQuery),
    responses((status = 200, body = Vec<Sale>)),
    security(("api_jwt" = []))
)]
pub async fn list_sales(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Vec<Sale>>, AppError> {
    let page = query.page(&app_state.config)?;
    Ok(Json(app_state.sale_repo.list(page, query.dealership_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/sales",
    tag = "Sales",
    request_body = CreateSalePayload,
    responses(
        (status = 201, description = "Venda registrada (número gerado se omitido)", body = Sale),
        (status = 400, description = "Dados inválidos ou referência inexistente"),
        (status = 409, description = "Número de venda duplicado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    payload.validate_amounts()?;

    let sale = app_state.sale_repo.create(&payload).await?;
    tracing::info!("💰 Venda registrada: {} (id={})", sale.sale_number, sale.id);

    Ok((StatusCode::CREATED, Json(sale)))
}

#[utoipa::path(
    get,
    path = "/api/v1/sales/{id}",
    tag = "Sales",
    params(("id" = i64, Path, description = "ID da venda")),
    responses(
        (status = 200, body = Sale),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_sale(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Sale>, AppError> {
    Ok(Json(app_state.sale_repo.get(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/sales/{id}",
    tag = "Sales",
    params(("id" = i64, Path, description = "ID da venda")),
    request_body = UpdateSalePayload,
    responses(
        (status = 200, body = Sale),
        (status = 404, description = "Não encontrada"),
        (status = 409, description = "Número de venda duplicado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_sale(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateSalePayload>,
) -> Result<Json<Sale>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.sale_repo.update(id, &payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/sales/{id}",
    tag = "Sales",
    params(("id" = i64, Path, description = "ID da venda")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_sale(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.sale_repo.delete(id).await?;
    tracing::info!("🗑️ Venda removida: id={}", id);
    Ok(Json(MessageResponse::new("Venda removida com sucesso.")))
}

// ---
// Itens
// ---

#[utoipa::path(
    get,
    path = "/api/v1/sales/{id}/items",
    tag = "Sales",
    params(("id" = i64, Path, description = "ID da venda")),
    responses(
        (status = 200, body = Vec<SaleItem>),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_sale_items(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Vec<SaleItem>>, AppError> {
    Ok(Json(app_state.sale_repo.list_items(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/sales/{id}/items",
    tag = "Sales",
    params(("id" = i64, Path, description = "ID da venda")),
    request_body = CreateSaleItemPayload,
    responses(
        (status = 201, body = SaleItem),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_sale_item(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<CreateSaleItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    payload.validate_amounts()?;
    let item = app_state.sale_repo.add_item(id, &payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/sales/{id}/items/{item_id}",
    tag = "Sales",
    params(
        ("id" = i64, Path, description = "ID da venda"),
        ("item_id" = i64, Path, description = "ID do item")
    ),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "Item não encontrado nesta venda")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_sale_item(
    State(app_state): State<AppState>,
    AppPath((id, item_id)): AppPath<(i64, i64)>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.sale_repo.remove_item(id, item_id).await?;
    Ok(Json(MessageResponse::new("Item removido com sucesso.")))
}

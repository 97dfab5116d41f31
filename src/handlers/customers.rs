// src/handlers/customers.rs

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
    middleware::auth::AuthenticatedUser,
    models::customer::{
        CreateCustomerNotePayload, CreateCustomerPayload, Customer, CustomerNote,
        UpdateCustomerPayload,
    },
};

#[utoipa::path(
    get,
    path = "/api/v1/customers",
    tag = "Customers",
    params(ListQuery),
    responses((status = 200, body = Vec<Customer>)),
    security(("api_jwt" = []))
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let page = query.page(&app_state.config)?;
    let customers = app_state
        .customer_repo
        .list(page, query.dealership_id)
        .await?;
    Ok(Json(customers))
}

#[utoipa::path(
    post,
    path = "/api/v1/customers",
    tag = "Customers",
    request_body = CreateCustomerPayload,
    responses(
        (status = 201, body = Customer),
        (status = 400, description = "Dados inválidos ou concessionária inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer = app_state.customer_repo.create(&payload).await?;
    tracing::info!("🙋 Cliente criado: id={}", customer.id);

    Ok((StatusCode::CREATED, Json(customer)))
}

#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    params(("id" = i64, Path, description = "ID do cliente")),
    responses(
        (status = 200, body = Customer),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_customer(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Customer>, AppError> {
    Ok(Json(app_state.customer_repo.get(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    params(("id" = i64, Path, description = "ID do cliente")),
    request_body = UpdateCustomerPayload,
    responses(
        (status = 200, body = Customer),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateCustomerPayload>,
) -> Result<Json<Customer>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.customer_repo.update(id, &payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    params(("id" = i64, Path, description = "ID do cliente")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "Não encontrado"),
        (status = 409, description = "Cliente ligado a vendas ou agendamentos")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_customer(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.customer_repo.delete(id).await?;
    tracing::info!("🗑️ Cliente removido: id={}", id);
    Ok(Json(MessageResponse::new("Cliente removido com sucesso.")))
}

// ---
// Notas
// ---

#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}/notes",
    tag = "Customers",
    params(("id" = i64, Path, description = "ID do cliente")),
    responses(
        (status = 200, body = Vec<CustomerNote>),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_customer_notes(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Vec<CustomerNote>>, AppError> {
    Ok(Json(app_state.customer_repo.list_notes(id).await?))
}

// O autor da nota é sempre quem está logado
#[utoipa::path(
    post,
    path = "/api/v1/customers/{id}/notes",
    tag = "Customers",
    params(("id" = i64, Path, description = "ID do cliente")),
    request_body = CreateCustomerNotePayload,
    responses(
        (status = 201, body = CustomerNote),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_customer_note(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<CreateCustomerNotePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let note = app_state.customer_repo.add_note(id, user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/customers/{id}/notes/{note_id}",
    tag = "Customers",
    params(
        ("id" = i64, Path, description = "ID do cliente"),
        ("note_id" = i64, Path, description = "ID da nota")
    ),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "Nota não encontrada neste cliente")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_customer_note(
    State(app_state): State<AppState>,
    AppPath((id, note_id)): AppPath<(i64, i64)>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.customer_repo.remove_note(id, note_id).await?;
    Ok(Json(MessageResponse::new("Nota removida com sucesso.")))
}

// src/handlers/service.rs
//
// Oficina: agendamentos e ordens de serviço.

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
    models::service::{
        CreateAppointmentPayload, CreateWorkOrderPayload, ServiceAppointment, ServiceWorkOrder,
        UpdateAppointmentPayload, UpdateWorkOrderPayload,
    },
};

#[utoipa::path(
    get,
    path = "/api/v1/service-appointments",
    tag = "Service",
    params(ListQuery),
    responses((status = 200, body = Vec<ServiceAppointment>)),
    security(("api_jwt" = []))
)]
pub async fn list_appointments(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Vec<ServiceAppointment>>, AppError> {
    let page = query.page(&app_state.config)?;
    let appointments = app_state
        .service_repo
        .list_appointments(page, query.dealership_id)
        .await?;
    Ok(Json(appointments))
}

#[utoipa::path(
    post,
    path = "/api/v1/service-appointments",
    tag = "Service",
    request_body = CreateAppointmentPayload,
    responses(
        (status = 201, body = ServiceAppointment),
        (status = 400, description = "Dados inválidos ou referência inexistente"),
        (status = 409, description = "Número de agendamento duplicado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_appointment(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateAppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    payload.validate_amounts()?;

    let appointment = app_state.service_repo.create_appointment(&payload).await?;
    tracing::info!(
        "🔧 Agendamento criado: {} (id={})",
        appointment.appointment_number,
        appointment.id
    );

    Ok((StatusCode::CREATED, Json(appointment)))
}

#[utoipa::path(
    get,
    path = "/api/v1/service-appointments/{id}",
    tag = "Service",
    params(("id" = i64, Path, description = "ID do agendamento")),
    responses(
        (status = 200, body = ServiceAppointment),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_appointment(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ServiceAppointment>, AppError> {
    Ok(Json(app_state.service_repo.get_appointment(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/service-appointments/{id}",
    tag = "Service",
    params(("id" = i64, Path, description = "ID do agendamento")),
    request_body = UpdateAppointmentPayload,
    responses(
        (status = 200, body = ServiceAppointment),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_appointment(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateAppointmentPayload>,
) -> Result<Json<ServiceAppointment>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.service_repo.update_appointment(id, &payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/service-appointments/{id}",
    tag = "Service",
    params(("id" = i64, Path, description = "ID do agendamento")),
    responses(
        (status = 200, description = "Removido junto com as ordens de serviço", body = MessageResponse),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_appointment(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.service_repo.delete_appointment(id).await?;
    tracing::info!("🗑️ Agendamento removido: id={}", id);
    Ok(Json(MessageResponse::new("Agendamento removido com sucesso.")))
}

// ---
// Ordens de serviço
// ---

#[utoipa::path(
    get,
    path = "/api/v1/service-appointments/{id}/work-orders",
    tag = "Service",
    params(("id" = i64, Path, description = "ID do agendamento")),
    responses(
        (status = 200, body = Vec<ServiceWorkOrder>),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_work_orders(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Vec<ServiceWorkOrder>>, AppError> {
    Ok(Json(app_state.service_repo.list_work_orders(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/service-appointments/{id}/work-orders",
    tag = "Service",
    params(("id" = i64, Path, description = "ID do agendamento")),
    request_body = CreateWorkOrderPayload,
    responses(
        (status = 201, body = ServiceWorkOrder),
        (status = 404, description = "Agendamento não encontrado"),
        (status = 409, description = "Número da ordem duplicado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_work_order(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<CreateWorkOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    payload.validate_amounts()?;

    let order = app_state.service_repo.create_work_order(id, &payload).await?;
    tracing::info!("🛠️ Ordem de serviço aberta: {} (id={})", order.work_order_number, order.id);

    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    get,
    path = "/api/v1/work-orders/{id}",
    tag = "Service",
    params(("id" = i64, Path, description = "ID da ordem de serviço")),
    responses(
        (status = 200, body = ServiceWorkOrder),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_work_order(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ServiceWorkOrder>, AppError> {
    Ok(Json(app_state.service_repo.get_work_order(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/work-orders/{id}",
    tag = "Service",
    params(("id" = i64, Path, description = "ID da ordem de serviço")),
    request_body = UpdateWorkOrderPayload,
    responses(
        (status = 200, body = ServiceWorkOrder),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_work_order(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateWorkOrderPayload>,
) -> Result<Json<ServiceWorkOrder>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.service_repo.update_work_order(id, &payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/work-orders/{id}",
    tag = "Service",
    params(("id" = i64, Path, description = "ID da ordem de serviço")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_work_order(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.service_repo.delete_work_order(id).await?;
    Ok(Json(MessageResponse::new("Ordem de serviço removida com sucesso.")))
}

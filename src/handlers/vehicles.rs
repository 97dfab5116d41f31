// src/handlers/vehicles.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        extract::{AppJson, AppPath, AppQuery},
        pagination::Page,
    },
    config::AppState,
    handlers::MessageResponse,
    models::vehicle::{
        CreateVehicleImagePayload, CreateVehiclePayload, UpdateVehiclePayload, Vehicle,
        VehicleImage, VehicleListQuery,
    },
};

#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    params(VehicleListQuery),
    responses(
        (status = 200, description = "Estoque filtrado", body = Vec<Vehicle>),
        (status = 400, description = "Filtro inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_vehicles(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<VehicleListQuery>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let page = Page::new(query.skip, query.limit, &app_state.config)?;
    let vehicles = app_state
        .vehicle_repo
        .list(page, query.dealership_id, query.status)
        .await?;
    Ok(Json(vehicles))
}

#[utoipa::path(
    post,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    request_body = CreateVehiclePayload,
    responses(
        (status = 201, description = "Veículo cadastrado", body = Vehicle),
        (status = 400, description = "Dados inválidos ou concessionária inexistente"),
        (status = 409, description = "VIN duplicado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_vehicle(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateVehiclePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    payload.validate_prices()?;

    let vehicle = app_state.vehicle_repo.create(&payload).await?;
    tracing::info!("🚗 Veículo cadastrado: id={} vin={}", vehicle.id, vehicle.vin);

    Ok((StatusCode::CREATED, Json(vehicle)))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "ID do veículo")),
    responses(
        (status = 200, body = Vehicle),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_vehicle(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Vehicle>, AppError> {
    Ok(Json(app_state.vehicle_repo.get(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "ID do veículo")),
    request_body = UpdateVehiclePayload,
    responses(
        (status = 200, description = "Só os campos enviados são alterados", body = Vehicle),
        (status = 404, description = "Não encontrado"),
        (status = 409, description = "VIN duplicado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_vehicle(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateVehiclePayload>,
) -> Result<Json<Vehicle>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.vehicle_repo.update(id, &payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "ID do veículo")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "Não encontrado"),
        (status = 409, description = "Veículo ligado a vendas ou agendamentos")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_vehicle(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.vehicle_repo.delete(id).await?;
    tracing::info!("🗑️ Veículo removido: id={}", id);
    Ok(Json(MessageResponse::new("Veículo removido com sucesso.")))
}

// ---
// Imagens
// ---

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}/images",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "ID do veículo")),
    responses(
        (status = 200, body = Vec<VehicleImage>),
        (status = 404, description = "Veículo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_vehicle_images(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Vec<VehicleImage>>, AppError> {
    Ok(Json(app_state.vehicle_repo.list_images(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/vehicles/{id}/images",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "ID do veículo")),
    request_body = CreateVehicleImagePayload,
    responses(
        (status = 201, body = VehicleImage),
        (status = 404, description = "Veículo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_vehicle_image(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<CreateVehicleImagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let image = app_state.vehicle_repo.add_image(id, &payload).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/vehicles/{id}/images/{image_id}",
    tag = "Vehicles",
    params(
        ("id" = i64, Path, description = "ID do veículo"),
        ("image_id" = i64, Path, description = "ID da imagem")
    ),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "Imagem não encontrada neste veículo")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_vehicle_image(
    State(app_state): State<AppState>,
    AppPath((id, image_id)): AppPath<(i64, i64)>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.vehicle_repo.remove_image(id, image_id).await?;
    Ok(Json(MessageResponse::new("Imagem removida com sucesso.")))
}

// src/handlers/health.rs

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, description = "Servidor no ar", body = String))
)]
pub async fn health_check() -> &'static str {
    "OK"
}

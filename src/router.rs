// src/router.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

/// Monta o app completo. Separado do `main` para os testes usarem o mesmo router.
pub fn app(app_state: AppState) -> Router {
    // Rotas públicas de autenticação
    let public_auth_routes = Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh));

    // Tudo daqui para baixo exige um usuário autenticado e ativo
    let protected_routes = Router::new()
        .route("/auth/me", get(handlers::auth::get_me))
        .route("/auth/logout", post(handlers::auth::logout))
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .route(
            "/dealerships",
            get(handlers::dealerships::list_dealerships)
                .post(handlers::dealerships::create_dealership),
        )
        .route(
            "/dealerships/{id}",
            get(handlers::dealerships::get_dealership)
                .put(handlers::dealerships::update_dealership)
                .delete(handlers::dealerships::delete_dealership),
        )
        .route(
            "/vehicles",
            get(handlers::vehicles::list_vehicles).post(handlers::vehicles::create_vehicle),
        )
        .route(
            "/vehicles/{id}",
            get(handlers::vehicles::get_vehicle)
                .put(handlers::vehicles::update_vehicle)
                .delete(handlers::vehicles::delete_vehicle),
        )
        .route(
            "/vehicles/{id}/images",
            get(handlers::vehicles::list_vehicle_images)
                .post(handlers::vehicles::add_vehicle_image),
        )
        .route(
            "/vehicles/{id}/images/{image_id}",
            axum::routing::delete(handlers::vehicles::remove_vehicle_image),
        )
        .route(
            "/customers",
            get(handlers::customers::list_customers).post(handlers::customers::create_customer),
        )
        .route(
            "/customers/{id}",
            get(handlers::customers::get_customer)
                .put(handlers::customers::update_customer)
                .delete(handlers::customers::delete_customer),
        )
        .route(
            "/customers/{id}/notes",
            get(handlers::customers::list_customer_notes)
                .post(handlers::customers::add_customer_note),
        )
        .route(
            "/customers/{id}/notes/{note_id}",
            axum::routing::delete(handlers::customers::remove_customer_note),
        )
        .route(
            "/sales",
            get(handlers::sales::list_sales).post(handlers::sales::create_sale),
        )
        .route(
            "/sales/{id}",
            get(handlers::sales::get_sale)
                .put(handlers::sales::update_sale)
                .delete(handlers::sales::delete_sale),
        )
        .route(
            "/sales/{id}/items",
            get(handlers::sales::list_sale_items).post(handlers::sales::add_sale_item),
        )
        .route(
            "/sales/{id}/items/{item_id}",
            axum::routing::delete(handlers::sales::remove_sale_item),
        )
        .route(
            "/service-appointments",
            get(handlers::service::list_appointments).post(handlers::service::create_appointment),
        )
        .route(
            "/service-appointments/{id}",
            get(handlers::service::get_appointment)
                .put(handlers::service::update_appointment)
                .delete(handlers::service::delete_appointment),
        )
        .route(
            "/service-appointments/{id}/work-orders",
            get(handlers::service::list_work_orders).post(handlers::service::create_work_order),
        )
        .route(
            "/work-orders/{id}",
            get(handlers::service::get_work_order)
                .put(handlers::service::update_work_order)
                .delete(handlers::service::delete_work_order),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let api_v1 = public_auth_routes.merge(protected_routes);

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(handlers::health::health_check))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api/v1", api_v1)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

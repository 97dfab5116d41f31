// src/docs.rs

use utoipa::openapi::security::{
    Flow, Http, HttpAuthScheme, OAuth2, Password, Scopes, SecurityScheme,
};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,

        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::auth::logout,
        handlers::auth::get_me,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::get_user,
        handlers::users::update_user,
        handlers::users::delete_user,

        // --- Dealerships ---
        handlers::dealerships::list_dealerships,
        handlers::dealerships::create_dealership,
        handlers::dealerships::get_dealership,
        handlers::dealerships::update_dealership,
        handlers::dealerships::delete_dealership,

        // --- Vehicles ---
        handlers::vehicles::list_vehicles,
        handlers::vehicles::create_vehicle,
        handlers::vehicles::get_vehicle,
        handlers::vehicles::update_vehicle,
        handlers::vehicles::delete_vehicle,
        handlers::vehicles::list_vehicle_images,
        handlers::vehicles::add_vehicle_image,
        handlers::vehicles::remove_vehicle_image,

        // --- Customers ---
        handlers::customers::list_customers,
        handlers::customers::create_customer,
        handlers::customers::get_customer,
        handlers::customers::update_customer,
        handlers::customers::delete_customer,
        handlers::customers::list_customer_notes,
        handlers::customers::add_customer_note,
        handlers::customers::remove_customer_note,

        // --- Sales ---
        handlers::sales::list_sales,
        handlers::sales::create_sale,
        handlers::sales::get_sale,
        handlers::sales::update_sale,
        handlers::sales::delete_sale,
        handlers::sales::list_sale_items,
        handlers::sales::add_sale_item,
        handlers::sales::remove_sale_item,

        // --- Service ---
        handlers::service::list_appointments,
        handlers::service::create_appointment,
        handlers::service::get_appointment,
        handlers::service::update_appointment,
        handlers::service::delete_appointment,
        handlers::service::list_work_orders,
        handlers::service::create_work_order,
        handlers::service::get_work_order,
        handlers::service::update_work_order,
        handlers::service::delete_work_order,
    ),
    components(
        schemas(
            handlers::MessageResponse,

            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::PasswordGrantForm,
            models::auth::RefreshTokenPayload,
            models::auth::AuthResponse,
            models::auth::CreateUserPayload,
            models::auth::UpdateUserPayload,

            // --- Dealerships ---
            models::dealership::Dealership,
            models::dealership::CreateDealershipPayload,
            models::dealership::UpdateDealershipPayload,

            // --- Vehicles ---
            models::vehicle::VehicleStatus,
            models::vehicle::Vehicle,
            models::vehicle::VehicleImage,
            models::vehicle::CreateVehiclePayload,
            models::vehicle::UpdateVehiclePayload,
            models::vehicle::CreateVehicleImagePayload,

            // --- Customers ---
            models::customer::Customer,
            models::customer::CustomerNote,
            models::customer::CreateCustomerPayload,
            models::customer::UpdateCustomerPayload,
            models::customer::CreateCustomerNotePayload,

            // --- Sales ---
            models::sale::SaleStatus,
            models::sale::Sale,
            models::sale::SaleItem,
            models::sale::CreateSalePayload,
            models::sale::UpdateSalePayload,
            models::sale::CreateSaleItemPayload,

            // --- Service ---
            models::service::AppointmentStatus,
            models::service::WorkOrderStatus,
            models::service::ServiceAppointment,
            models::service::ServiceWorkOrder,
            models::service::CreateAppointmentPayload,
            models::service::UpdateAppointmentPayload,
            models::service::CreateWorkOrderPayload,
            models::service::UpdateWorkOrderPayload,
        )
    ),
    tags(
        (name = "Health", description = "Verificação de disponibilidade"),
        (name = "Auth", description = "Autenticação, Registro e Tokens"),
        (name = "Users", description = "Gestão de Usuários"),
        (name = "Dealerships", description = "Concessionárias"),
        (name = "Vehicles", description = "Estoque de Veículos e Imagens"),
        (name = "Customers", description = "Clientes e Notas de Atendimento"),
        (name = "Sales", description = "Vendas e Itens Adicionais"),
        (name = "Service", description = "Agendamentos da Oficina e Ordens de Serviço")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
        // Fluxo "password": o formulário vai direto para a rota de login
        components.add_security_scheme(
            "oauth2_password",
            SecurityScheme::OAuth2(OAuth2::new([Flow::Password(Password::new(
                "/api/v1/auth/login",
                Scopes::new(),
            ))])),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_collection() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/api/v1/auth/login",
            "/api/v1/dealerships/{id}",
            "/api/v1/vehicles/{id}/images/{image_id}",
            "/api/v1/customers/{id}/notes",
            "/api/v1/sales/{id}/items",
            "/api/v1/service-appointments/{id}/work-orders",
            "/api/v1/work-orders/{id}",
            "/api/v1/users/{id}",
        ] {
            assert!(paths.contains_key(path), "faltando {}", path);
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("api_jwt"));
        assert!(components.security_schemes.contains_key("oauth2_password"));
    }

    #[test]
    fn login_accepts_json_and_form_bodies() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let content = &doc["paths"]["/api/v1/auth/login"]["post"]["requestBody"]["content"];
        assert!(content["application/json"].is_object());
        assert!(content["application/x-www-form-urlencoded"].is_object());
    }
}

use serde::Serialize;
use utoipa::ToSchema;

pub mod auth;
pub mod customers;
pub mod dealerships;
pub mod health;
pub mod sales;
pub mod service;
pub mod users;
pub mod vehicles;

// Corpo das respostas de DELETE e logout
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Registro removido com sucesso.")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

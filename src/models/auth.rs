// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::patch::{double_option, non_null, present, PatchValidator};

// Mapeia o CREATE TYPE user_role do banco
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    DealerAdmin,
    SalesManager,
    SalesPerson,
    ServiceManager,
    ServiceTechnician,
    FinanceManager,
    InventoryManager,
    CustomerService,
    #[default]
    Viewer,
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "vendedor@concessionaria.com")]
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub is_verified: bool,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub dealership_id: Option<i64>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para registro de um novo usuário (sempre nasce como `viewer`)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "a@x.com")]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "O nome é obrigatório."))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "O sobrenome é obrigatório."))]
    pub last_name: String,
    pub phone: Option<String>,
    pub dealership_id: Option<i64>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserPayload {
    #[validate(length(min = 1, message = "O e-mail é obrigatório."))]
    pub email: String,
    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub password: String,
}

/// Corpo `application/x-www-form-urlencoded` do fluxo "password" do OAuth2
/// (o `username` é o e-mail; `grant_type` e `scope` são ignorados).
#[derive(Debug, Deserialize, ToSchema)]
pub struct PasswordGrantForm {
    pub username: String,
    pub password: String,
}

impl From<PasswordGrantForm> for LoginUserPayload {
    fn from(form: PasswordGrantForm) -> Self {
        Self {
            email: form.username,
            password: form.password,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenPayload {
    pub refresh_token: String,
}

// Resposta de autenticação com o par de tokens
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
    pub user: User,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (ID do usuário, em texto)
    pub exp: i64,    // Expiration time (timestamp em segundos)
    pub iat: i64,    // Issued At
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>, // "refresh" só no refresh token
}

// ---
// CRUD administrativo de usuários
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "O nome é obrigatório."))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "O sobrenome é obrigatório."))]
    pub last_name: String,
    pub role: Option<UserRole>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub dealership_id: Option<i64>,
    pub is_active: Option<bool>,
    pub is_verified: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    #[serde(default, deserialize_with = "non_null")]
    pub email: Option<String>,
    /// Texto puro; o serviço troca pelo hash antes de gravar.
    #[serde(default, deserialize_with = "non_null")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub role: Option<UserRole>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub avatar_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>, nullable)]
    pub dealership_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "non_null")]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "non_null")]
    pub is_verified: Option<bool>,
}

impl Validate for UpdateUserPayload {
    fn validate(&self) -> Result<(), validator::ValidationErrors> {
        PatchValidator::new()
            .email("email", self.email.as_ref())
            .min_len("password", self.password.as_ref(), 6)
            .not_blank("first_name", self.first_name.as_ref())
            .not_blank("last_name", self.last_name.as_ref())
            .not_blank("avatar_url", present(&self.avatar_url))
            .finish()
    }
}

/// Versão do patch que chega ao repositório: a senha já virou hash.
#[derive(Debug, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<UserRole>,
    pub phone: Option<Option<String>>,
    pub avatar_url: Option<Option<String>>,
    pub dealership_id: Option<Option<i64>>,
    pub is_active: Option<bool>,
    pub is_verified: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_as_snake_case() {
        let json = serde_json::to_string(&UserRole::ServiceTechnician).unwrap();
        assert_eq!(json, "\"service_technician\"");
        assert_eq!(UserRole::default(), UserRole::Viewer);
    }

    #[test]
    fn update_payload_rejects_bad_email_and_short_password() {
        let payload: UpdateUserPayload =
            serde_json::from_str(r#"{"email": "nope", "password": "123"}"#).unwrap();
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn update_payload_can_clear_phone() {
        let payload: UpdateUserPayload = serde_json::from_str(r#"{"phone": null}"#).unwrap();
        assert_eq!(payload.phone, Some(None));
        assert!(payload.first_name.is_none());
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn refresh_claim_uses_type_key() {
        let claims = Claims {
            sub: "7".into(),
            exp: 10,
            iat: 0,
            token_type: Some("refresh".into()),
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["type"], "refresh");
        assert_eq!(json["sub"], "7");
    }
}

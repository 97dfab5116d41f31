// src/models/customer.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::patch::{double_option, non_null, present, PatchValidator};

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub dealership_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: String,
    #[schema(example = "individual")]
    pub customer_type: Option<String>,
    pub source: Option<String>,
    pub preferred_contact_method: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerPayload {
    pub dealership_id: i64,
    #[validate(length(min = 1, max = 100, message = "O nome é obrigatório."))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "O sobrenome é obrigatório."))]
    pub last_name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub city: Option<String>,
    #[validate(length(equal = 2, message = "O estado deve ter 2 letras."))]
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub customer_type: Option<String>,
    pub source: Option<String>,
    pub preferred_contact_method: Option<String>,
    pub is_active: Option<bool>,
    pub is_verified: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerPayload {
    #[serde(default, deserialize_with = "non_null")]
    pub dealership_id: Option<i64>,
    #[serde(default, deserialize_with = "non_null")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<NaiveDate>, nullable)]
    pub date_of_birth: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub address_line_1: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub address_line_2: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub state: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub zip_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub customer_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub source: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub preferred_contact_method: Option<Option<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "non_null")]
    pub is_verified: Option<bool>,
}

impl Validate for UpdateCustomerPayload {
    fn validate(&self) -> Result<(), validator::ValidationErrors> {
        PatchValidator::new()
            .not_blank("first_name", self.first_name.as_ref())
            .not_blank("last_name", self.last_name.as_ref())
            .email("email", present(&self.email))
            .exact_len("state", present(&self.state), 2)
            .not_blank("country", self.country.as_ref())
            .finish()
    }
}

// ---
// Notas de atendimento
// ---

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerNote {
    pub id: i64,
    pub customer_id: i64,
    /// Autor da nota (usuário logado no momento da criação)
    pub user_id: i64,
    pub title: Option<String>,
    pub content: String,
    pub note_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerNotePayload {
    #[validate(length(max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "O conteúdo da nota é obrigatório."))]
    pub content: String,
    pub note_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_of_birth_is_parsed_from_iso_date() {
        let payload: CreateCustomerPayload = serde_json::from_value(serde_json::json!({
            "dealershipId": 3,
            "firstName": "Ana",
            "lastName": "Souza",
            "dateOfBirth": "1990-04-12"
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.date_of_birth, NaiveDate::from_ymd_opt(1990, 4, 12));
    }

    #[test]
    fn update_can_clear_email_but_not_first_name() {
        let payload: UpdateCustomerPayload = serde_json::from_str(r#"{"email": null}"#).unwrap();
        assert_eq!(payload.email, Some(None));
        assert!(serde_json::from_str::<UpdateCustomerPayload>(r#"{"firstName": null}"#).is_err());
    }

    #[test]
    fn empty_note_is_rejected() {
        let payload: CreateCustomerNotePayload =
            serde_json::from_str(r#"{"content": ""}"#).unwrap();
        assert!(payload.validate().is_err());
    }
}

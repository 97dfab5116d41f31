// src/models/dealership.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::patch::{double_option, non_null, present, PatchValidator};

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dealership {
    pub id: i64,
    #[schema(example = "Auto Center Polacchini")]
    pub name: String,
    pub legal_name: Option<String>,
    #[schema(example = "DLR-0001")]
    pub dealer_number: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub address_line_1: String,
    pub address_line_2: Option<String>,
    pub city: String,
    #[schema(example = "SP")]
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub tax_id: Option<String>,
    pub business_license: Option<String>,
    pub dealer_license: Option<String>,
    pub operating_hours: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDealershipPayload {
    #[validate(length(min = 1, max = 255, message = "O nome é obrigatório."))]
    pub name: String,
    pub legal_name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "O número do revendedor é obrigatório."))]
    pub dealer_number: String,
    pub phone: Option<String>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub website: Option<String>,
    #[validate(length(min = 1, max = 255, message = "O endereço é obrigatório."))]
    pub address_line_1: String,
    pub address_line_2: Option<String>,
    #[validate(length(min = 1, max = 100, message = "A cidade é obrigatória."))]
    pub city: String,
    #[validate(length(equal = 2, message = "O estado deve ter 2 letras."))]
    pub state: String,
    #[validate(length(min = 1, max = 10, message = "O CEP é obrigatório."))]
    pub zip_code: String,
    pub country: Option<String>,
    pub tax_id: Option<String>,
    pub business_license: Option<String>,
    pub dealer_license: Option<String>,
    pub operating_hours: Option<String>,
    pub is_active: Option<bool>,
    pub is_verified: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDealershipPayload {
    #[serde(default, deserialize_with = "non_null")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub legal_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub dealer_number: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub website: Option<Option<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub address_line_1: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub address_line_2: Option<Option<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub zip_code: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub tax_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub business_license: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub dealer_license: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub operating_hours: Option<Option<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "non_null")]
    pub is_verified: Option<bool>,
}

impl Validate for UpdateDealershipPayload {
    fn validate(&self) -> Result<(), validator::ValidationErrors> {
        PatchValidator::new()
            .not_blank("name", self.name.as_ref())
            .not_blank("dealer_number", self.dealer_number.as_ref())
            .not_blank("address_line_1", self.address_line_1.as_ref())
            .not_blank("city", self.city.as_ref())
            .exact_len("state", self.state.as_ref(), 2)
            .not_blank("zip_code", self.zip_code.as_ref())
            .email("email", present(&self.email))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_json() -> serde_json::Value {
        serde_json::json!({
            "name": "Auto Center",
            "dealerNumber": "DLR-1",
            "addressLine1": "Rua A, 10",
            "city": "Campinas",
            "state": "SP",
            "zipCode": "13000-000"
        })
    }

    #[test]
    fn create_payload_accepts_minimal_body() {
        let payload: CreateDealershipPayload = serde_json::from_value(create_json()).unwrap();
        assert!(payload.validate().is_ok());
        assert!(payload.country.is_none());
    }

    #[test]
    fn create_payload_requires_two_letter_state() {
        let mut body = create_json();
        body["state"] = "SAO".into();
        let payload: CreateDealershipPayload = serde_json::from_value(body).unwrap();
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("state"));
    }

    #[test]
    fn create_payload_rejects_missing_required_field() {
        let mut body = create_json();
        body.as_object_mut().unwrap().remove("dealerNumber");
        assert!(serde_json::from_value::<CreateDealershipPayload>(body).is_err());
    }

    #[test]
    fn update_payload_rejects_null_name() {
        let result = serde_json::from_str::<UpdateDealershipPayload>(r#"{"name": null}"#);
        assert!(result.is_err());
    }
}

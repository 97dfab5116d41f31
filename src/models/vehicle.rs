// src/models/vehicle.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::common::patch::{double_option, non_null, present, Numeric, PatchValidator};

// Qualquer transição entre estados é permitida
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "vehicle_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Available,
    Sold,
    Reserved,
    InTransit,
    Service,
    SoldPending,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i64,
    #[schema(example = "1HGCM82633A004352")]
    pub vin: String,
    pub stock_number: String,
    pub dealership_id: i64,
    #[schema(example = 2024)]
    pub year: i32,
    pub make: String,
    pub model: String,
    pub trim: Option<String>,
    pub body_style: Option<String>,
    pub color: Option<String>,
    pub interior_color: Option<String>,
    pub engine: Option<String>,
    pub transmission: Option<String>,
    pub fuel_type: Option<String>,
    pub drivetrain: Option<String>,
    pub mileage: Option<i32>,
    pub condition: Option<String>,
    pub cost_price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub msrp: Option<Decimal>,
    pub status: VehicleStatus,
    pub location: Option<String>,
    pub features: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filtros da listagem de veículos (`?dealershipId=1&status=available`).
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct VehicleListQuery {
    #[serde(alias = "offset")]
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub dealership_id: Option<i64>,
    pub status: Option<VehicleStatus>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehiclePayload {
    #[validate(length(equal = 17, message = "O VIN deve ter exatamente 17 caracteres."))]
    pub vin: String,
    #[validate(length(min = 1, max = 50, message = "O número de estoque é obrigatório."))]
    pub stock_number: String,
    pub dealership_id: i64,
    #[validate(range(min = 1900, max = 2100, message = "Ano inválido."))]
    pub year: i32,
    #[validate(length(min = 1, max = 100, message = "A marca é obrigatória."))]
    pub make: String,
    #[validate(length(min = 1, max = 100, message = "O modelo é obrigatório."))]
    pub model: String,
    pub trim: Option<String>,
    pub body_style: Option<String>,
    pub color: Option<String>,
    pub interior_color: Option<String>,
    pub engine: Option<String>,
    pub transmission: Option<String>,
    pub fuel_type: Option<String>,
    pub drivetrain: Option<String>,
    #[validate(range(min = 0, message = "A quilometragem não pode ser negativa."))]
    pub mileage: Option<i32>,
    pub condition: Option<String>,
    pub cost_price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub msrp: Option<Decimal>,
    pub status: Option<VehicleStatus>,
    pub location: Option<String>,
    pub features: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

impl CreateVehiclePayload {
    // Preços não podem ser negativos; o derive não cobre Decimal.
    pub fn validate_prices(&self) -> Result<(), validator::ValidationErrors> {
        PatchValidator::new()
            .amount("cost_price", self.cost_price.as_ref(), Numeric::MONEY)
            .amount("sale_price", self.sale_price.as_ref(), Numeric::MONEY)
            .amount("msrp", self.msrp.as_ref(), Numeric::MONEY)
            .finish()
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehiclePayload {
    #[serde(default, deserialize_with = "non_null")]
    pub vin: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub stock_number: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub dealership_id: Option<i64>,
    #[serde(default, deserialize_with = "non_null")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "non_null")]
    pub make: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub trim: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub body_style: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub color: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub interior_color: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub engine: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub transmission: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub fuel_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub drivetrain: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>, nullable)]
    pub mileage: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub condition: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>, nullable)]
    pub cost_price: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>, nullable)]
    pub sale_price: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>, nullable)]
    pub msrp: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "non_null")]
    pub status: Option<VehicleStatus>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub features: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub is_active: Option<bool>,
}

impl Validate for UpdateVehiclePayload {
    fn validate(&self) -> Result<(), validator::ValidationErrors> {
        PatchValidator::new()
            .exact_len("vin", self.vin.as_ref(), 17)
            .not_blank("stock_number", self.stock_number.as_ref())
            .range_i32("year", self.year, 1900, 2100)
            .not_blank("make", self.make.as_ref())
            .not_blank("model", self.model.as_ref())
            .range_i32("mileage", present(&self.mileage).copied(), 0, i32::MAX)
            .amount("cost_price", present(&self.cost_price), Numeric::MONEY)
            .amount("sale_price", present(&self.sale_price), Numeric::MONEY)
            .amount("msrp", present(&self.msrp), Numeric::MONEY)
            .finish()
    }
}

// ---
// Imagens do veículo
// ---

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleImage {
    pub id: i64,
    pub vehicle_id: i64,
    pub image_url: String,
    pub image_type: Option<String>,
    pub is_primary: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleImagePayload {
    #[validate(length(min = 1, max = 500, message = "A URL da imagem é obrigatória."))]
    pub image_url: String,
    pub image_type: Option<String>,
    pub is_primary: Option<bool>,
    pub sort_order: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vin_must_have_seventeen_characters() {
        let payload: CreateVehiclePayload = serde_json::from_value(serde_json::json!({
            "vin": "ABC",
            "stockNumber": "S1",
            "dealershipId": 1,
            "year": 2024,
            "make": "Honda",
            "model": "Civic"
        }))
        .unwrap();
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("vin"));
    }

    #[test]
    fn prices_accept_json_numbers() {
        let payload: CreateVehiclePayload = serde_json::from_value(serde_json::json!({
            "vin": "1HGCM82633A004352",
            "stockNumber": "S1",
            "dealershipId": 1,
            "year": 2024,
            "make": "Honda",
            "model": "Civic",
            "salePrice": 25990.5,
            "status": "in_transit"
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
        assert!(payload.validate_prices().is_ok());
        assert_eq!(payload.sale_price, Some(Decimal::new(259905, 1)));
        assert_eq!(payload.status, Some(VehicleStatus::InTransit));
    }

    #[test]
    fn update_rejects_negative_price() {
        let payload: UpdateVehiclePayload =
            serde_json::from_str(r#"{"msrp": -1, "trim": null}"#).unwrap();
        assert_eq!(payload.trim, Some(None));
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("msrp"));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result = serde_json::from_str::<UpdateVehiclePayload>(r#"{"status": "stolen"}"#);
        assert!(result.is_err());
    }
}

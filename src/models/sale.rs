// src/models/sale.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::patch::{double_option, non_null, present, Numeric, PatchValidator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "sale_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    #[default]
    Pending,
    Approved,
    Completed,
    Cancelled,
    Delivered,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    #[schema(example = "SALE-3F9A0C21B7")]
    pub sale_number: String,
    pub dealership_id: i64,
    pub customer_id: i64,
    pub sales_person_id: i64,
    pub vehicle_id: i64,
    pub sale_date: DateTime<Utc>,
    pub status: SaleStatus,
    pub vehicle_price: Decimal,
    pub trade_in_value: Option<Decimal>,
    pub down_payment: Option<Decimal>,
    pub finance_amount: Option<Decimal>,
    // Informado pelo cliente, nunca recalculado
    pub total_amount: Decimal,
    pub finance_company: Option<String>,
    pub interest_rate: Option<Decimal>,
    pub term_months: Option<i32>,
    pub monthly_payment: Option<Decimal>,
    #[schema(example = "retail")]
    pub sale_type: String,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalePayload {
    /// Gerado como `SALE-XXXXXXXXXX` quando omitido
    #[validate(length(min = 1, max = 50))]
    pub sale_number: Option<String>,
    pub dealership_id: i64,
    pub customer_id: i64,
    pub sales_person_id: i64,
    pub vehicle_id: i64,
    pub sale_date: Option<DateTime<Utc>>,
    pub status: Option<SaleStatus>,
    pub vehicle_price: Decimal,
    pub trade_in_value: Option<Decimal>,
    pub down_payment: Option<Decimal>,
    pub finance_amount: Option<Decimal>,
    pub total_amount: Decimal,
    pub finance_company: Option<String>,
    pub interest_rate: Option<Decimal>,
    #[validate(range(min = 1, max = 120, message = "Prazo inválido."))]
    pub term_months: Option<i32>,
    pub monthly_payment: Option<Decimal>,
    pub sale_type: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

impl CreateSalePayload {
    pub fn validate_amounts(&self) -> Result<(), validator::ValidationErrors> {
        PatchValidator::new()
            .amount("vehicle_price", Some(&self.vehicle_price), Numeric::MONEY)
            .amount("total_amount", Some(&self.total_amount), Numeric::MONEY)
            .amount("trade_in_value", self.trade_in_value.as_ref(), Numeric::MONEY)
            .amount("down_payment", self.down_payment.as_ref(), Numeric::MONEY)
            .amount("finance_amount", self.finance_amount.as_ref(), Numeric::MONEY)
            .amount("interest_rate", self.interest_rate.as_ref(), Numeric::RATE)
            .amount("monthly_payment", self.monthly_payment.as_ref(), Numeric::MONEY)
            .finish()
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSalePayload {
    #[serde(default, deserialize_with = "non_null")]
    pub sale_number: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub dealership_id: Option<i64>,
    #[serde(default, deserialize_with = "non_null")]
    pub customer_id: Option<i64>,
    #[serde(default, deserialize_with = "non_null")]
    pub sales_person_id: Option<i64>,
    #[serde(default, deserialize_with = "non_null")]
    pub vehicle_id: Option<i64>,
    #[serde(default, deserialize_with = "non_null")]
    pub sale_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "non_null")]
    pub status: Option<SaleStatus>,
    #[serde(default, deserialize_with = "non_null")]
    #[schema(value_type = Option<f64>)]
    pub vehicle_price: Option<Decimal>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>, nullable)]
    pub trade_in_value: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>, nullable)]
    pub down_payment: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>, nullable)]
    pub finance_amount: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "non_null")]
    #[schema(value_type = Option<f64>)]
    pub total_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub finance_company: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>, nullable)]
    pub interest_rate: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>, nullable)]
    pub term_months: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>, nullable)]
    pub monthly_payment: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "non_null")]
    pub sale_type: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub payment_method: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub notes: Option<Option<String>>,
}

impl Validate for UpdateSalePayload {
    fn validate(&self) -> Result<(), validator::ValidationErrors> {
        PatchValidator::new()
            .not_blank("sale_number", self.sale_number.as_ref())
            .amount("vehicle_price", self.vehicle_price.as_ref(), Numeric::MONEY)
            .amount("total_amount", self.total_amount.as_ref(), Numeric::MONEY)
            .amount("trade_in_value", present(&self.trade_in_value), Numeric::MONEY)
            .amount("down_payment", present(&self.down_payment), Numeric::MONEY)
            .amount("finance_amount", present(&self.finance_amount), Numeric::MONEY)
            .amount("interest_rate", present(&self.interest_rate), Numeric::RATE)
            .range_i32("term_months", present(&self.term_months).copied(), 1, 120)
            .amount("monthly_payment", present(&self.monthly_payment), Numeric::MONEY)
            .not_blank("sale_type", self.sale_type.as_ref())
            .finish()
    }
}

// ---
// Itens adicionais da venda (acessórios, garantia estendida...)
// ---

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: i64,
    pub sale_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub item_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleItemPayload {
    #[validate(length(min = 1, max = 255, message = "O nome do item é obrigatório."))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "A quantidade deve ser positiva."))]
    pub quantity: Option<i32>,
    pub unit_price: Decimal,
    /// Quando omitido, vale `quantity * unitPrice`
    pub total_price: Option<Decimal>,
    pub item_type: Option<String>,
}

impl CreateSaleItemPayload {
    pub fn quantity(&self) -> i32 {
        self.quantity.unwrap_or(1)
    }

    /// `None` quando `quantity * unitPrice` não cabe em um `Decimal`.
    pub fn total_price(&self) -> Option<Decimal> {
        match self.total_price {
            Some(total) => Some(total),
            None => self.unit_price.checked_mul(Decimal::from(self.quantity())),
        }
    }

    pub fn validate_amounts(&self) -> Result<(), validator::ValidationErrors> {
        let total = self.total_price();
        PatchValidator::new()
            .amount("unit_price", Some(&self.unit_price), Numeric::MONEY)
            .invalid_if("total_price", total.is_none(), "Valor total fora do limite permitido.")
            .amount("total_price", total.as_ref(), Numeric::MONEY)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale_json() -> serde_json::Value {
        serde_json::json!({
            "dealershipId": 1,
            "customerId": 2,
            "salesPersonId": 3,
            "vehicleId": 4,
            "vehiclePrice": 30000,
            "totalAmount": 31500.75
        })
    }

    #[test]
    fn sale_number_and_status_are_optional() {
        let payload: CreateSalePayload = serde_json::from_value(sale_json()).unwrap();
        assert!(payload.sale_number.is_none());
        assert!(payload.status.is_none());
        assert!(payload.validate().is_ok());
        assert!(payload.validate_amounts().is_ok());
    }

    #[test]
    fn negative_total_is_rejected() {
        let mut body = sale_json();
        body["totalAmount"] = serde_json::json!(-1);
        let payload: CreateSalePayload = serde_json::from_value(body).unwrap();
        let errors = payload.validate_amounts().unwrap_err();
        assert!(errors.field_errors().contains_key("total_amount"));
    }

    #[test]
    fn item_total_defaults_to_quantity_times_unit_price() {
        let item: CreateSaleItemPayload =
            serde_json::from_str(r#"{"name": "Tapetes", "quantity": 3, "unitPrice": 49.9}"#)
                .unwrap();
        assert_eq!(item.total_price(), Some(Decimal::new(1497, 1)));

        let single: CreateSaleItemPayload =
            serde_json::from_str(r#"{"name": "Garantia", "unitPrice": 900}"#).unwrap();
        assert_eq!(single.quantity(), 1);
        assert_eq!(single.total_price(), Some(Decimal::from(900)));
        assert!(single.validate_amounts().is_ok());
    }

    #[test]
    fn explicit_item_total_wins() {
        let item: CreateSaleItemPayload = serde_json::from_str(
            r#"{"name": "Kit", "quantity": 2, "unitPrice": 10, "totalPrice": 15}"#,
        )
        .unwrap();
        assert_eq!(item.total_price(), Some(Decimal::from(15)));
    }

    #[test]
    fn huge_item_total_is_a_validation_error() {
        let item: CreateSaleItemPayload = serde_json::from_str(
            r#"{"name": "x", "quantity": 100, "unitPrice": 5e27}"#,
        )
        .unwrap();
        assert!(item.validate().is_ok());
        assert_eq!(item.total_price(), None);
        let errors = item.validate_amounts().unwrap_err();
        assert!(errors.field_errors().contains_key("total_price"));
        assert!(errors.field_errors().contains_key("unit_price"));
    }

    #[test]
    fn item_total_must_fit_the_money_column() {
        let item: CreateSaleItemPayload = serde_json::from_str(
            r#"{"name": "Frota", "quantity": 20, "unitPrice": 900000000}"#,
        )
        .unwrap();
        let errors = item.validate_amounts().unwrap_err();
        assert!(errors.field_errors().contains_key("total_price"));
        assert!(!errors.field_errors().contains_key("unit_price"));
    }
}

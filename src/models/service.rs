// src/models/service.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::patch::{double_option, non_null, present, Numeric, PatchValidator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "appointment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "work_order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
    OnHold,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAppointment {
    pub id: i64,
    #[schema(example = "APT-0C21B73F9A")]
    pub appointment_number: String,
    pub dealership_id: i64,
    pub customer_id: i64,
    pub vehicle_id: i64,
    pub service_advisor_id: i64,
    pub appointment_date: DateTime<Utc>,
    /// Duração estimada em minutos
    pub estimated_duration: Option<i32>,
    pub status: AppointmentStatus,
    pub service_type: Option<String>,
    pub description: Option<String>,
    pub customer_concerns: Option<String>,
    pub estimated_cost: Option<Decimal>,
    #[schema(example = "normal")]
    pub priority: String,
    pub notes: Option<String>,
    pub reminder_sent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentPayload {
    #[validate(length(min = 1, max = 50))]
    pub appointment_number: Option<String>,
    pub dealership_id: i64,
    pub customer_id: i64,
    pub vehicle_id: i64,
    pub service_advisor_id: i64,
    pub appointment_date: DateTime<Utc>,
    #[validate(range(min = 1, message = "A duração deve ser positiva."))]
    pub estimated_duration: Option<i32>,
    pub status: Option<AppointmentStatus>,
    pub service_type: Option<String>,
    pub description: Option<String>,
    pub customer_concerns: Option<String>,
    pub estimated_cost: Option<Decimal>,
    #[validate(length(min = 1, max = 20))]
    pub priority: Option<String>,
    pub notes: Option<String>,
    pub reminder_sent: Option<bool>,
}

impl CreateAppointmentPayload {
    pub fn validate_amounts(&self) -> Result<(), validator::ValidationErrors> {
        PatchValidator::new()
            .amount("estimated_cost", self.estimated_cost.as_ref(), Numeric::MONEY)
            .finish()
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentPayload {
    #[serde(default, deserialize_with = "non_null")]
    pub appointment_number: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub dealership_id: Option<i64>,
    #[serde(default, deserialize_with = "non_null")]
    pub customer_id: Option<i64>,
    #[serde(default, deserialize_with = "non_null")]
    pub vehicle_id: Option<i64>,
    #[serde(default, deserialize_with = "non_null")]
    pub service_advisor_id: Option<i64>,
    #[serde(default, deserialize_with = "non_null")]
    pub appointment_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>, nullable)]
    pub estimated_duration: Option<Option<i32>>,
    #[serde(default, deserialize_with = "non_null")]
    pub status: Option<AppointmentStatus>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub service_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub customer_concerns: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>, nullable)]
    pub estimated_cost: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "non_null")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub reminder_sent: Option<bool>,
}

impl Validate for UpdateAppointmentPayload {
    fn validate(&self) -> Result<(), validator::ValidationErrors> {
        PatchValidator::new()
            .not_blank("appointment_number", self.appointment_number.as_ref())
            .range_i32("estimated_duration", present(&self.estimated_duration).copied(), 1, i32::MAX)
            .amount("estimated_cost", present(&self.estimated_cost), Numeric::MONEY)
            .not_blank("priority", self.priority.as_ref())
            .finish()
    }
}

// ---
// Ordens de serviço
// ---

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceWorkOrder {
    pub id: i64,
    #[schema(example = "WO-B73F9A0C21")]
    pub work_order_number: String,
    pub appointment_id: i64,
    pub technician_id: Option<i64>,
    pub status: WorkOrderStatus,
    pub estimated_hours: Option<Decimal>,
    pub actual_hours: Option<Decimal>,
    pub labor_rate: Option<Decimal>,
    pub labor_cost: Option<Decimal>,
    pub parts_cost: Option<Decimal>,
    pub total_cost: Option<Decimal>,
    pub work_description: Option<String>,
    pub work_performed: Option<String>,
    pub recommendations: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// O agendamento vem da rota (`/service-appointments/{id}/work-orders`)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkOrderPayload {
    #[validate(length(min = 1, max = 50))]
    pub work_order_number: Option<String>,
    pub technician_id: Option<i64>,
    pub status: Option<WorkOrderStatus>,
    pub estimated_hours: Option<Decimal>,
    pub actual_hours: Option<Decimal>,
    pub labor_rate: Option<Decimal>,
    pub labor_cost: Option<Decimal>,
    pub parts_cost: Option<Decimal>,
    pub total_cost: Option<Decimal>,
    pub work_description: Option<String>,
    pub work_performed: Option<String>,
    pub recommendations: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl CreateWorkOrderPayload {
    pub fn validate_amounts(&self) -> Result<(), validator::ValidationErrors> {
        PatchValidator::new()
            .amount("estimated_hours", self.estimated_hours.as_ref(), Numeric::HOURS)
            .amount("actual_hours", self.actual_hours.as_ref(), Numeric::HOURS)
            .amount("labor_rate", self.labor_rate.as_ref(), Numeric::MONEY)
            .amount("labor_cost", self.labor_cost.as_ref(), Numeric::MONEY)
            .amount("parts_cost", self.parts_cost.as_ref(), Numeric::MONEY)
            .amount("total_cost", self.total_cost.as_ref(), Numeric::MONEY)
            .finish()
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkOrderPayload {
    #[serde(default, deserialize_with = "non_null")]
    pub work_order_number: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>, nullable)]
    pub technician_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "non_null")]
    pub status: Option<WorkOrderStatus>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>, nullable)]
    pub estimated_hours: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>, nullable)]
    pub actual_hours: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>, nullable)]
    pub labor_rate: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>, nullable)]
    pub labor_cost: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>, nullable)]
    pub parts_cost: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>, nullable)]
    pub total_cost: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub work_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub work_performed: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub recommendations: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<DateTime<Utc>>, nullable)]
    pub started_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<DateTime<Utc>>, nullable)]
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

impl Validate for UpdateWorkOrderPayload {
    fn validate(&self) -> Result<(), validator::ValidationErrors> {
        PatchValidator::new()
            .not_blank("work_order_number", self.work_order_number.as_ref())
            .amount("estimated_hours", present(&self.estimated_hours), Numeric::HOURS)
            .amount("actual_hours", present(&self.actual_hours), Numeric::HOURS)
            .amount("labor_rate", present(&self.labor_rate), Numeric::MONEY)
            .amount("labor_cost", present(&self.labor_cost), Numeric::MONEY)
            .amount("parts_cost", present(&self.parts_cost), Numeric::MONEY)
            .amount("total_cost", present(&self.total_cost), Numeric::MONEY)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appointment_requires_date() {
        let result = serde_json::from_value::<CreateAppointmentPayload>(serde_json::json!({
            "dealershipId": 1,
            "customerId": 1,
            "vehicleId": 1,
            "serviceAdvisorId": 1
        }));
        assert!(result.is_err());
    }

    #[test]
    fn appointment_status_uses_snake_case() {
        let payload: UpdateAppointmentPayload =
            serde_json::from_str(r#"{"status": "no_show"}"#).unwrap();
        assert_eq!(payload.status, Some(AppointmentStatus::NoShow));
    }

    #[test]
    fn work_order_can_unassign_technician() {
        let payload: UpdateWorkOrderPayload =
            serde_json::from_str(r#"{"technicianId": null, "actualHours": 2.5}"#).unwrap();
        assert_eq!(payload.technician_id, Some(None));
        assert_eq!(payload.actual_hours, Some(Some(Decimal::new(25, 1))));
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn work_order_rejects_negative_hours() {
        let payload: CreateWorkOrderPayload =
            serde_json::from_str(r#"{"estimatedHours": -3}"#).unwrap();
        assert!(payload.validate_amounts().is_err());
    }
}

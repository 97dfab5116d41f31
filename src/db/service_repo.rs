// src/db/service_repo.rs
//
// Agendamentos da oficina e as ordens de serviço que pertencem a eles.

use sqlx::PgPool;

use crate::{
    common::{
        db_utils::{generate_number, map_write_error},
        error::AppError,
        pagination::Page,
    },
    db::crud::{self, Assignments, PatchSet, Table},
    models::service::{
        CreateAppointmentPayload, CreateWorkOrderPayload, ServiceAppointment, ServiceWorkOrder,
        UpdateAppointmentPayload, UpdateWorkOrderPayload,
    },
};

impl Table for ServiceAppointment {
    const TABLE: &'static str = "service_appointments";
    const NOT_FOUND: &'static str = "Agendamento não encontrado.";
}

impl Table for ServiceWorkOrder {
    const TABLE: &'static str = "service_work_orders";
    const NOT_FOUND: &'static str = "Ordem de serviço não encontrada.";
}

impl PatchSet for UpdateAppointmentPayload {
    fn assign<'qb, 'args: 'qb>(&self, set: &mut Assignments<'qb, 'args>) {
        set.set("appointment_number", self.appointment_number.as_ref())
            .set("dealership_id", self.dealership_id.as_ref())
            .set("customer_id", self.customer_id.as_ref())
            .set("vehicle_id", self.vehicle_id.as_ref())
            .set("service_advisor_id", self.service_advisor_id.as_ref())
            .set("appointment_date", self.appointment_date.as_ref())
            .set("estimated_duration", self.estimated_duration.as_ref())
            .set("status", self.status.as_ref())
            .set("service_type", self.service_type.as_ref())
            .set("description", self.description.as_ref())
            .set("customer_concerns", self.customer_concerns.as_ref())
            .set("estimated_cost", self.estimated_cost.as_ref())
            .set("priority", self.priority.as_ref())
            .set("notes", self.notes.as_ref())
            .set("reminder_sent", self.reminder_sent.as_ref());
    }
}

impl PatchSet for UpdateWorkOrderPayload {
    fn assign<'qb, 'args: 'qb>(&self, set: &mut Assignments<'qb, 'args>) {
        set.set("work_order_number", self.work_order_number.as_ref())
            .set("technician_id", self.technician_id.as_ref())
            .set("status", self.status.as_ref())
            .set("estimated_hours", self.estimated_hours.as_ref())
            .set("actual_hours", self.actual_hours.as_ref())
            .set("labor_rate", self.labor_rate.as_ref())
            .set("labor_cost", self.labor_cost.as_ref())
            .set("parts_cost", self.parts_cost.as_ref())
            .set("total_cost", self.total_cost.as_ref())
            .set("work_description", self.work_description.as_ref())
            .set("work_performed", self.work_performed.as_ref())
            .set("recommendations", self.recommendations.as_ref())
            .set("started_at", self.started_at.as_ref())
            .set("completed_at", self.completed_at.as_ref());
    }
}

#[derive(Clone)]
pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_appointments(
        &self,
        page: Page,
        dealership_id: Option<i64>,
    ) -> Result<Vec<ServiceAppointment>, AppError> {
        crud::fetch_page(&self.pool, page, dealership_id.map(|id| ("dealership_id", id))).await
    }

    pub async fn get_appointment(&self, id: i64) -> Result<ServiceAppointment, AppError> {
        crud::fetch_one(&self.pool, id).await
    }

    pub async fn create_appointment(
        &self,
        payload: &CreateAppointmentPayload,
    ) -> Result<ServiceAppointment, AppError> {
        let appointment_number = payload
            .appointment_number
            .clone()
            .unwrap_or_else(|| generate_number("APT"));

        let appointment = sqlx::query_as::<_, ServiceAppointment>(
            r#"
            INSERT INTO service_appointments (
                appointment_number, dealership_id, customer_id, vehicle_id,
                service_advisor_id, appointment_date, estimated_duration, status,
                service_type, description, customer_concerns, estimated_cost,
                priority, notes, reminder_sent
            )
            VALUES (
                $1, $2, $3, $4,
                $5, $6, $7, COALESCE($8, 'scheduled'::appointment_status),
                $9, $10, $11, $12,
                COALESCE($13, 'normal'), $14, COALESCE($15, FALSE)
            )
            RETURNING *
            "#,
        )
        .bind(&appointment_number)
        .bind(payload.dealership_id)
        .bind(payload.customer_id)
        .bind(payload.vehicle_id)
        .bind(payload.service_advisor_id)
        .bind(payload.appointment_date)
        .bind(payload.estimated_duration)
        .bind(payload.status)
        .bind(&payload.service_type)
        .bind(&payload.description)
        .bind(&payload.customer_concerns)
        .bind(payload.estimated_cost)
        .bind(&payload.priority)
        .bind(&payload.notes)
        .bind(payload.reminder_sent)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(appointment)
    }

    pub async fn update_appointment(
        &self,
        id: i64,
        payload: &UpdateAppointmentPayload,
    ) -> Result<ServiceAppointment, AppError> {
        crud::update(&self.pool, id, payload).await
    }

    // Ordens de serviço saem junto (ON DELETE CASCADE)
    pub async fn delete_appointment(&self, id: i64) -> Result<(), AppError> {
        crud::delete::<ServiceAppointment>(&self.pool, id, None).await
    }

    // ---
    // Ordens de serviço
    // ---

    pub async fn list_work_orders(&self, appointment_id: i64) -> Result<Vec<ServiceWorkOrder>, AppError> {
        crud::ensure_exists::<ServiceAppointment>(&self.pool, appointment_id).await?;

        let orders = sqlx::query_as::<_, ServiceWorkOrder>(
            "SELECT * FROM service_work_orders WHERE appointment_id = $1 ORDER BY id ASC",
        )
        .bind(appointment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    pub async fn create_work_order(
        &self,
        appointment_id: i64,
        payload: &CreateWorkOrderPayload,
    ) -> Result<ServiceWorkOrder, AppError> {
        crud::ensure_exists::<ServiceAppointment>(&self.pool, appointment_id).await?;

        let work_order_number = payload
            .work_order_number
            .clone()
            .unwrap_or_else(|| generate_number("WO"));

        let order = sqlx::query_as::<_, ServiceWorkOrder>(
            r#"
            INSERT INTO service_work_orders (
                work_order_number, appointment_id, technician_id, status,
                estimated_hours, actual_hours, labor_rate, labor_cost,
                parts_cost, total_cost, work_description, work_performed,
                recommendations, started_at, completed_at
            )
            VALUES (
                $1, $2, $3, COALESCE($4, 'pending'::work_order_status),
                $5, $6, $7, $8,
                $9, $10, $11, $12,
                $13, $14, $15
            )
            RETURNING *
            "#,
        )
        .bind(&work_order_number)
        .bind(appointment_id)
        .bind(payload.technician_id)
        .bind(payload.status)
        .bind(payload.estimated_hours)
        .bind(payload.actual_hours)
        .bind(payload.labor_rate)
        .bind(payload.labor_cost)
        .bind(payload.parts_cost)
        .bind(payload.total_cost)
        .bind(&payload.work_description)
        .bind(&payload.work_performed)
        .bind(&payload.recommendations)
        .bind(payload.started_at)
        .bind(payload.completed_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(order)
    }

    pub async fn get_work_order(&self, id: i64) -> Result<ServiceWorkOrder, AppError> {
        crud::fetch_one(&self.pool, id).await
    }

    pub async fn update_work_order(
        &self,
        id: i64,
        payload: &UpdateWorkOrderPayload,
    ) -> Result<ServiceWorkOrder, AppError> {
        crud::update(&self.pool, id, payload).await
    }

    pub async fn delete_work_order(&self, id: i64) -> Result<(), AppError> {
        crud::delete::<ServiceWorkOrder>(&self.pool, id, None).await
    }
}

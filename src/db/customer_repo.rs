// src/db/customer_repo.rs

use sqlx::PgPool;

use crate::{
    common::{db_utils::map_write_error, error::AppError, pagination::Page},
    db::crud::{self, Assignments, PatchSet, Table},
    models::customer::{
        CreateCustomerNotePayload, CreateCustomerPayload, Customer, CustomerNote,
        UpdateCustomerPayload,
    },
};

impl Table for Customer {
    const TABLE: &'static str = "customers";
    const NOT_FOUND: &'static str = "Cliente não encontrado.";
}

impl Table for CustomerNote {
    const TABLE: &'static str = "customer_notes";
    const NOT_FOUND: &'static str = "Nota não encontrada.";
}

impl PatchSet for UpdateCustomerPayload {
    fn assign<'qb, 'args: 'qb>(&self, set: &mut Assignments<'qb, 'args>) {
        set.set("dealership_id", self.dealership_id.as_ref())
            .set("first_name", self.first_name.as_ref())
            .set("last_name", self.last_name.as_ref())
            .set("email", self.email.as_ref())
            .set("phone", self.phone.as_ref())
            .set("date_of_birth", self.date_of_birth.as_ref())
            .set("address_line_1", self.address_line_1.as_ref())
            .set("address_line_2", self.address_line_2.as_ref())
            .set("city", self.city.as_ref())
            .set("state", self.state.as_ref())
            .set("zip_code", self.zip_code.as_ref())
            .set("country", self.country.as_ref())
            .set("customer_type", self.customer_type.as_ref())
            .set("source", self.source.as_ref())
            .set("preferred_contact_method", self.preferred_contact_method.as_ref())
            .set("is_active", self.is_active.as_ref())
            .set("is_verified", self.is_verified.as_ref());
    }
}

#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, page: Page, dealership_id: Option<i64>) -> Result<Vec<Customer>, AppError> {
        crud::fetch_page(&self.pool, page, dealership_id.map(|id| ("dealership_id", id))).await
    }

    pub async fn get(&self, id: i64) -> Result<Customer, AppError> {
        crud::fetch_one(&self.pool, id).await
    }

    pub async fn create(&self, payload: &CreateCustomerPayload) -> Result<Customer, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (
                dealership_id, first_name, last_name, email, phone, date_of_birth,
                address_line_1, address_line_2, city, state, zip_code, country,
                customer_type, source, preferred_contact_method, is_active, is_verified
            )
            VALUES (
                $1, $2, $3, $4, $5, $6,
                $7, $8, $9, $10, $11, COALESCE($12, 'USA'),
                $13, $14, $15, COALESCE($16, TRUE), COALESCE($17, FALSE)
            )
            RETURNING *
            "#,
        )
        .bind(payload.dealership_id)
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(payload.date_of_birth)
        .bind(&payload.address_line_1)
        .bind(&payload.address_line_2)
        .bind(&payload.city)
        .bind(&payload.state)
        .bind(&payload.zip_code)
        .bind(&payload.country)
        .bind(&payload.customer_type)
        .bind(&payload.source)
        .bind(&payload.preferred_contact_method)
        .bind(payload.is_active)
        .bind(payload.is_verified)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(customer)
    }

    pub async fn update(&self, id: i64, payload: &UpdateCustomerPayload) -> Result<Customer, AppError> {
        crud::update(&self.pool, id, payload).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        crud::delete::<Customer>(&self.pool, id, None).await
    }

    // ---
    // Notas
    // ---

    pub async fn list_notes(&self, customer_id: i64) -> Result<Vec<CustomerNote>, AppError> {
        crud::ensure_exists::<Customer>(&self.pool, customer_id).await?;

        let notes = sqlx::query_as::<_, CustomerNote>(
            "SELECT * FROM customer_notes WHERE customer_id = $1 ORDER BY id ASC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(notes)
    }

    pub async fn add_note(
        &self,
        customer_id: i64,
        author_id: i64,
        payload: &CreateCustomerNotePayload,
    ) -> Result<CustomerNote, AppError> {
        crud::ensure_exists::<Customer>(&self.pool, customer_id).await?;

        let note = sqlx::query_as::<_, CustomerNote>(
            r#"
            INSERT INTO customer_notes (customer_id, user_id, title, content, note_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(author_id)
        .bind(&payload.title)
        .bind(&payload.content)
        .bind(&payload.note_type)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(note)
    }

    pub async fn remove_note(&self, customer_id: i64, note_id: i64) -> Result<(), AppError> {
        crud::delete::<CustomerNote>(&self.pool, note_id, Some(("customer_id", customer_id))).await
    }
}

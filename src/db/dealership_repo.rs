// src/db/dealership_repo.rs

use sqlx::PgPool;

use crate::{
    common::{db_utils::map_write_error, error::AppError, pagination::Page},
    db::crud::{self, Assignments, PatchSet, Table},
    models::dealership::{CreateDealershipPayload, Dealership, UpdateDealershipPayload},
};

impl Table for Dealership {
    const TABLE: &'static str = "dealerships";
    const NOT_FOUND: &'static str = "Concessionária não encontrada.";
}

impl PatchSet for UpdateDealershipPayload {
    fn assign<'qb, 'args: 'qb>(&self, set: &mut Assignments<'qb, 'args>) {
        set.set("name", self.name.as_ref())
            .set("legal_name", self.legal_name.as_ref())
            .set("dealer_number", self.dealer_number.as_ref())
            .set("phone", self.phone.as_ref())
            .set("email", self.email.as_ref())
            .set("website", self.website.as_ref())
            .set("address_line_1", self.address_line_1.as_ref())
            .set("address_line_2", self.address_line_2.as_ref())
            .set("city", self.city.as_ref())
            .set("state", self.state.as_ref())
            .set("zip_code", self.zip_code.as_ref())
            .set("country", self.country.as_ref())
            .set("tax_id", self.tax_id.as_ref())
            .set("business_license", self.business_license.as_ref())
            .set("dealer_license", self.dealer_license.as_ref())
            .set("operating_hours", self.operating_hours.as_ref())
            .set("is_active", self.is_active.as_ref())
            .set("is_verified", self.is_verified.as_ref());
    }
}

#[derive(Clone)]
pub struct DealershipRepository {
    pool: PgPool,
}

impl DealershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, page: Page) -> Result<Vec<Dealership>, AppError> {
        crud::fetch_page(&self.pool, page, None).await
    }

    pub async fn get(&self, id: i64) -> Result<Dealership, AppError> {
        crud::fetch_one(&self.pool, id).await
    }

    pub async fn create(&self, payload: &CreateDealershipPayload) -> Result<Dealership, AppError> {
        let dealership = sqlx::query_as::<_, Dealership>(
            r#"
            INSERT INTO dealerships (
                name, legal_name, dealer_number, phone, email, website,
                address_line_1, address_line_2, city, state, zip_code, country,
                tax_id, business_license, dealer_license, operating_hours,
                is_active, is_verified
            )
            VALUES (
                $1, $2, $3, $4, $5, $6,
                $7, $8, $9, $10, $11, COALESCE($12, 'USA'),
                $13, $14, $15, $16,
                COALESCE($17, TRUE), COALESCE($18, FALSE)
            )
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.legal_name)
        .bind(&payload.dealer_number)
        .bind(&payload.phone)
        .bind(&payload.email)
        .bind(&payload.website)
        .bind(&payload.address_line_1)
        .bind(&payload.address_line_2)
        .bind(&payload.city)
        .bind(&payload.state)
        .bind(&payload.zip_code)
        .bind(&payload.country)
        .bind(&payload.tax_id)
        .bind(&payload.business_license)
        .bind(&payload.dealer_license)
        .bind(&payload.operating_hours)
        .bind(payload.is_active)
        .bind(payload.is_verified)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(dealership)
    }

    pub async fn update(
        &self,
        id: i64,
        payload: &UpdateDealershipPayload,
    ) -> Result<Dealership, AppError> {
        crud::update(&self.pool, id, payload).await
    }

    // Sem cascata: se ainda houver veículos, clientes, vendas ou usuários
    // apontando para ela, o banco recusa e devolvemos 409.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        crud::delete::<Dealership>(&self.pool, id, None).await
    }
}

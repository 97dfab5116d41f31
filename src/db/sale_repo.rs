// src/db/sale_repo.rs

use sqlx::PgPool;

use crate::{
    common::{
        db_utils::{generate_number, map_write_error},
        error::AppError,
        pagination::Page,
    },
    db::crud::{self, Assignments, PatchSet, Table},
    models::sale::{CreateSaleItemPayload, CreateSalePayload, Sale, SaleItem, UpdateSalePayload},
};

impl Table for Sale {
    const TABLE: &'static str = "sales";
    const NOT_FOUND: &'static str = "Venda não encontrada.";
}

impl Table for SaleItem {
    const TABLE: &'static str = "sale_items";
    const NOT_FOUND: &'static str = "Item da venda não encontrado.";
}

impl PatchSet for UpdateSalePayload {
    fn assign<'qb, 'args: 'qb>(&self, set: &mut Assignments<'qb, 'args>) {
        set.set("sale_number", self.sale_number.as_ref())
            .set("dealership_id", self.dealership_id.as_ref())
            .set("customer_id", self.customer_id.as_ref())
            .set("sales_person_id", self.sales_person_id.as_ref())
            .set("vehicle_id", self.vehicle_id.as_ref())
            .set("sale_date", self.sale_date.as_ref())
            .set("status", self.status.as_ref())
            .set("vehicle_price", self.vehicle_price.as_ref())
            .set("trade_in_value", self.trade_in_value.as_ref())
            .set("down_payment", self.down_payment.as_ref())
            .set("finance_amount", self.finance_amount.as_ref())
            .set("total_amount", self.total_amount.as_ref())
            .set("finance_company", self.finance_company.as_ref())
            .set("interest_rate", self.interest_rate.as_ref())
            .set("term_months", self.term_months.as_ref())
            .set("monthly_payment", self.monthly_payment.as_ref())
            .set("sale_type", self.sale_type.as_ref())
            .set("payment_method", self.payment_method.as_ref())
            .set("notes", self.notes.as_ref());
    }
}

#[derive(Clone)]
pub struct SaleRepository {
    pool: PgPool,
}

impl SaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, page: Page, dealership_id: Option<i64>) -> Result<Vec<Sale>, AppError> {
        crud::fetch_page(&self.pool, page, dealership_id.map(|id| ("dealership_id", id))).await
    }

    pub async fn get(&self, id: i64) -> Result<Sale, AppError> {
        crud::fetch_one(&self.pool, id).await
    }

    pub async fn create(&self, payload: &CreateSalePayload) -> Result<Sale, AppError> {
        let sale_number = payload
            .sale_number
            .clone()
            .unwrap_or_else(|| generate_number("SALE"));

        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (
                sale_number, dealership_id, customer_id, sales_person_id, vehicle_id,
                sale_date, status, vehicle_price, trade_in_value, down_payment,
                finance_amount, total_amount, finance_company, interest_rate,
                term_months, monthly_payment, sale_type, payment_method, notes
            )
            VALUES (
                $1, $2, $3, $4, $5,
                COALESCE($6, NOW()), COALESCE($7, 'pending'::sale_status), $8, $9, $10,
                $11, $12, $13, $14,
                $15, $16, COALESCE($17, 'retail'), $18, $19
            )
            RETURNING *
            "#,
        )
        .bind(&sale_number)
        .bind(payload.dealership_id)
        .bind(payload.customer_id)
        .bind(payload.sales_person_id)
        .bind(payload.vehicle_id)
        .bind(payload.sale_date)
        .bind(payload.status)
        .bind(payload.vehicle_price)
        .bind(payload.trade_in_value)
        .bind(payload.down_payment)
        .bind(payload.finance_amount)
        .bind(payload.total_amount)
        .bind(&payload.finance_company)
        .bind(payload.interest_rate)
        .bind(payload.term_months)
        .bind(payload.monthly_payment)
        .bind(&payload.sale_type)
        .bind(&payload.payment_method)
        .bind(&payload.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(sale)
    }

    pub async fn update(&self, id: i64, payload: &UpdateSalePayload) -> Result<Sale, AppError> {
        crud::update(&self.pool, id, payload).await
    }

    // Itens saem junto (ON DELETE CASCADE)
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        crud::delete::<Sale>(&self.pool, id, None).await
    }

    // ---
    // Itens
    // ---

    pub async fn list_items(&self, sale_id: i64) -> Result<Vec<SaleItem>, AppError> {
        crud::ensure_exists::<Sale>(&self.pool, sale_id).await?;

        let items = sqlx::query_as::<_, SaleItem>(
            "SELECT * FROM sale_items WHERE sale_id = $1 ORDER BY id ASC",
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn add_item(
        &self,
        sale_id: i64,
        payload: &CreateSaleItemPayload,
    ) -> Result<SaleItem, AppError> {
        crud::ensure_exists::<Sale>(&self.pool, sale_id).await?;
        let total_price = payload.total_price().ok_or_else(|| {
            AppError::InvalidInput("O valor total do item está fora do limite permitido.".to_string())
        })?;

        let item = sqlx::query_as::<_, SaleItem>(
            r#"
            INSERT INTO sale_items (sale_id, name, description, quantity, unit_price, total_price, item_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(sale_id)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.quantity())
        .bind(payload.unit_price)
        .bind(total_price)
        .bind(&payload.item_type)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(item)
    }

    pub async fn remove_item(&self, sale_id: i64, item_id: i64) -> Result<(), AppError> {
        crud::delete::<SaleItem>(&self.pool, item_id, Some(("sale_id", sale_id))).await
    }
}

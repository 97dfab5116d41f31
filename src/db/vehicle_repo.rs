// src/db/vehicle_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    common::{db_utils::map_write_error, error::AppError, pagination::Page},
    db::crud::{self, Assignments, PatchSet, Table},
    models::vehicle::{
        CreateVehicleImagePayload, CreateVehiclePayload, UpdateVehiclePayload, Vehicle,
        VehicleImage, VehicleStatus,
    },
};

impl Table for Vehicle {
    const TABLE: &'static str = "vehicles";
    const NOT_FOUND: &'static str = "Veículo não encontrado.";
}

impl Table for VehicleImage {
    const TABLE: &'static str = "vehicle_images";
    const NOT_FOUND: &'static str = "Imagem não encontrada.";
}

impl PatchSet for UpdateVehiclePayload {
    fn assign<'qb, 'args: 'qb>(&self, set: &mut Assignments<'qb, 'args>) {
        set.set("vin", self.vin.as_ref())
            .set("stock_number", self.stock_number.as_ref())
            .set("dealership_id", self.dealership_id.as_ref())
            .set("year", self.year.as_ref())
            .set("make", self.make.as_ref())
            .set("model", self.model.as_ref())
            .set("trim", self.trim.as_ref())
            .set("body_style", self.body_style.as_ref())
            .set("color", self.color.as_ref())
            .set("interior_color", self.interior_color.as_ref())
            .set("engine", self.engine.as_ref())
            .set("transmission", self.transmission.as_ref())
            .set("fuel_type", self.fuel_type.as_ref())
            .set("drivetrain", self.drivetrain.as_ref())
            .set("mileage", self.mileage.as_ref())
            .set("condition", self.condition.as_ref())
            .set("cost_price", self.cost_price.as_ref())
            .set("sale_price", self.sale_price.as_ref())
            .set("msrp", self.msrp.as_ref())
            .set("status", self.status.as_ref())
            .set("location", self.location.as_ref())
            .set("features", self.features.as_ref())
            .set("description", self.description.as_ref())
            .set("notes", self.notes.as_ref())
            .set("is_active", self.is_active.as_ref());
    }
}

#[derive(Clone)]
pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        page: Page,
        dealership_id: Option<i64>,
        status: Option<VehicleStatus>,
    ) -> Result<Vec<Vehicle>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM vehicles WHERE TRUE");
        if let Some(dealership_id) = dealership_id {
            qb.push(" AND dealership_id = ").push_bind(dealership_id);
        }
        if let Some(status) = status {
            qb.push(" AND status = ").push_bind(status);
        }
        crud::push_window(&mut qb, page);

        let vehicles = qb.build_query_as::<Vehicle>().fetch_all(&self.pool).await?;
        Ok(vehicles)
    }

    pub async fn get(&self, id: i64) -> Result<Vehicle, AppError> {
        crud::fetch_one(&self.pool, id).await
    }

    pub async fn create(&self, payload: &CreateVehiclePayload) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                vin, stock_number, dealership_id, year, make, model, trim,
                body_style, color, interior_color, engine, transmission,
                fuel_type, drivetrain, mileage, condition,
                cost_price, sale_price, msrp, status,
                location, features, description, notes, is_active
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7,
                $8, $9, $10, $11, $12,
                $13, $14, $15, $16,
                $17, $18, $19, COALESCE($20, 'available'::vehicle_status),
                $21, $22, $23, $24, COALESCE($25, TRUE)
            )
            RETURNING *
            "#,
        )
        .bind(&payload.vin)
        .bind(&payload.stock_number)
        .bind(payload.dealership_id)
        .bind(payload.year)
        .bind(&payload.make)
        .bind(&payload.model)
        .bind(&payload.trim)
        .bind(&payload.body_style)
        .bind(&payload.color)
        .bind(&payload.interior_color)
        .bind(&payload.engine)
        .bind(&payload.transmission)
        .bind(&payload.fuel_type)
        .bind(&payload.drivetrain)
        .bind(payload.mileage)
        .bind(&payload.condition)
        .bind(payload.cost_price)
        .bind(payload.sale_price)
        .bind(payload.msrp)
        .bind(payload.status)
        .bind(&payload.location)
        .bind(&payload.features)
        .bind(&payload.description)
        .bind(&payload.notes)
        .bind(payload.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(vehicle)
    }

    pub async fn update(&self, id: i64, payload: &UpdateVehiclePayload) -> Result<Vehicle, AppError> {
        crud::update(&self.pool, id, payload).await
    }

    // Imagens saem junto (ON DELETE CASCADE)
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        crud::delete::<Vehicle>(&self.pool, id, None).await
    }

    // ---
    // Imagens
    // ---

    pub async fn list_images(&self, vehicle_id: i64) -> Result<Vec<VehicleImage>, AppError> {
        crud::ensure_exists::<Vehicle>(&self.pool, vehicle_id).await?;

        let images = sqlx::query_as::<_, VehicleImage>(
            r#"
            SELECT * FROM vehicle_images
            WHERE vehicle_id = $1
            ORDER BY sort_order ASC, id ASC
            "#,
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(images)
    }

    pub async fn add_image(
        &self,
        vehicle_id: i64,
        payload: &CreateVehicleImagePayload,
    ) -> Result<VehicleImage, AppError> {
        crud::ensure_exists::<Vehicle>(&self.pool, vehicle_id).await?;

        let image = sqlx::query_as::<_, VehicleImage>(
            r#"
            INSERT INTO vehicle_images (vehicle_id, image_url, image_type, is_primary, sort_order)
            VALUES ($1, $2, $3, COALESCE($4, FALSE), COALESCE($5, 0))
            RETURNING *
            "#,
        )
        .bind(vehicle_id)
        .bind(&payload.image_url)
        .bind(&payload.image_type)
        .bind(payload.is_primary)
        .bind(payload.sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(image)
    }

    pub async fn remove_image(&self, vehicle_id: i64, image_id: i64) -> Result<(), AppError> {
        crud::delete::<VehicleImage>(&self.pool, image_id, Some(("vehicle_id", vehicle_id))).await
    }
}

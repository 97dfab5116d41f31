// src/db/user_repo.rs

use sqlx::PgPool;

use crate::{
    common::{db_utils::map_write_error, error::AppError, pagination::Page},
    db::crud::{self, Assignments, PatchSet, Table},
    models::auth::{User, UserChanges, UserRole},
};

impl Table for User {
    const TABLE: &'static str = "users";
    const NOT_FOUND: &'static str = "Usuário não encontrado.";
}

/// Dados já prontos para o INSERT (senha em hash).
#[derive(Debug)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub role: UserRole,
    pub phone: Option<&'a str>,
    pub avatar_url: Option<&'a str>,
    pub dealership_id: Option<i64>,
    pub is_active: bool,
    pub is_verified: bool,
}

impl PatchSet for UserChanges {
    fn assign<'qb, 'args: 'qb>(&self, set: &mut Assignments<'qb, 'args>) {
        set.set("email", self.email.as_ref())
            .set("password_hash", self.password_hash.as_ref())
            .set("first_name", self.first_name.as_ref())
            .set("last_name", self.last_name.as_ref())
            .set("role", self.role.as_ref())
            .set("phone", self.phone.as_ref())
            .set("avatar_url", self.avatar_url.as_ref())
            .set("dealership_id", self.dealership_id.as_ref())
            .set("is_active", self.is_active.as_ref())
            .set("is_verified", self.is_verified.as_ref());
    }
}

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca exata (sensível a maiúsculas/minúsculas)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    pub async fn get(&self, id: i64) -> Result<User, AppError> {
        crud::fetch_one(&self.pool, id).await
    }

    pub async fn list(&self, page: Page, dealership_id: Option<i64>) -> Result<Vec<User>, AppError> {
        crud::fetch_page(&self.pool, page, dealership_id.map(|id| ("dealership_id", id))).await
    }

    // E-mail duplicado vira `Conflict` via map_write_error
    pub async fn create(&self, new_user: NewUser<'_>) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                email, password_hash, first_name, last_name, role,
                phone, avatar_url, dealership_id, is_active, is_verified
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(new_user.email)
        .bind(new_user.password_hash)
        .bind(new_user.first_name)
        .bind(new_user.last_name)
        .bind(new_user.role)
        .bind(new_user.phone)
        .bind(new_user.avatar_url)
        .bind(new_user.dealership_id)
        .bind(new_user.is_active)
        .bind(new_user.is_verified)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(user)
    }

    pub async fn update(&self, id: i64, changes: &UserChanges) -> Result<User, AppError> {
        crud::update(&self.pool, id, changes).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        crud::delete::<User>(&self.pool, id, None).await
    }

    pub async fn touch_last_login(&self, id: i64) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET last_login = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound(User::NOT_FOUND))
    }
}

// src/services/user_service.rs
//
// CRUD administrativo de usuários. A única regra extra sobre o repositório:
// senha em texto puro nunca chega ao banco.

use crate::{
    common::{error::AppError, pagination::Page},
    db::{user_repo::NewUser, UserRepository},
    models::auth::{CreateUserPayload, UpdateUserPayload, User, UserChanges},
    services::password::hash_password,
};

#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(user_repo: UserRepository, bcrypt_cost: u32) -> Self {
        Self {
            user_repo,
            bcrypt_cost,
        }
    }

    pub async fn list(&self, page: Page, dealership_id: Option<i64>) -> Result<Vec<User>, AppError> {
        self.user_repo.list(page, dealership_id).await
    }

    pub async fn get(&self, id: i64) -> Result<User, AppError> {
        self.user_repo.get(id).await
    }

    pub async fn create(&self, payload: &CreateUserPayload) -> Result<User, AppError> {
        let hashed_password = hash_password(&payload.password, self.bcrypt_cost).await?;

        self.user_repo
            .create(NewUser {
                email: &payload.email,
                password_hash: &hashed_password,
                first_name: &payload.first_name,
                last_name: &payload.last_name,
                role: payload.role.unwrap_or_default(),
                phone: payload.phone.as_deref(),
                avatar_url: payload.avatar_url.as_deref(),
                dealership_id: payload.dealership_id,
                is_active: payload.is_active.unwrap_or(true),
                is_verified: payload.is_verified.unwrap_or(false),
            })
            .await
    }

    pub async fn update(&self, id: i64, payload: UpdateUserPayload) -> Result<User, AppError> {
        let password_hash = match payload.password.as_deref() {
            Some(password) => Some(hash_password(password, self.bcrypt_cost).await?),
            None => None,
        };

        let changes = UserChanges {
            email: payload.email,
            password_hash,
            first_name: payload.first_name,
            last_name: payload.last_name,
            role: payload.role,
            phone: payload.phone,
            avatar_url: payload.avatar_url,
            dealership_id: payload.dealership_id,
            is_active: payload.is_active,
            is_verified: payload.is_verified,
        };

        self.user_repo.update(id, &changes).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.user_repo.delete(id).await
    }
}

// src/services/auth.rs

use crate::{
    common::error::AppError,
    db::{user_repo::NewUser, UserRepository},
    models::auth::{AuthResponse, RegisterUserPayload, User, UserRole},
    services::{
        password::{hash_password, verify_password},
        token::{TokenKind, TokenService},
    },
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    tokens: TokenService,
    bcrypt_cost: u32,
    // Com a flag desligada, qualquer token válido serve em qualquer lugar
    enforce_token_kind: bool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        tokens: TokenService,
        bcrypt_cost: u32,
        enforce_token_kind: bool,
    ) -> Self {
        Self {
            user_repo,
            tokens,
            bcrypt_cost,
            enforce_token_kind,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    // Autocadastro: a conta sempre nasce com o papel `viewer`
    pub async fn register(&self, payload: &RegisterUserPayload) -> Result<User, AppError> {
        let hashed_password = hash_password(&payload.password, self.bcrypt_cost).await?;

        let user = self
            .user_repo
            .create(NewUser {
                email: &payload.email,
                password_hash: &hashed_password,
                first_name: &payload.first_name,
                last_name: &payload.last_name,
                role: UserRole::Viewer,
                phone: payload.phone.as_deref(),
                avatar_url: None,
                dealership_id: payload.dealership_id,
                is_active: true,
                is_verified: false,
            })
            .await?;

        tracing::info!("👤 Novo usuário registrado: id={}", user.id);
        Ok(user)
    }

    /// E-mail desconhecido e senha errada dão o mesmo erro.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash).await? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = self.authenticate(email, password).await?;

        if !user.is_active {
            return Err(AppError::InactiveAccount);
        }

        let user = self.user_repo.touch_last_login(user.id).await?;
        tracing::info!("🔑 Login efetuado: id={}", user.id);

        self.token_pair(user)
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthResponse, AppError> {
        let verified = self
            .tokens
            .verify(refresh_token)
            .ok_or(AppError::Unauthenticated)?;

        if self.enforce_token_kind && verified.kind != TokenKind::Refresh {
            return Err(AppError::Unauthenticated);
        }

        let user = self
            .user_repo
            .find_by_id(verified.user_id)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        if !user.is_active {
            return Err(AppError::Unauthenticated);
        }

        self.token_pair(user)
    }

    /// Resolve o usuário do token a cada requisição (sem cache).
    pub async fn resolve_principal(&self, token: Option<&str>) -> Result<User, AppError> {
        let token = token.ok_or(AppError::Unauthenticated)?;
        let verified = self.tokens.verify(token).ok_or(AppError::Unauthenticated)?;

        if self.enforce_token_kind && verified.kind != TokenKind::Access {
            return Err(AppError::Unauthenticated);
        }

        let user = self
            .user_repo
            .find_by_id(verified.user_id)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        if !user.is_active {
            return Err(AppError::InactiveAccount);
        }

        Ok(user)
    }

    fn token_pair(&self, user: User) -> Result<AuthResponse, AppError> {
        Ok(AuthResponse {
            access_token: self.tokens.issue_access_token(user.id, None)?,
            refresh_token: self.tokens.issue_refresh_token(user.id, None)?,
            token_type: "bearer".to_string(),
            user,
        })
    }
}

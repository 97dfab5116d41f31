// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        CustomerRepository, DealershipRepository, SaleRepository, ServiceRepository,
        UserRepository, VehicleRepository,
    },
    services::{auth::AuthService, token::TokenService, user_service::UserService},
};

/// Configurações do processo, lidas uma única vez na inicialização e
/// injetadas em quem precisa (nada de objeto global).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub access_token_ttl: chrono::Duration,
    pub refresh_token_ttl: chrono::Duration,
    /// Quando ligado, refresh token não serve como access token (e vice-versa).
    pub enforce_token_kind: bool,
    pub bcrypt_cost: u32,
    pub default_page_size: i64,
    pub max_page_size: i64,
    pub db_max_connections: u32,
    pub bind_addr: String,
}

impl Config {
    /// Valores padrão para tudo que não é obrigatório.
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            jwt_secret: jwt_secret.into(),
            access_token_ttl: chrono::Duration::minutes(30),
            refresh_token_ttl: chrono::Duration::days(7),
            enforce_token_kind: false,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            default_page_size: 20,
            max_page_size: 100,
            db_max_connections: 5,
            bind_addr: "0.0.0.0:3000".to_string(),
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        if jwt_secret.is_empty() {
            anyhow::bail!("JWT_SECRET não pode ser vazio");
        }

        let mut config = Self::new(database_url, jwt_secret);

        if let Some(minutes) = parse_var::<i64>(&lookup, "ACCESS_TOKEN_EXPIRE_MINUTES")? {
            config.access_token_ttl =
                positive_ttl("ACCESS_TOKEN_EXPIRE_MINUTES", minutes, chrono::Duration::try_minutes)?;
        }
        if let Some(days) = parse_var::<i64>(&lookup, "REFRESH_TOKEN_EXPIRE_DAYS")? {
            config.refresh_token_ttl =
                positive_ttl("REFRESH_TOKEN_EXPIRE_DAYS", days, chrono::Duration::try_days)?;
        }
        if let Some(flag) = parse_var::<bool>(&lookup, "JWT_ENFORCE_TOKEN_KIND")? {
            config.enforce_token_kind = flag;
        }
        if let Some(cost) = parse_var::<u32>(&lookup, "BCRYPT_COST")? {
            config.bcrypt_cost = cost;
        }
        if let Some(size) = parse_var::<i64>(&lookup, "DEFAULT_PAGE_SIZE")? {
            config.default_page_size = size;
        }
        if let Some(size) = parse_var::<i64>(&lookup, "MAX_PAGE_SIZE")? {
            config.max_page_size = size;
        }
        if let Some(max) = parse_var::<u32>(&lookup, "DATABASE_MAX_CONNECTIONS")? {
            config.db_max_connections = max;
        }
        if let Some(addr) = lookup("BIND_ADDR") {
            config.bind_addr = addr;
        }

        Ok(config)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("{} tem um valor inválido: {:?}", key, raw))
        })
        .transpose()
}

fn positive_ttl(
    key: &str,
    value: i64,
    to_duration: fn(i64) -> Option<chrono::Duration>,
) -> anyhow::Result<chrono::Duration> {
    if value <= 0 {
        anyhow::bail!("{} deve ser maior que zero (recebido {})", key, value);
    }
    to_duration(value).with_context(|| format!("{} fora do intervalo suportado: {}", key, value))
}

// ---
// Estado compartilhado pelas rotas
// ---

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Arc<Config>,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub dealership_repo: DealershipRepository,
    pub vehicle_repo: VehicleRepository,
    pub customer_repo: CustomerRepository,
    pub sale_repo: SaleRepository,
    pub service_repo: ServiceRepository,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::with_pool(config, db_pool))
    }

    /// Monta o gráfico de dependências sobre uma pool já criada.
    pub fn with_pool(config: Config, db_pool: PgPool) -> Self {
        let config = Arc::new(config);

        let user_repo = UserRepository::new(db_pool.clone());
        let token_service = TokenService::new(
            &config.jwt_secret,
            config.access_token_ttl,
            config.refresh_token_ttl,
        );
        let auth_service = AuthService::new(
            user_repo.clone(),
            token_service,
            config.bcrypt_cost,
            config.enforce_token_kind,
        );
        let user_service = UserService::new(user_repo, config.bcrypt_cost);

        Self {
            dealership_repo: DealershipRepository::new(db_pool.clone()),
            vehicle_repo: VehicleRepository::new(db_pool.clone()),
            customer_repo: CustomerRepository::new(db_pool.clone()),
            sale_repo: SaleRepository::new(db_pool.clone()),
            service_repo: ServiceRepository::new(db_pool.clone()),
            db_pool,
            config,
            auth_service,
            user_service,
        }
    }
}

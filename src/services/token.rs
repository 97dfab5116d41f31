// src/services/token.rs

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::{common::error::AppError, models::auth::Claims};

const REFRESH_TYPE: &str = "refresh";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Resultado de um token aceito.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedToken {
    pub user_id: i64,
    pub kind: TokenKind,
}

// Emite e confere JWTs HS256 com o segredo da configuração
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    /// `ttl` ausente usa o padrão configurado.
    pub fn issue_access_token(&self, user_id: i64, ttl: Option<Duration>) -> Result<String, AppError> {
        self.issue_at(
            user_id,
            TokenKind::Access,
            Utc::now().timestamp(),
            ttl.unwrap_or(self.access_ttl),
        )
    }

    pub fn issue_refresh_token(&self, user_id: i64, ttl: Option<Duration>) -> Result<String, AppError> {
        self.issue_at(
            user_id,
            TokenKind::Refresh,
            Utc::now().timestamp(),
            ttl.unwrap_or(self.refresh_ttl),
        )
    }

    fn issue_at(
        &self,
        user_id: i64,
        kind: TokenKind,
        issued_at: i64,
        ttl: Duration,
    ) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id.to_string(),
            exp: issued_at + ttl.num_seconds(),
            iat: issued_at,
            token_type: match kind {
                TokenKind::Access => None,
                TokenKind::Refresh => Some(REFRESH_TYPE.to_string()),
            },
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// `None` para qualquer falha: assinatura, formato, subject não numérico ou expirado.
    pub fn verify(&self, token: &str) -> Option<VerifiedToken> {
        self.verify_at(token, Utc::now().timestamp())
    }

    pub fn verify_at(&self, token: &str, now: i64) -> Option<VerifiedToken> {
        // A expiração é conferida abaixo, sem a tolerância padrão da biblioteca
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .ok()?
            .claims;

        if now >= claims.exp {
            return None;
        }

        let user_id = claims.sub.parse::<i64>().ok()?;
        let kind = match claims.token_type.as_deref() {
            Some(REFRESH_TYPE) => TokenKind::Refresh,
            _ => TokenKind::Access,
        };

        Some(VerifiedToken { user_id, kind })
    }
}

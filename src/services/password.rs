// src/services/password.rs
//
// bcrypt é caro de propósito: roda no pool de threads bloqueantes para não
// travar o executor do tokio.

use crate::common::error::AppError;

pub async fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    let password_clone = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(&password_clone, cost))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

/// `false` para senha errada e também para hash corrompido no banco.
pub async fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let password_clone = password.to_owned();
    let password_hash_clone = password_hash.to_owned();

    let result = tokio::task::spawn_blocking(move || {
        bcrypt::verify(&password_clone, &password_hash_clone)
    })
    .await
    .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))?;

    match result {
        Ok(valid) => Ok(valid),
        Err(e) => {
            tracing::warn!("⚠️ Hash de senha ilegível no banco: {}", e);
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Custo mínimo do bcrypt para os testes não demorarem
    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn hash_then_verify() {
        let digest = hash_password("segredo123", TEST_COST).await.unwrap();
        assert_ne!(digest, "segredo123");
        assert!(verify_password("segredo123", &digest).await.unwrap());
        assert!(!verify_password("outra-senha", &digest).await.unwrap());
    }

    #[tokio::test]
    async fn same_password_yields_different_digests() {
        let a = hash_password("segredo123", TEST_COST).await.unwrap();
        let b = hash_password("segredo123", TEST_COST).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn malformed_digest_is_just_a_mismatch() {
        assert!(!verify_password("x", "isto-nao-e-bcrypt").await.unwrap());
    }
}

// src/common/pagination.rs

use serde::Deserialize;
use utoipa::IntoParams;

use crate::{common::error::AppError, config::Config};

/// Parâmetros de listagem vindos da query string (`?skip=0&limit=20`).
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Quantos registros pular (>= 0)
    #[serde(alias = "offset")]
    pub skip: Option<i64>,
    /// Tamanho da página; limitado ao máximo configurado
    pub limit: Option<i64>,
    /// Filtra pela concessionária dona do registro
    pub dealership_id: Option<i64>,
}

/// Janela já validada, pronta para OFFSET/LIMIT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl ListQuery {
    pub fn page(&self, config: &Config) -> Result<Page, AppError> {
        Page::new(self.skip, self.limit, config)
    }
}

impl Page {
    pub fn new(skip: Option<i64>, limit: Option<i64>, config: &Config) -> Result<Self, AppError> {
        let offset = skip.unwrap_or(0);
        if offset < 0 {
            return Err(AppError::InvalidInput(
                "O parâmetro 'skip' não pode ser negativo.".to_string(),
            ));
        }

        let max = config.max_page_size.max(1);
        let limit = limit
            .unwrap_or(config.default_page_size)
            .clamp(1, max);

        Ok(Self { offset, limit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            default_page_size: 20,
            max_page_size: 100,
            ..Config::new("postgres://localhost/dealer_test", "segredo-de-teste")
        }
    }

    fn query(skip: Option<i64>, limit: Option<i64>) -> ListQuery {
        ListQuery { skip, limit, dealership_id: None }
    }

    #[test]
    fn defaults_when_absent() {
        let page = query(None, None).page(&config()).unwrap();
        assert_eq!(page, Page { offset: 0, limit: 20 });
    }

    #[test]
    fn clamps_limit_to_configured_maximum() {
        let page = query(Some(40), Some(5_000)).page(&config()).unwrap();
        assert_eq!(page, Page { offset: 40, limit: 100 });
    }

    #[test]
    fn non_positive_limit_becomes_one() {
        let page = query(None, Some(0)).page(&config()).unwrap();
        assert_eq!(page.limit, 1);
    }

    #[test]
    fn rejects_negative_offset() {
        let err = query(Some(-1), None).page(&config()).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}

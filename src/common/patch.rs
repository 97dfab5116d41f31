// src/common/patch.rs
//
// Semântica de "patch": só os campos presentes no JSON são alterados.
//
//   campo ausente          -> None          (não mexe)
//   campo com valor        -> Some(Some(v)) (grava v)
//   campo com null         -> Some(None)    (grava NULL)
//
// Colunas NOT NULL usam `Option<T>` com `non_null`, que recusa o null explícito
// em vez de tratá-lo como ausente.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use validator::{ValidationError, ValidationErrors};

/// Para colunas anuláveis: distingue "não enviado" de "enviado como null".
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Para colunas NOT NULL: o campo pode faltar, mas não pode vir null.
pub fn non_null<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// ---
// Validação manual dos payloads de atualização
// ---

/// Acumula erros por campo no mesmo formato do `validator::Validate` derivado.
#[derive(Default)]
pub struct PatchValidator {
    errors: ValidationErrors,
}

impl PatchValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn not_blank(&mut self, field: &'static str, value: Option<&String>) -> &mut Self {
        if let Some(v) = value {
            if v.trim().is_empty() {
                self.push(field, "required", "O campo não pode ser vazio.");
            }
        }
        self
    }

    pub fn exact_len(&mut self, field: &'static str, value: Option<&String>, len: usize) -> &mut Self {
        if let Some(v) = value {
            if v.chars().count() != len {
                self.push(field, "length", "Tamanho inválido.");
            }
        }
        self
    }

    pub fn min_len(&mut self, field: &'static str, value: Option<&String>, min: usize) -> &mut Self {
        if let Some(v) = value {
            if v.chars().count() < min {
                self.push(field, "length", "Valor curto demais.");
            }
        }
        self
    }

    pub fn email(&mut self, field: &'static str, value: Option<&String>) -> &mut Self {
        use validator::ValidateEmail;
        if let Some(v) = value {
            if !v.validate_email() {
                self.push(field, "email", "E-mail inválido.");
            }
        }
        self
    }

    pub fn range_i32(&mut self, field: &'static str, value: Option<i32>, min: i32, max: i32) -> &mut Self {
        if let Some(v) = value {
            if v < min || v > max {
                self.push(field, "range", "Valor fora do intervalo permitido.");
            }
        }
        self
    }

    /// Valor numérico que precisa caber na coluna NUMERIC e não ser negativo.
    pub fn amount(&mut self, field: &'static str, value: Option<&Decimal>, column: Numeric) -> &mut Self {
        if let Some(v) = value {
            if v.is_sign_negative() && !v.is_zero() {
                self.push(field, "range", "O valor não pode ser negativo.");
            } else if !column.fits(v) {
                self.push(field, "range", "Valor acima do limite permitido.");
            }
        }
        self
    }

    pub fn invalid_if(&mut self, field: &'static str, condition: bool, message: &'static str) -> &mut Self {
        if condition {
            self.push(field, "invalid", message);
        }
        self
    }

    fn push(&mut self, field: &'static str, code: &'static str, message: &'static str) {
        let mut err = ValidationError::new(code);
        err.message = Some(message.into());
        self.errors.add(field, err);
    }

    pub fn finish(&mut self) -> Result<(), ValidationErrors> {
        let errors = std::mem::take(&mut self.errors);
        if errors.errors().is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Precisão e escala de uma coluna NUMERIC(p, s) da migration.
#[derive(Debug, Clone, Copy)]
pub struct Numeric {
    pub precision: u32,
    pub scale: u32,
}

impl Numeric {
    /// Preços e totais: NUMERIC(12, 2)
    pub const MONEY: Numeric = Numeric { precision: 12, scale: 2 };
    /// Horas de oficina: NUMERIC(6, 2)
    pub const HOURS: Numeric = Numeric { precision: 6, scale: 2 };
    /// Taxa de juros: NUMERIC(6, 3)
    pub const RATE: Numeric = Numeric { precision: 6, scale: 3 };

    /// O Postgres arredonda para a escala antes de conferir os dígitos inteiros.
    pub fn fits(self, value: &Decimal) -> bool {
        let limit = Decimal::from(10i64.pow(self.precision - self.scale));
        value.round_dp(self.scale).abs() < limit
    }
}

/// Achata `Option<Option<T>>` para validar só quando há um valor concreto.
pub fn present<T>(value: &Option<Option<T>>) -> Option<&T> {
    value.as_ref().and_then(|v| v.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct VehiclePatch {
        #[serde(default, deserialize_with = "double_option")]
        trim: Option<Option<String>>,
        #[serde(default, deserialize_with = "non_null")]
        make: Option<String>,
    }

    #[test]
    fn absent_field_is_none() {
        let patch: VehiclePatch = serde_json::from_str("{}").unwrap();
        assert_eq!(patch.trim, None);
        assert_eq!(patch.make, None);
    }

    #[test]
    fn explicit_null_is_distinguished_from_absent() {
        let patch: VehiclePatch = serde_json::from_str(r#"{"trim": null}"#).unwrap();
        assert_eq!(patch.trim, Some(None));
    }

    #[test]
    fn present_value_is_wrapped() {
        let patch: VehiclePatch = serde_json::from_str(r#"{"trim": "LX", "make": "Honda"}"#).unwrap();
        assert_eq!(patch.trim, Some(Some("LX".to_string())));
        assert_eq!(patch.make.as_deref(), Some("Honda"));
    }

    #[test]
    fn null_on_required_column_is_rejected() {
        let result = serde_json::from_str::<VehiclePatch>(r#"{"make": null}"#);
        assert!(result.is_err());
    }

    #[test]
    fn validator_collects_field_errors() {
        let vin = "SHORT".to_string();
        let email = "not-an-email".to_string();
        let result = PatchValidator::new()
            .exact_len("vin", Some(&vin), 17)
            .email("email", Some(&email))
            .finish();
        let errors = result.unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("vin"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn amount_respects_numeric_column_limits() {
        let max = Decimal::new(999_999_999_999, 2);
        let too_big = Decimal::from(10_000_000_000i64);
        let rounds_up = Decimal::new(9_999_999_999_999, 3);
        let negative = Decimal::new(-1, 2);

        assert!(PatchValidator::new().amount("msrp", Some(&max), Numeric::MONEY).finish().is_ok());
        for bad in [too_big, rounds_up, negative] {
            let errors = PatchValidator::new()
                .amount("msrp", Some(&bad), Numeric::MONEY)
                .finish()
                .unwrap_err();
            assert!(errors.field_errors().contains_key("msrp"), "{}", bad);
        }
        assert!(!Numeric::RATE.fits(&Decimal::from(1000)));
        assert!(Numeric::HOURS.fits(&Decimal::new(999_999, 2)));
    }

    #[test]
    fn validator_ignores_absent_fields() {
        assert!(PatchValidator::new().exact_len("vin", None, 17).finish().is_ok());
    }
}

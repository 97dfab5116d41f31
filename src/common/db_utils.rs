// src/common/db_utils.rs

use crate::common::error::AppError;

// ---
// Classificação de erros do banco
// ---

/// Traduz um erro de INSERT/UPDATE: chave única vira `Conflict`,
/// chave estrangeira quebrada ou valor que não cabe na coluna vira `InvalidInput`.
pub fn map_write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if let Some(message) = data_error_message(db_err.code().as_deref()) {
            return AppError::InvalidInput(message.to_string());
        }
        if db_err.is_unique_violation() {
            return AppError::Conflict(unique_conflict_message(db_err.constraint()).to_string());
        }
        if db_err.is_foreign_key_violation() {
            return AppError::InvalidInput(
                "Registro relacionado não encontrado (referência inválida).".to_string(),
            );
        }
    }
    e.into()
}

/// Traduz um erro de DELETE: se outro registro ainda aponta para este, é conflito.
pub fn map_delete_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_foreign_key_violation() {
            return AppError::Conflict(
                "O registro ainda é referenciado por outros registros.".to_string(),
            );
        }
    }
    e.into()
}

// SQLSTATE da classe 22 (dados inválidos para a coluna)
fn data_error_message(code: Option<&str>) -> Option<&'static str> {
    match code? {
        "22001" => Some("Um dos campos excede o tamanho máximo permitido."),
        "22003" => Some("Um dos valores numéricos está fora do limite permitido."),
        "22007" | "22008" => Some("Data ou hora inválida."),
        _ => None,
    }
}

// Os nomes batem com as CONSTRAINTs declaradas na migration.
fn unique_conflict_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("dealerships_dealer_number_key") => {
            "Já existe uma concessionária com este número de revendedor."
        }
        Some("vehicles_vin_key") => "Já existe um veículo com este VIN.",
        Some("users_email_key") => "Este e-mail já está em uso.",
        Some("sales_sale_number_key") => "Já existe uma venda com este número.",
        Some("service_appointments_appointment_number_key") => {
            "Já existe um agendamento com este número."
        }
        Some("service_work_orders_work_order_number_key") => {
            "Já existe uma ordem de serviço com este número."
        }
        _ => "Registro duplicado.",
    }
}

/// Gera um identificador legível (ex: `SALE-3F9A0C21B7`) quando o cliente não envia um.
pub fn generate_number(prefix: &str) -> String {
    let raw = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
    format!("{}-{}", prefix, &raw[..10])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_numbers_have_prefix_and_fixed_length() {
        let number = generate_number("SALE");
        assert!(number.starts_with("SALE-"));
        assert_eq!(number.len(), "SALE-".len() + 10);
        assert_ne!(number, generate_number("SALE"));
    }

    #[test]
    fn known_constraints_have_specific_messages() {
        assert_eq!(
            unique_conflict_message(Some("vehicles_vin_key")),
            "Já existe um veículo com este VIN."
        );
        assert_eq!(unique_conflict_message(None), "Registro duplicado.");
    }

    #[test]
    fn oversized_values_are_client_errors() {
        assert!(data_error_message(Some("22001")).is_some());
        assert!(data_error_message(Some("22003")).is_some());
        // unique_violation segue para o tratamento de conflito
        assert_eq!(data_error_message(Some("23505")), None);
        assert_eq!(data_error_message(None), None);
    }

    #[test]
    fn non_database_errors_pass_through_as_internal() {
        let err = map_write_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::DatabaseError(_)));
    }
}

//! Shared Diesel and pool error mapping for the repository adapters.

use std::fmt::Display;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// Map pool failures to connection errors.
pub(super) fn map_pool_error(error: PoolError) -> RepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RepositoryError::connection(message)
        }
    }
}

/// Map Diesel failures to repository errors.
///
/// Unique violations become [`RepositoryError::Duplicate`] naming the column
/// the violated constraint guards.
pub(super) fn map_diesel_error(error: DieselError) -> RepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            RepositoryError::duplicate(duplicate_field(info.constraint_name()))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            warn!(
                constraint_name = ?info.constraint_name(),
                "write referenced a missing row"
            );
            RepositoryError::query("referenced record does not exist")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::connection("database connection error")
        }
        _ => RepositoryError::query("database error"),
    }
}

/// Column guarded by a unique constraint, derived from PostgreSQL's default
/// `<table>_<column>_key` naming.
fn duplicate_field(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(name) if name.contains("email") => "email",
        Some(name) if name.contains("phone") => "phone",
        Some(name) if name.contains("user_id") => "user_id",
        _ => "id",
    }
}

/// Error for a stored value that no longer satisfies the domain rules.
pub(super) fn invalid_row(column: &str, error: impl Display) -> RepositoryError {
    warn!(column, %error, "stored value failed validation");
    RepositoryError::query(format!("stored {column} is invalid: {error}"))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("users_email_key"), "email")]
    #[case(Some("users_phone_key"), "phone")]
    #[case(Some("vendor_profiles_user_id_key"), "user_id")]
    #[case(Some("users_pkey"), "id")]
    #[case(None, "id")]
    fn unique_constraints_name_their_column(
        #[case] constraint: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(duplicate_field(constraint), expected);
    }

    #[rstest]
    fn pool_errors_are_connection_failures() {
        let error = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(error, RepositoryError::connection("timed out"));
    }

    #[rstest]
    fn not_found_is_a_query_failure() {
        assert_eq!(
            map_diesel_error(DieselError::NotFound),
            RepositoryError::query("record not found")
        );
    }
}

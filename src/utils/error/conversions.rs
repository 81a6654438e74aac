//! Type conversions for ApiError

use super::types::ApiError;
use sea_orm::{DbErr, SqlErr};

// Store errors are translated here and nowhere else
impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => ApiError::DuplicateEntry {
                field: unique_violation_field(&detail),
            },
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => ApiError::ForeignKey,
            _ => match err {
                DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => {
                    ApiError::NotFound("Registro não encontrado".to_string())
                }
                other => ApiError::Database(other),
            },
        }
    }
}

/// Best-effort column name from a unique violation message.
///
/// SQLite reports `UNIQUE constraint failed: accounts.email`, PostgreSQL reports the
/// constraint name, `"accounts_email_key"`.
pub(crate) fn unique_violation_field(detail: &str) -> String {
    if let Some((_, columns)) = detail.split_once("constraint failed: ") {
        let first = columns.split(',').next().unwrap_or(columns).trim();
        let column = first.rsplit('.').next().unwrap_or(first);
        return column.to_string();
    }

    let quoted = detail.split('"').nth(1);
    if let Some(name) = quoted {
        let name = name.strip_suffix("_key").unwrap_or(name);
        if let Some((_, column)) = name.split_once('_') {
            return column.to_string();
        }
    }

    "campo".to_string()
}

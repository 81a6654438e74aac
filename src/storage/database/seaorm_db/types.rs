use sea_orm::{DatabaseConnection, DatabaseTransaction};

/// SeaORM-based database implementation
#[derive(Debug)]
pub struct SeaOrmDatabase {
    pub(super) db: DatabaseConnection,
    /// Backend type indicator
    pub(super) backend_type: DatabaseBackendType,
}

/// Database backend type indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackendType {
    PostgreSQL,
    SQLite,
}

impl DatabaseBackendType {
    pub fn from_url(url: &str) -> Self {
        if url.starts_with("sqlite") {
            DatabaseBackendType::SQLite
        } else {
            DatabaseBackendType::PostgreSQL
        }
    }
}

/// Filters for the paginated account listing
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    pub role: Option<crate::core::models::Role>,
    pub active: Option<bool>,
}

/// Row offset of a 1-based page, `None` when it does not fit a SQL `OFFSET`
pub fn page_offset(page: u64, per_page: u64) -> Option<u64> {
    page.checked_sub(1)?
        .checked_mul(per_page)
        .filter(|offset| *offset <= i64::MAX as u64)
}

/// One page of results plus the unpaginated total
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Open registration transaction. Dropping it without `commit` rolls back.
pub struct RegistrationTx {
    pub(super) txn: DatabaseTransaction,
}

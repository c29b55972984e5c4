use sqlx::sqlite::{SqliteArguments, SqliteQueryResult, SqliteRow};
use sqlx::query::{Query, QueryAs};
use sqlx::{FromRow, Sqlite, SqlitePool};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::RepositoryErrorMapper;
use codefolio_domain::shared::DomainError;

/// Shared execution helpers: every statement is timed and its error mapped
/// with the operation name.
#[derive(Clone)]
pub struct SqliteRepositoryBase {
    pool: Arc<SqlitePool>,
}

impl SqliteRepositoryBase {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn execute<'q>(
        &self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
        operation: &str,
    ) -> Result<SqliteQueryResult, DomainError> {
        let start = Instant::now();
        let result = query
            .execute(&*self.pool)
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, operation))?;
        debug!(
            "📊 {}: {:.2}ms, rows_affected: {}",
            operation,
            start.elapsed().as_secs_f64() * 1000.0,
            result.rows_affected()
        );
        Ok(result)
    }

    pub async fn fetch_optional<'q, T>(
        &self,
        query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
        operation: &str,
    ) -> Result<Option<T>, DomainError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let start = Instant::now();
        let row = query
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, operation))?;
        debug!(
            "📊 {}: {:.2}ms, found: {}",
            operation,
            start.elapsed().as_secs_f64() * 1000.0,
            row.is_some()
        );
        Ok(row)
    }

    pub async fn fetch_all<'q, T>(
        &self,
        query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
        operation: &str,
    ) -> Result<Vec<T>, DomainError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let start = Instant::now();
        let rows = query
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, operation))?;
        debug!(
            "📊 {}: {:.2}ms, rows: {}",
            operation,
            start.elapsed().as_secs_f64() * 1000.0,
            rows.len()
        );
        Ok(rows)
    }
}

use codefolio_domain::shared::DomainError;
use tracing::error;

/// Translates persistence failures into domain errors, tagged with the
/// operation that produced them.
pub struct RepositoryErrorMapper;

impl RepositoryErrorMapper {
    pub fn map_sqlx_error(err: sqlx::Error, operation: &str) -> DomainError {
        match err {
            sqlx::Error::RowNotFound => {
                DomainError::NotFound(format!("{}: no matching row", operation))
            }
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DomainError::Conflict(format!("{}: {}", operation, db_err.message()))
            }
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                DomainError::DataIntegrity(format!("{}: {}", operation, db_err.message()))
            }
            sqlx::Error::PoolTimedOut => {
                error!("{}: database pool timed out", operation);
                DomainError::Timeout(format!("{}: database pool timed out", operation))
            }
            sqlx::Error::ColumnDecode { index, source } => DomainError::DataIntegrity(format!(
                "{}: failed to decode column {}: {}",
                operation, index, source
            )),
            other => {
                error!("{} failed: {}", operation, other);
                DomainError::Repository(format!("{}: {}", operation, other))
            }
        }
    }

    pub fn map_json_error(err: serde_json::Error, operation: &str) -> DomainError {
        DomainError::Serialization(format!("{}: {}", operation, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = RepositoryErrorMapper::map_sqlx_error(sqlx::Error::RowNotFound, "Find user");
        assert!(matches!(err, DomainError::NotFound(msg) if msg.starts_with("Find user")));
    }

    #[test]
    fn test_pool_timeout_is_recoverable() {
        let err = RepositoryErrorMapper::map_sqlx_error(sqlx::Error::PoolTimedOut, "Save user");
        assert!(err.is_recoverable());
    }
}

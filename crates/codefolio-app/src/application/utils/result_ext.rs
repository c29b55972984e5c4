use std::fmt::Display;

use codefolio_domain::shared::DomainError;

/// Shorthand for folding foreign errors into `DomainError`
pub trait ResultExt<T, E> {
    /// `result.to_infra_err()?`
    fn to_infra_err(self) -> Result<T, DomainError>;

    /// Prefix the message with what was being attempted
    fn infra_context(self, context: &str) -> Result<T, DomainError>;
}

impl<T, E: Display> ResultExt<T, E> for Result<T, E> {
    fn to_infra_err(self) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Infrastructure(e.to_string()))
    }

    fn infra_context(self, context: &str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Infrastructure(format!("{}: {}", context, e)))
    }
}

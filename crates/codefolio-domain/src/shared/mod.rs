use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contribution::Provider;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn from_string(s: &str) -> Self {
                Self(s.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

define_id!(UserId);
define_id!(NotificationId);

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication & Authorization (1xxx)
    InvalidCredentials = 1001,
    NotAuthenticated = 1002,
    InvalidToken = 1003,
    AccountNotVerified = 1004,

    // Resource Not Found (2xxx)
    UserNotFound = 2001,
    CodeNotFound = 2002,
    ResourceNotFound = 2003,

    // Business Logic (3xxx)
    Conflict = 3001,
    IncorrectCode = 3002,
    ProviderNotLinked = 3003,
    ProviderCredentialRejected = 3004,

    // Data & Persistence (4xxx)
    RepositoryError = 4001,
    DatabaseConstraintViolation = 4002,
    DataIntegrityError = 4003,
    SerializationError = 4004,
    EncryptionError = 4005,

    // Infrastructure (5xxx)
    InfrastructureError = 5001,
    NetworkError = 5002,
    TimeoutError = 5003,
    ExternalServiceError = 5004,

    // Validation (6xxx)
    ValidationError = 6001,
    InvalidInput = 6002,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::InvalidCredentials
            | ErrorCode::NotAuthenticated
            | ErrorCode::InvalidToken
            | ErrorCode::ProviderCredentialRejected
            | ErrorCode::NetworkError => ErrorSeverity::Warning,

            ErrorCode::UserNotFound
            | ErrorCode::CodeNotFound
            | ErrorCode::ResourceNotFound
            | ErrorCode::AccountNotVerified
            | ErrorCode::IncorrectCode
            | ErrorCode::ProviderNotLinked
            | ErrorCode::Conflict
            | ErrorCode::ValidationError
            | ErrorCode::InvalidInput => ErrorSeverity::Info,

            ErrorCode::DataIntegrityError
            | ErrorCode::DatabaseConstraintViolation
            | ErrorCode::EncryptionError
            | ErrorCode::InfrastructureError => ErrorSeverity::Error,

            _ => ErrorSeverity::Warning,
        }
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::NetworkError
                | ErrorCode::TimeoutError
                | ErrorCode::ExternalServiceError
                | ErrorCode::ProviderCredentialRejected
        )
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("{0}")]
    NotAuthenticated(String),

    #[error("{0}")]
    InvalidToken(String),

    #[error("{0}")]
    AccountNotVerified(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("{0}")]
    CodeNotFound(String),

    #[error("{0}")]
    IncorrectCode(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("{provider} account is not linked: {message}")]
    ProviderNotLinked { provider: Provider, message: String },

    #[error("{provider} rejected the request: {message}")]
    ProviderCredential { provider: Provider, message: String },

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::InvalidCredentials(_) => ErrorCode::InvalidCredentials,
            DomainError::NotAuthenticated(_) => ErrorCode::NotAuthenticated,
            DomainError::InvalidToken(_) => ErrorCode::InvalidToken,
            DomainError::AccountNotVerified(_) => ErrorCode::AccountNotVerified,
            DomainError::UserNotFound(_) => ErrorCode::UserNotFound,
            DomainError::CodeNotFound(_) => ErrorCode::CodeNotFound,
            DomainError::IncorrectCode(_) => ErrorCode::IncorrectCode,
            DomainError::Conflict(_) => ErrorCode::Conflict,
            DomainError::ProviderNotLinked { .. } => ErrorCode::ProviderNotLinked,
            DomainError::ProviderCredential { .. } => ErrorCode::ProviderCredentialRejected,
            DomainError::Timeout(_) => ErrorCode::TimeoutError,
            DomainError::Repository(_) => ErrorCode::RepositoryError,
            DomainError::Infrastructure(_) => ErrorCode::InfrastructureError,
            DomainError::Encryption(_) => ErrorCode::EncryptionError,
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::DataIntegrity(_) => ErrorCode::DataIntegrityError,
            DomainError::InvalidInput(_) => ErrorCode::InvalidInput,
            DomainError::Serialization(_) => ErrorCode::SerializationError,
            DomainError::NotFound(_) => ErrorCode::ResourceNotFound,
        }
    }

    /// Get error message
    pub fn message(&self) -> &str {
        match self {
            DomainError::InvalidCredentials(msg)
            | DomainError::NotAuthenticated(msg)
            | DomainError::InvalidToken(msg)
            | DomainError::AccountNotVerified(msg)
            | DomainError::UserNotFound(msg)
            | DomainError::CodeNotFound(msg)
            | DomainError::IncorrectCode(msg)
            | DomainError::Conflict(msg)
            | DomainError::Timeout(msg)
            | DomainError::Repository(msg)
            | DomainError::Infrastructure(msg)
            | DomainError::Encryption(msg)
            | DomainError::Validation(msg)
            | DomainError::DataIntegrity(msg)
            | DomainError::InvalidInput(msg)
            | DomainError::Serialization(msg)
            | DomainError::NotFound(msg) => msg,
            DomainError::ProviderNotLinked { message, .. }
            | DomainError::ProviderCredential { message, .. } => message,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        self.code().is_recoverable()
    }

    /// Format error with code
    pub fn format_with_code(&self) -> String {
        format!("[{}] {}", self.code().code(), self)
    }

    /// True for failures that belong to a single upstream provider rather than
    /// to the request as a whole.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            DomainError::ProviderCredential { .. }
                | DomainError::Timeout(_)
                | DomainError::Infrastructure(_)
                | DomainError::Serialization(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_ranges() {
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1001);
        assert_eq!(ErrorCode::UserNotFound.code(), 2001);
        assert_eq!(ErrorCode::ProviderNotLinked.code(), 3003);
        assert_eq!(ErrorCode::ValidationError.code(), 6001);
    }

    #[test]
    fn test_provider_errors_are_recoverable() {
        let err = DomainError::ProviderCredential {
            provider: Provider::Codeforces,
            message: "handle not found".to_string(),
        };
        assert!(err.is_recoverable());
        assert!(err.is_provider_failure());
        assert_eq!(err.message(), "handle not found");
        assert_eq!(
            err.format_with_code(),
            "[3004] Codeforces rejected the request: handle not found"
        );
    }

    #[test]
    fn test_request_level_errors_are_not_provider_failures() {
        assert!(!DomainError::NotAuthenticated("Not authenticated".into()).is_provider_failure());
        assert!(!DomainError::UserNotFound("u1".into()).is_provider_failure());
    }

    #[test]
    fn test_id_roundtrip() {
        let id = UserId::from_string("abc");
        assert_eq!(id.as_str(), "abc");
        assert_eq!(id.to_string(), "abc");
        assert_ne!(UserId::new(), UserId::new());
    }
}

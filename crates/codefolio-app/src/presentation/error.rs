use async_graphql::ErrorExtensions;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use codefolio_domain::shared::{DomainError, ErrorCode, ErrorSeverity};
use serde::{Deserialize, Serialize};

/// Structured error returned to API clients
///
/// GraphQL responses carry it in the error's `extensions`; REST routes
/// render it as the JSON body with a status derived from the code range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Numeric error code (1xxx-6xxx range)
    pub code: u16,

    /// Human-readable error message
    pub message: String,

    /// Error severity level
    pub severity: ErrorSeverity,

    /// Whether the operation can be retried
    pub recoverable: bool,
}

impl ApiError {
    pub fn from_code(error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: error_code.code(),
            message: message.into(),
            severity: error_code.severity(),
            recoverable: error_code.is_recoverable(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::InfrastructureError, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::ValidationError, message)
    }

    pub fn status(&self) -> StatusCode {
        match self.code {
            1001..=1003 => StatusCode::UNAUTHORIZED,
            1004 => StatusCode::FORBIDDEN,
            2001..=2999 => StatusCode::NOT_FOUND,
            3001 | 3003 => StatusCode::CONFLICT,
            3002 => StatusCode::BAD_REQUEST,
            3004 | 5002 | 5004 => StatusCode::BAD_GATEWAY,
            5003 => StatusCode::GATEWAY_TIMEOUT,
            6001..=6999 => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self {
            code: err.code().code(),
            message: err.message().to_string(),
            severity: err.severity(),
            recoverable: err.is_recoverable(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::infrastructure(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.message.clone()).extend_with(|_, ext| {
            ext.set("code", self.code);
            ext.set("severity", format!("{:?}", self.severity).to_uppercase());
            ext.set("recoverable", self.recoverable);
        })
    }
}

/// Resolver-side conversion that keeps the structured extensions.
///
/// `async_graphql::Error` converts from any `Display` type, so a bare `?`
/// would flatten an `ApiError` into its message.
pub trait GraphqlResultExt<T> {
    fn into_gql(self) -> async_graphql::Result<T>;
}

impl<T, E> GraphqlResultExt<T> for Result<T, E>
where
    E: Into<ApiError>,
{
    fn into_gql(self) -> async_graphql::Result<T> {
        self.map_err(|e| e.into().extend())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_from_domain_error() {
        let err: ApiError = DomainError::UserNotFound("User not found".to_string()).into();

        assert_eq!(err.code, 2001);
        assert_eq!(err.message, "User not found");
        assert_eq!(err.severity, ErrorSeverity::Info);
        assert!(!err.recoverable);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "[2001] User not found");
    }

    #[test]
    fn test_status_by_code_range() {
        let unauthenticated: ApiError =
            DomainError::NotAuthenticated("Not authenticated".to_string()).into();
        assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);

        let unverified: ApiError =
            DomainError::AccountNotVerified("Please verify your account first".to_string()).into();
        assert_eq!(unverified.status(), StatusCode::FORBIDDEN);

        assert_eq!(ApiError::validation("bad").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::infrastructure("down").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let timeout: ApiError = DomainError::Timeout("slow".to_string()).into();
        assert_eq!(timeout.status(), StatusCode::GATEWAY_TIMEOUT);
        assert!(timeout.recoverable);
    }

    #[test]
    fn test_graphql_error_keeps_code() {
        let result: Result<(), DomainError> =
            Err(DomainError::InvalidToken("Invalid token".to_string()));
        let err = result.into_gql().unwrap_err();

        assert_eq!(err.message, "Invalid token");
        let extensions = err.extensions.expect("extensions set");
        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::from(1003u16))
        );
        assert_eq!(
            extensions.get("recoverable"),
            Some(&async_graphql::Value::from(false))
        );
    }

    #[test]
    fn test_anyhow_maps_to_infrastructure() {
        let err: ApiError = anyhow::anyhow!("connection reset").into();
        assert_eq!(err.code, 5001);
        assert_eq!(err.severity, ErrorSeverity::Error);
    }
}

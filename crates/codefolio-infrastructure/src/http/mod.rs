//! Outbound adapters for the code-hosting and competitive-programming sites.

pub mod client;
pub mod clist;
pub mod codeforces;
pub mod github;
pub mod leetcode;

pub use client::{HttpClient, RetryConfig};
pub use clist::ClistClient;
pub use codeforces::CodeforcesClient;
pub use github::GithubClient;
pub use leetcode::LeetcodeClient;

use reqwest::StatusCode;

use codefolio_domain::shared::DomainError;
use codefolio_domain::Provider;

/// Classify a failed provider call.
///
/// Rejections of the user's handle or token become `ProviderCredential`;
/// transport trouble becomes `Timeout` or `Infrastructure`.
pub(crate) fn provider_error(provider: Provider, err: anyhow::Error) -> DomainError {
    if let Some(domain) = err.downcast_ref::<DomainError>() {
        return match domain {
            DomainError::ProviderCredential { message, .. } => DomainError::ProviderCredential {
                provider,
                message: message.clone(),
            },
            other => DomainError::Infrastructure(format!("{}: {}", provider, other)),
        };
    }

    if let Some(reqwest_err) = err.downcast_ref::<reqwest::Error>() {
        if reqwest_err.is_timeout() {
            return DomainError::Timeout(format!("{} did not respond in time", provider));
        }
        if let Some(status) = reqwest_err.status() {
            if matches!(
                status,
                StatusCode::BAD_REQUEST
                    | StatusCode::UNAUTHORIZED
                    | StatusCode::FORBIDDEN
                    | StatusCode::NOT_FOUND
            ) {
                return DomainError::ProviderCredential {
                    provider,
                    message: format!("request rejected with status {}", status),
                };
            }
        }
        if reqwest_err.is_decode() {
            return DomainError::Serialization(format!(
                "{} returned an unexpected payload: {}",
                provider, reqwest_err
            ));
        }
    }

    DomainError::Infrastructure(format!("{} request failed: {:#}", provider, err))
}

/// Error raised from inside a retry closure when the provider answered but
/// refused the handle or token.
pub(crate) fn rejected(provider: Provider, message: impl Into<String>) -> anyhow::Error {
    anyhow::Error::new(DomainError::ProviderCredential {
        provider,
        message: message.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_keeps_provider_and_message() {
        let err = provider_error(
            Provider::Codeforces,
            rejected(Provider::Codeforces, "handle: User with handle x not found"),
        );
        match err {
            DomainError::ProviderCredential { provider, message } => {
                assert_eq!(provider, Provider::Codeforces);
                assert!(message.contains("not found"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_other_errors_are_infrastructure() {
        let err = provider_error(Provider::Github, anyhow::anyhow!("connection reset"));
        assert!(matches!(err, DomainError::Infrastructure(_)));
        assert!(err.is_provider_failure());
    }
}

use axum::extract::{Query, State};
use axum::response::Redirect;
use serde::Deserialize;
use tracing::warn;

use super::RouterState;
use codefolio_domain::shared::DomainError;

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    /// Set by GitHub when the user denies access
    error_description: Option<String>,
}

/// OAuth redirect target; lands the browser on the success or error page
pub async fn github_callback(
    State(state): State<RouterState>,
    Query(params): Query<CallbackParams>,
) -> Redirect {
    let outcome = match (params.code.as_deref(), params.state.as_deref()) {
        (Some(code), Some(oauth_state)) => {
            state
                .app
                .services
                .github_link
                .complete(code, oauth_state)
                .await
        }
        _ => Err(DomainError::InvalidInput(
            params
                .error_description
                .unwrap_or_else(|| "Missing code or state".to_string()),
        )),
    };

    match outcome {
        Ok(message) => Redirect::to(&page_url("/api/success", &message)),
        Err(e) => {
            warn!("GitHub callback failed: {}", e.format_with_code());
            Redirect::to(&page_url("/api/error", e.message()))
        }
    }
}

fn page_url(path: &str, message: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("message", message)
        .finish();
    format!("{}?{}", path, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_encodes_message() {
        assert_eq!(
            page_url("/api/success", "Github account linked successfully"),
            "/api/success?message=Github+account+linked+successfully"
        );
        assert_eq!(
            page_url("/api/error", "a&b=c"),
            "/api/error?message=a%26b%3Dc"
        );
    }
}

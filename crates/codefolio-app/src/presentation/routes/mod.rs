mod github_callback;
mod pages;
mod upload;

use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::{DefaultBodyLimit, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::application::ResultExt;
use crate::presentation::error::ApiError;
use crate::presentation::graphql::{build_schema, AppSchema, BearerToken};
use crate::presentation::state::AppState;

/// Shared handler state. The schema holds its own `Arc<AppState>`.
#[derive(Clone)]
pub struct RouterState {
    pub app: Arc<AppState>,
    pub schema: AppSchema,
}

pub fn router(app: Arc<AppState>) -> Router {
    let state = RouterState {
        schema: build_schema(app.clone()),
        app,
    };

    let api = Router::new()
        .route("/graphql", get(graphql).post(graphql))
        .route("/github/callback", get(github_callback::github_callback))
        .route("/success", get(pages::success))
        .route("/error", get(pages::error))
        .route(
            "/upload/profile-picture",
            post(upload::upload_profile_picture)
                .layer(DefaultBodyLimit::max(upload::UPLOAD_BODY_LIMIT)),
        )
        .route("/health", get(health));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn graphql(
    State(state): State<RouterState>,
    headers: HeaderMap,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let request = request
        .into_inner()
        .data(BearerToken::from_headers(&headers));
    state.schema.execute(request).await.into()
}

async fn health(State(state): State<RouterState>) -> Result<Json<Value>, ApiError> {
    sqlx::query("SELECT 1")
        .execute(state.app.runtime.pool.as_ref())
        .await
        .infra_context("Database unavailable")?;
    Ok(Json(json!({ "status": "ok" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::AppConfig;
    use crate::presentation::bootstrap::assemble;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use codefolio_infrastructure::persistence::Database;
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let config = AppConfig::from_lookup(|key| match key {
            "SECRET_KEY" => Some("router-test-secret".to_string()),
            "EMAIL" => Some("noreply@example.com".to_string()),
            "EMAIL_PASSWORD" => Some("app-password".to_string()),
            _ => None,
        })
        .unwrap();
        let database = Database::in_memory().await.unwrap();
        let state = assemble(&config, database).await.unwrap();
        router(Arc::new(state))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    fn graphql_post(query: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/graphql")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "query": query }).to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(test_router().await, request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"ok\""));
    }

    #[tokio::test]
    async fn test_graphql_requires_token() {
        let (status, _, body) = send(test_router().await, graphql_post("{ me { id } }")).await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["errors"][0]["message"], "Not authenticated");
        assert_eq!(json["errors"][0]["extensions"]["code"], 1002);
    }

    #[tokio::test]
    async fn test_contests_require_token() {
        let (_, _, body) = send(
            test_router().await,
            graphql_post("{ getContests { today { id } } }"),
        )
        .await;

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["errors"][0]["message"], "Not authenticated");
        assert_eq!(json["errors"][0]["extensions"]["code"], 1002);
        assert!(json["data"].is_null());
    }

    #[tokio::test]
    async fn test_signin_unknown_user() {
        let query = r#"mutation { signin(input: { email: "ghost@example.com", password: "Secret123" }) { token } }"#;
        let (_, _, body) = send(test_router().await, graphql_post(query)).await;

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            json["errors"][0]["message"],
            "User with the given email does not exist"
        );
    }

    #[tokio::test]
    async fn test_github_callback_without_code_redirects_to_error() {
        let request = Request::builder()
            .uri("/api/github/callback?state=abc")
            .body(Body::empty())
            .unwrap();
        let (status, headers, _) = send(test_router().await, request).await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        let location = headers[header::LOCATION].to_str().unwrap();
        assert_eq!(location, "/api/error?message=Missing+code+or+state");
    }

    #[tokio::test]
    async fn test_error_page_escapes_message() {
        let request = Request::builder()
            .uri("/api/error?message=%3Cb%3Ebad%3C%2Fb%3E")
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(test_router().await, request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("&lt;b&gt;bad&lt;/b&gt;"));
        assert!(!body.contains("<b>bad"));
    }

    #[tokio::test]
    async fn test_upload_requires_token() {
        let boundary = "codefolio-boundary";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"me.png\"\r\n\
             Content-Type: image/png\r\n\r\n\x01\x02\x03\r\n--{b}--\r\n",
            b = boundary
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/upload/profile-picture")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap();
        let (status, _, body) = send(test_router().await, request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["code"], 1002);
    }
}

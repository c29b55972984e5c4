//! GraphQL schema served at `/api/graphql`

mod inputs;
mod mutation;
mod query;

pub use inputs::*;
pub use mutation::MutationRoot;
pub use query::QueryRoot;

use async_graphql::{Context, EmptySubscription, Schema};
use axum::http::{header, HeaderMap};
use std::sync::Arc;

use crate::presentation::error::GraphqlResultExt;
use crate::presentation::state::AppState;
use codefolio_domain::shared::UserId;
use codefolio_domain::user::User;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Raw `Authorization: Bearer` credential of the current request
#[derive(Debug, Clone, Default)]
pub struct BearerToken(pub Option<String>);

impl BearerToken {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string);
        Self(token)
    }
}

pub fn build_schema(state: Arc<AppState>) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

pub(crate) fn app_state<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a AppState> {
    ctx.data::<Arc<AppState>>().map(Arc::as_ref)
}

/// The authenticated, verified caller
pub(crate) async fn current_user(ctx: &Context<'_>) -> async_graphql::Result<User> {
    let state = app_state(ctx)?;
    let token = ctx
        .data_opt::<BearerToken>()
        .and_then(|bearer| bearer.0.as_deref());
    state.services.auth.authenticate(token).await.into_gql()
}

fn user_id(raw: &str) -> UserId {
    UserId::from_string(raw.trim())
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use codefolio_domain::github_link::{GithubAuthorization, GithubAuthorizationRepository};
use codefolio_domain::shared::{DomainError, UserId};

#[derive(FromRow)]
struct GithubAuthorizationRow {
    user_id: String,
    state: String,
    created_at: DateTime<Utc>,
}

pub struct SqliteGithubAuthorizationRepository {
    base: SqliteRepositoryBase,
}

impl SqliteGithubAuthorizationRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl GithubAuthorizationRepository for SqliteGithubAuthorizationRepository {
    async fn replace(&self, authorization: &GithubAuthorization) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO github_authorizations (user_id, state, created_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(user_id) DO UPDATE SET
                state = ?2,
                created_at = ?3
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(authorization.user_id().as_str())
                    .bind(authorization.state())
                    .bind(authorization.created_at()),
                "Save GitHub authorization",
            )
            .await?;

        Ok(())
    }

    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<GithubAuthorization>, DomainError> {
        let query =
            "SELECT user_id, state, created_at FROM github_authorizations WHERE user_id = ?1";

        let row: Option<GithubAuthorizationRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(query).bind(user_id.as_str()),
                "Find GitHub authorization",
            )
            .await?;

        Ok(row.map(|row| {
            GithubAuthorization::restore(UserId::from_string(&row.user_id), row.state, row.created_at)
        }))
    }

    async fn delete_for_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.base
            .execute(
                sqlx::query("DELETE FROM github_authorizations WHERE user_id = ?1")
                    .bind(user_id.as_str()),
                "Delete GitHub authorization",
            )
            .await?;
        Ok(())
    }

    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = self
            .base
            .execute(
                sqlx::query("DELETE FROM github_authorizations WHERE created_at <= ?1").bind(cutoff),
                "Purge expired GitHub authorizations",
            )
            .await?;
        Ok(result.rows_affected())
    }
}

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use codefolio_domain::shared::{DomainError, UserId};
use codefolio_domain::social::{Follow, FollowRepository};

#[derive(FromRow)]
struct UserIdRow {
    user_id: String,
}

pub struct SqliteFollowRepository {
    base: SqliteRepositoryBase,
}

impl SqliteFollowRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl FollowRepository for SqliteFollowRepository {
    /// `false` when the edge already existed
    async fn follow(&self, follow: &Follow) -> Result<bool, DomainError> {
        let query = r#"
            INSERT OR IGNORE INTO follows (follower_id, followee_id, created_at)
            VALUES (?1, ?2, ?3)
        "#;

        let result = self
            .base
            .execute(
                sqlx::query(query)
                    .bind(follow.follower.as_str())
                    .bind(follow.followee.as_str())
                    .bind(Utc::now()),
                "Follow user",
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn unfollow(&self, follow: &Follow) -> Result<bool, DomainError> {
        let result = self
            .base
            .execute(
                sqlx::query("DELETE FROM follows WHERE follower_id = ?1 AND followee_id = ?2")
                    .bind(follow.follower.as_str())
                    .bind(follow.followee.as_str()),
                "Unfollow user",
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn followers_of(&self, user_id: &UserId) -> Result<Vec<UserId>, DomainError> {
        let query = r#"
            SELECT follower_id AS user_id FROM follows
            WHERE followee_id = ?1
            ORDER BY created_at
        "#;

        let rows: Vec<UserIdRow> = self
            .base
            .fetch_all(sqlx::query_as(query).bind(user_id.as_str()), "Find followers")
            .await?;

        Ok(rows.into_iter().map(|r| UserId::from_string(&r.user_id)).collect())
    }

    async fn following_of(&self, user_id: &UserId) -> Result<Vec<UserId>, DomainError> {
        let query = r#"
            SELECT followee_id AS user_id FROM follows
            WHERE follower_id = ?1
            ORDER BY created_at
        "#;

        let rows: Vec<UserIdRow> = self
            .base
            .fetch_all(sqlx::query_as(query).bind(user_id.as_str()), "Find following")
            .await?;

        Ok(rows.into_iter().map(|r| UserId::from_string(&r.user_id)).collect())
    }
}

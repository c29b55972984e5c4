use super::types::UserRow;
use codefolio_domain::shared::{DomainError, UserId};
use codefolio_domain::user::{Email, User};

impl super::SqliteUserRepository {
    pub(super) async fn find_by_id_impl(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE id = ?1", Self::SELECT_QUERY);

        let row: Option<UserRow> = self
            .base
            .fetch_optional(sqlx::query_as(&query).bind(id.as_str()), "Find user by ID")
            .await?;

        row.map(|row| row.to_user(&self.encryption)).transpose()
    }

    pub(super) async fn find_by_email_impl(
        &self,
        email: &Email,
    ) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE email = ?1", Self::SELECT_QUERY);

        let row: Option<UserRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query).bind(email.as_str()),
                "Find user by email",
            )
            .await?;

        row.map(|row| row.to_user(&self.encryption)).transpose()
    }

    pub(super) async fn find_by_ids_impl(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = (1..=ids.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(",");
        let query = format!(
            "{} WHERE id IN ({}) ORDER BY name",
            Self::SELECT_QUERY,
            placeholders
        );

        let mut query_builder = sqlx::query_as::<_, UserRow>(&query);
        for id in ids {
            query_builder = query_builder.bind(id.as_str());
        }

        let rows = self.base.fetch_all(query_builder, "Find users by IDs").await?;

        rows.into_iter()
            .map(|row| row.to_user(&self.encryption))
            .collect()
    }
}

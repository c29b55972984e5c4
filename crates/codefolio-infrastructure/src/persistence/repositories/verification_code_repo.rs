use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use codefolio_domain::shared::DomainError;
use codefolio_domain::user::Email;
use codefolio_domain::verification::{OneTimeCode, VerificationCodeRepository};

#[derive(FromRow)]
struct VerificationCodeRow {
    email: String,
    code: String,
    created_at: DateTime<Utc>,
}

impl VerificationCodeRow {
    fn into_code(self) -> OneTimeCode {
        OneTimeCode::restore(Email::from_persistence(self.email), self.code, self.created_at)
    }
}

pub struct SqliteVerificationCodeRepository {
    base: SqliteRepositoryBase,
}

impl SqliteVerificationCodeRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl VerificationCodeRepository for SqliteVerificationCodeRepository {
    async fn replace(&self, code: &OneTimeCode) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO verification_codes (email, code, created_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(email) DO UPDATE SET
                code = ?2,
                created_at = ?3
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(code.email().as_str())
                    .bind(code.code())
                    .bind(code.created_at()),
                "Replace verification code",
            )
            .await?;

        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<OneTimeCode>, DomainError> {
        let query = "SELECT email, code, created_at FROM verification_codes WHERE email = ?1";

        let row: Option<VerificationCodeRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(query).bind(email.as_str()),
                "Find verification code",
            )
            .await?;

        Ok(row.map(VerificationCodeRow::into_code))
    }

    async fn delete_by_email(&self, email: &Email) -> Result<(), DomainError> {
        self.base
            .execute(
                sqlx::query("DELETE FROM verification_codes WHERE email = ?1").bind(email.as_str()),
                "Delete verification code",
            )
            .await?;
        Ok(())
    }

    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = self
            .base
            .execute(
                sqlx::query("DELETE FROM verification_codes WHERE created_at <= ?1").bind(cutoff),
                "Purge expired verification codes",
            )
            .await?;
        Ok(result.rows_affected())
    }
}

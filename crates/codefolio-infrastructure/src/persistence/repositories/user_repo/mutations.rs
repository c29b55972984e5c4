use codefolio_domain::shared::DomainError;
use codefolio_domain::user::User;

impl super::SqliteUserRepository {
    pub(super) async fn save_impl(&self, user: &User) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO users (
                id, name, email, password_hash, is_verified, description,
                profile_picture, profile_picture_public_id, github_token,
                codeforces_username, leetcode_username, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            ON CONFLICT(id) DO UPDATE SET
                name = ?2,
                email = ?3,
                password_hash = ?4,
                is_verified = ?5,
                description = ?6,
                profile_picture = ?7,
                profile_picture_public_id = ?8,
                github_token = ?9,
                codeforces_username = ?10,
                leetcode_username = ?11,
                updated_at = ?13
        "#;

        let encrypted_token = user
            .github_token()
            .map(|token| self.encryption.encrypt(token))
            .transpose()
            .map_err(|e| DomainError::Encryption(format!("Failed to encrypt GitHub token: {}", e)))?;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(user.id().as_str())
                    .bind(user.name())
                    .bind(user.email().as_str())
                    .bind(user.password_hash())
                    .bind(user.is_verified())
                    .bind(user.description())
                    .bind(user.profile_picture())
                    .bind(user.profile_picture_public_id())
                    .bind(encrypted_token)
                    .bind(user.codeforces_username().map(|h| h.as_str()))
                    .bind(user.leetcode_username().map(|h| h.as_str()))
                    .bind(user.created_at())
                    .bind(user.updated_at()),
                "Save user",
            )
            .await?;

        Ok(())
    }
}

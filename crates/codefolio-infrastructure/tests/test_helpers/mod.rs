#![allow(dead_code)]

use sqlx::SqlitePool;
use std::sync::Arc;

use codefolio_domain::user::{Email, User, UserRepository};
use codefolio_infrastructure::persistence::repositories::SqliteUserRepository;
use codefolio_infrastructure::persistence::Database;
use codefolio_infrastructure::security::EncryptionService;

/// Migrated in-memory database plus the encryption service repositories expect
pub async fn setup_in_memory_db() -> (SqlitePool, Arc<EncryptionService>) {
    let db = Database::in_memory().await.expect("open in-memory db");
    db.run_migrations().await.expect("run migrations");

    let encryption = EncryptionService::from_secret("integration-test-secret")
        .expect("create encryption service");

    (db.pool().clone(), Arc::new(encryption))
}

/// Insert a verified user so foreign keys are satisfied
pub async fn create_user(
    pool: &SqlitePool,
    encryption: &Arc<EncryptionService>,
    name: &str,
    email: &str,
) -> User {
    let repo = SqliteUserRepository::new(Arc::new(pool.clone()), encryption.clone());
    let mut user = User::register(name, Email::parse(email).expect("email"), "hash".to_string())
        .expect("register user");
    user.verify();
    repo.save(&user).await.expect("save user");
    user
}

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::shared::DomainError;
use crate::user::Email;

/// Emailed six-character code used for account verification and password reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneTimeCode {
    email: Email,
    code: String,
    created_at: DateTime<Utc>,
}

impl OneTimeCode {
    pub const LENGTH: usize = 6;
    pub const ALPHABET: &'static [u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    pub fn ttl() -> Duration {
        Duration::minutes(10)
    }

    pub fn issue(email: Email, code: String) -> Result<Self, DomainError> {
        Self::check_format(&code)?;
        Ok(Self {
            email,
            code,
            created_at: Utc::now(),
        })
    }

    pub fn restore(email: Email, code: String, created_at: DateTime<Utc>) -> Self {
        Self {
            email,
            code,
            created_at,
        }
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.created_at <= now - Self::ttl()
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.code == candidate
    }

    /// Codes created at or before this instant are stale
    pub fn expiry_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
        now - Self::ttl()
    }

    fn check_format(code: &str) -> Result<(), DomainError> {
        let valid = code.len() == Self::LENGTH && code.bytes().all(|b| Self::ALPHABET.contains(&b));
        if !valid {
            return Err(DomainError::InvalidInput(format!(
                "Verification code must be {} characters of A-Z or 0-9",
                Self::LENGTH
            )));
        }
        Ok(())
    }
}

#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    /// Store a code, dropping any earlier code for the same email
    async fn replace(&self, code: &OneTimeCode) -> Result<(), DomainError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<OneTimeCode>, DomainError>;

    async fn delete_by_email(&self, email: &Email) -> Result<(), DomainError>;

    /// Delete codes created at or before `cutoff`, returning how many were removed
    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> Email {
        Email::parse("grace@example.com").unwrap()
    }

    #[test]
    fn test_issue_validates_format() {
        assert!(OneTimeCode::issue(email(), "AB12CD".into()).is_ok());
        assert!(OneTimeCode::issue(email(), "ab12cd".into()).is_err());
        assert!(OneTimeCode::issue(email(), "AB12C".into()).is_err());
    }

    #[test]
    fn test_expiry_after_ten_minutes() {
        let now = Utc::now();
        let fresh = OneTimeCode::restore(email(), "AAAAAA".into(), now - Duration::minutes(9));
        let stale = OneTimeCode::restore(email(), "AAAAAA".into(), now - Duration::minutes(10));
        assert!(!fresh.is_expired(now));
        assert!(stale.is_expired(now));
    }

    #[test]
    fn test_matches_is_exact() {
        let code = OneTimeCode::restore(email(), "XY7Z00".into(), Utc::now());
        assert!(code.matches("XY7Z00"));
        assert!(!code.matches("xy7z00"));
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::DomainError;

pub const INVALID_EMAIL: &str = "Invalid email address";
pub const WEAK_PASSWORD: &str = "Password must be at least 6 characters with atleast one uppercase letter, one lowercase letter and one number";
pub const PASSWORD_MISMATCH: &str = "Password and Confirm Password must be the same";

/// Lower-cased e-mail address of the form `local@domain.tld`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let email = raw.trim().to_lowercase();
        if email.chars().any(char::is_whitespace) {
            return Err(DomainError::Validation(INVALID_EMAIL.to_string()));
        }

        let (local, domain) = email
            .split_once('@')
            .ok_or_else(|| DomainError::Validation(INVALID_EMAIL.to_string()))?;

        let dot_ok = domain
            .rfind('.')
            .is_some_and(|idx| idx > 0 && idx + 1 < domain.len());
        if local.is_empty() || !dot_ok {
            return Err(DomainError::Validation(INVALID_EMAIL.to_string()));
        }

        Ok(Self(email))
    }

    /// Rebuild from a stored value without validation
    pub fn from_persistence(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// At least six characters with a digit, a lower-case and an upper-case letter,
/// and equal to the confirmation.
pub fn validate_password(password: &str, confirm_password: &str) -> Result<(), DomainError> {
    let strong = password.chars().count() >= 6
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase());
    if !strong {
        return Err(DomainError::Validation(WEAK_PASSWORD.to_string()));
    }
    if password != confirm_password {
        return Err(DomainError::Validation(PASSWORD_MISMATCH.to_string()));
    }
    Ok(())
}

/// Public username on Codeforces or LeetCode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderHandle(String);

impl ProviderHandle {
    const MAX_LEN: usize = 64;

    /// `Ok(None)` for a blank input, which clears the link
    pub fn parse(raw: &str) -> Result<Option<Self>, DomainError> {
        let handle = raw.trim();
        if handle.is_empty() {
            return Ok(None);
        }
        if handle.len() > Self::MAX_LEN {
            return Err(DomainError::Validation(format!(
                "Username must be at most {} characters",
                Self::MAX_LEN
            )));
        }
        if !handle
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(DomainError::Validation(format!(
                "Invalid username: {}",
                handle
            )));
        }
        Ok(Some(Self(handle.to_string())))
    }

    pub fn from_persistence(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_lowercased() {
        let email = Email::parse("  Alice@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_invalid_emails() {
        for raw in ["", "alice", "alice@", "@example.com", "alice@example", "alice@.com", "alice@example.", "a b@c.d"] {
            let err = Email::parse(raw).unwrap_err();
            assert_eq!(err.message(), INVALID_EMAIL, "input {:?}", raw);
        }
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("Passw0rd", "Passw0rd").is_ok());
        assert_eq!(
            validate_password("pass", "pass").unwrap_err().message(),
            WEAK_PASSWORD
        );
        assert!(validate_password("password1", "password1").is_err());
        assert!(validate_password("PASSWORD1", "PASSWORD1").is_err());
        assert!(validate_password("Password", "Password").is_err());
        assert_eq!(
            validate_password("Passw0rd", "Passw0rd!").unwrap_err().message(),
            PASSWORD_MISMATCH
        );
    }

    #[test]
    fn test_provider_handle() {
        assert_eq!(ProviderHandle::parse("   ").unwrap(), None);
        assert_eq!(
            ProviderHandle::parse(" tourist ").unwrap().unwrap().as_str(),
            "tourist"
        );
        assert!(ProviderHandle::parse("bad handle").is_err());
        assert!(ProviderHandle::parse(&"x".repeat(65)).is_err());
    }
}

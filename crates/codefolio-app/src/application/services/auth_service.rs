use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use codefolio_domain::mail::{MailMessage, MailTemplate, Mailer};
use codefolio_domain::shared::{DomainError, UserId};
use codefolio_domain::user::{validate_password, Email, User, UserRepository};
use codefolio_domain::verification::{OneTimeCode, VerificationCodeRepository};
use codefolio_infrastructure::security::{generate_code, JwtService, PasswordService};

pub const SIGNUP_SUCCESS: &str =
    "Account created successfully, please check your email to verify your account";
pub const PASSWORD_RESET_SENT: &str = "Password reset email has been sent successfully";
pub const PASSWORD_RESET_DONE: &str = "Password has been reset successfully";

const USER_NOT_FOUND: &str = "User with the given email does not exist";
const NOT_VERIFIED: &str = "Please verify your account first";
const INCORRECT_PASSWORD: &str = "Incorrect Password";
const CODE_NOT_FOUND: &str = "Token does not exist";
const INCORRECT_CODE: &str = "Incorrect Code";
const NOT_AUTHENTICATED: &str = "Not authenticated";
const INVALID_TOKEN: &str = "Invalid token";

#[derive(Debug, Clone)]
pub struct SignupCommand {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone)]
pub struct ResetPasswordCommand {
    pub email: String,
    pub code: String,
    pub password: String,
    pub confirm_password: String,
}

/// A verified user together with a freshly issued bearer token
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

/// Sign-up, e-mail verification, sign-in and password reset
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    code_repo: Arc<dyn VerificationCodeRepository>,
    mailer: Arc<dyn Mailer>,
    passwords: Arc<PasswordService>,
    tokens: Arc<JwtService>,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        code_repo: Arc<dyn VerificationCodeRepository>,
        mailer: Arc<dyn Mailer>,
        passwords: Arc<PasswordService>,
        tokens: Arc<JwtService>,
    ) -> Self {
        Self {
            user_repo,
            code_repo,
            mailer,
            passwords,
            tokens,
        }
    }

    /// Create the account, or refresh a pending one, and mail a verification code
    pub async fn signup(&self, cmd: SignupCommand) -> Result<String, DomainError> {
        let email = Email::parse(&cmd.email)?;
        validate_password(&cmd.password, &cmd.confirm_password)?;

        let existing = self.user_repo.find_by_email(&email).await?;
        if existing.as_ref().is_some_and(User::is_verified) {
            return Err(DomainError::Conflict(
                "User with the same email already exists".to_string(),
            ));
        }

        let password_hash = self.passwords.hash(&cmd.password)?;
        let user = match existing {
            Some(mut pending) => {
                pending.reregister(&cmd.name, password_hash)?;
                pending
            }
            None => User::register(&cmd.name, email, password_hash)?,
        };

        self.user_repo.save(&user).await?;
        self.issue_code(&user, MailTemplate::AccountConfirmation).await?;

        info!("Signed up user {}", user.id());
        Ok(SIGNUP_SUCCESS.to_string())
    }

    pub async fn signin(&self, email: &str, password: &str) -> Result<AuthSession, DomainError> {
        let user = self.find_by_raw_email(email).await?;
        if !user.is_verified() {
            return Err(DomainError::AccountNotVerified(NOT_VERIFIED.to_string()));
        }
        if !self.passwords.verify(password, user.password_hash())? {
            return Err(DomainError::InvalidCredentials(INCORRECT_PASSWORD.to_string()));
        }

        let token = self.tokens.issue(user.id())?;
        Ok(AuthSession { user, token })
    }

    /// Verify the account with the mailed code and sign the user in
    pub async fn check_code(&self, email: &str, code: &str) -> Result<AuthSession, DomainError> {
        let email = Email::parse(email)?;
        self.consume_code(&email, code).await?;

        let mut user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(USER_NOT_FOUND.to_string()))?;
        user.verify();
        self.user_repo.save(&user).await?;

        let token = self.tokens.issue(user.id())?;
        info!("Verified user {}", user.id());
        Ok(AuthSession { user, token })
    }

    pub async fn forgot_password(&self, email: &str) -> Result<String, DomainError> {
        let user = self.find_by_raw_email(email).await?;
        self.issue_code(&user, MailTemplate::PasswordReset).await?;
        Ok(PASSWORD_RESET_SENT.to_string())
    }

    pub async fn reset_password(&self, cmd: ResetPasswordCommand) -> Result<String, DomainError> {
        let email = Email::parse(&cmd.email)?;
        validate_password(&cmd.password, &cmd.confirm_password)?;

        let mut user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(USER_NOT_FOUND.to_string()))?;
        self.consume_code(&email, &cmd.code).await?;

        user.change_password(self.passwords.hash(&cmd.password)?);
        self.user_repo.save(&user).await?;

        info!("Password reset for user {}", user.id());
        Ok(PASSWORD_RESET_DONE.to_string())
    }

    /// Resolve a bearer token to a verified user
    pub async fn authenticate(&self, token: Option<&str>) -> Result<User, DomainError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DomainError::NotAuthenticated(NOT_AUTHENTICATED.to_string()))?;

        let user_id: UserId = self.tokens.verify(token)?;
        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| DomainError::InvalidToken(INVALID_TOKEN.to_string()))?;

        if !user.is_verified() {
            return Err(DomainError::AccountNotVerified(NOT_VERIFIED.to_string()));
        }
        Ok(user)
    }

    async fn find_by_raw_email(&self, email: &str) -> Result<User, DomainError> {
        let email = Email::parse(email)?;
        self.user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(USER_NOT_FOUND.to_string()))
    }

    /// Replace the user's pending code and mail the new one. Delivery
    /// failures are logged; the user can ask for another code.
    async fn issue_code(&self, user: &User, template: MailTemplate) -> Result<(), DomainError> {
        let code = OneTimeCode::issue(user.email().clone(), generate_code())?;
        self.code_repo.replace(&code).await?;

        let message = MailMessage::new(template, user.email().clone(), user.name(), code.code());
        if let Err(e) = self.mailer.send(&message).await {
            warn!(
                "Failed to send {:?} mail to user {}: {}",
                template,
                user.id(),
                e
            );
        }
        Ok(())
    }

    /// Check the code against the stored one and delete it on success
    async fn consume_code(&self, email: &Email, candidate: &str) -> Result<(), DomainError> {
        let purged = self
            .code_repo
            .delete_created_before(OneTimeCode::expiry_cutoff(Utc::now()))
            .await?;
        if purged > 0 {
            tracing::debug!("Purged {} expired verification codes", purged);
        }

        let code = self
            .code_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::CodeNotFound(CODE_NOT_FOUND.to_string()))?;
        if !code.matches(candidate.trim()) {
            return Err(DomainError::IncorrectCode(INCORRECT_CODE.to_string()));
        }

        self.code_repo.delete_by_email(email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{
        auth_service, InMemoryCodes, InMemoryUsers, RecordingMailer,
    };
    use codefolio_domain::shared::ErrorCode;

    fn signup_cmd(email: &str) -> SignupCommand {
        SignupCommand {
            name: "Grace Hopper".to_string(),
            email: email.to_string(),
            password: "Cobol1959".to_string(),
            confirm_password: "Cobol1959".to_string(),
        }
    }

    struct Harness {
        service: AuthService,
        users: Arc<InMemoryUsers>,
        codes: Arc<InMemoryCodes>,
        mailer: Arc<RecordingMailer>,
    }

    fn harness() -> Harness {
        let users = Arc::new(InMemoryUsers::new());
        let codes = Arc::new(InMemoryCodes::new());
        let mailer = Arc::new(RecordingMailer::new());
        Harness {
            service: auth_service(users.clone(), codes.clone(), mailer.clone()),
            users,
            codes,
            mailer,
        }
    }

    async fn last_code(h: &Harness) -> String {
        h.mailer.last().await.expect("a mail was sent").code
    }

    #[tokio::test]
    async fn test_signup_verify_signin_flow() {
        let h = harness();

        let message = h.service.signup(signup_cmd("Grace@Navy.mil")).await.unwrap();
        assert_eq!(message, SIGNUP_SUCCESS);

        let mail = h.mailer.last().await.unwrap();
        assert_eq!(mail.template, MailTemplate::AccountConfirmation);
        assert_eq!(mail.to.as_str(), "grace@navy.mil");

        let err = h.service.signin("grace@navy.mil", "Cobol1959").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::AccountNotVerified);

        let session = h
            .service
            .check_code("grace@navy.mil", &last_code(&h).await)
            .await
            .unwrap();
        assert!(session.user.is_verified());
        assert!(h.codes.is_empty().await);

        let session = h.service.signin("grace@navy.mil", "Cobol1959").await.unwrap();
        let user = h.service.authenticate(Some(&session.token)).await.unwrap();
        assert_eq!(user.id(), session.user.id());
    }

    #[tokio::test]
    async fn test_signup_rejects_verified_email_and_bad_input() {
        let h = harness();
        h.service.signup(signup_cmd("ada@example.com")).await.unwrap();
        h.service
            .check_code("ada@example.com", &last_code(&h).await)
            .await
            .unwrap();

        let err = h.service.signup(signup_cmd("ada@example.com")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Conflict);

        let mut weak = signup_cmd("new@example.com");
        weak.password = "short".into();
        weak.confirm_password = "short".into();
        assert_eq!(
            h.service.signup(weak).await.unwrap_err().code(),
            ErrorCode::ValidationError
        );

        assert!(h.service.signup(signup_cmd("not-an-email")).await.is_err());
    }

    #[tokio::test]
    async fn test_pending_signup_is_replaced() {
        let h = harness();
        h.service.signup(signup_cmd("ada@example.com")).await.unwrap();
        let first = last_code(&h).await;

        let mut again = signup_cmd("ada@example.com");
        again.name = "Ada Lovelace".into();
        h.service.signup(again).await.unwrap();

        assert_eq!(h.users.len().await, 1);
        assert_eq!(h.mailer.count().await, 2);
        let user = h
            .users
            .find_by_email(&Email::parse("ada@example.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.name(), "Ada Lovelace");

        // only the newest code is accepted
        assert_ne!(first, last_code(&h).await);
        let err = h.service.check_code("ada@example.com", &first).await.unwrap_err();
        assert_eq!(err.message(), INCORRECT_CODE);
    }

    #[tokio::test]
    async fn test_check_code_errors() {
        let h = harness();
        let err = h.service.check_code("nobody@example.com", "ABC123").await.unwrap_err();
        assert_eq!(err.message(), CODE_NOT_FOUND);

        h.service.signup(signup_cmd("ada@example.com")).await.unwrap();
        let err = h.service.check_code("ada@example.com", "??????").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::IncorrectCode);
    }

    #[tokio::test]
    async fn test_expired_code_is_purged() {
        let h = harness();
        h.service.signup(signup_cmd("ada@example.com")).await.unwrap();
        let code = last_code(&h).await;
        h.codes.age_all(OneTimeCode::ttl()).await;

        let err = h.service.check_code("ada@example.com", &code).await.unwrap_err();
        assert_eq!(err.message(), CODE_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_signin_errors() {
        let h = harness();
        let err = h.service.signin("ghost@example.com", "Whatever1").await.unwrap_err();
        assert_eq!(err.message(), USER_NOT_FOUND);

        h.service.signup(signup_cmd("ada@example.com")).await.unwrap();
        h.service
            .check_code("ada@example.com", &last_code(&h).await)
            .await
            .unwrap();
        let err = h.service.signin("ada@example.com", "Wrong1pass").await.unwrap_err();
        assert_eq!(err.message(), INCORRECT_PASSWORD);
    }

    #[tokio::test]
    async fn test_malformed_email_is_a_validation_error() {
        let h = harness();

        let err = h.service.signin("not-an-email", "Whatever1").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(err.message(), "Invalid email address");

        let err = h.service.forgot_password("ada@nowhere").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(h.mailer.count().await, 0);
    }

    #[tokio::test]
    async fn test_password_reset() {
        let h = harness();
        h.service.signup(signup_cmd("ada@example.com")).await.unwrap();
        h.service
            .check_code("ada@example.com", &last_code(&h).await)
            .await
            .unwrap();

        assert_eq!(
            h.service.forgot_password("ada@example.com").await.unwrap(),
            PASSWORD_RESET_SENT
        );
        let mail = h.mailer.last().await.unwrap();
        assert_eq!(mail.template, MailTemplate::PasswordReset);

        let message = h
            .service
            .reset_password(ResetPasswordCommand {
                email: "ada@example.com".into(),
                code: mail.code,
                password: "Engine1843".into(),
                confirm_password: "Engine1843".into(),
            })
            .await
            .unwrap();
        assert_eq!(message, PASSWORD_RESET_DONE);

        assert!(h.service.signin("ada@example.com", "Cobol1959").await.is_err());
        assert!(h.service.signin("ada@example.com", "Engine1843").await.is_ok());
    }

    #[tokio::test]
    async fn test_mail_failure_does_not_fail_signup() {
        let h = harness();
        h.mailer.fail_next().await;
        assert!(h.service.signup(signup_cmd("ada@example.com")).await.is_ok());
        assert!(!h.codes.is_empty().await);
    }

    #[tokio::test]
    async fn test_authenticate_errors() {
        let h = harness();
        let err = h.service.authenticate(None).await.unwrap_err();
        assert_eq!(err.message(), NOT_AUTHENTICATED);

        let err = h.service.authenticate(Some("garbage")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidToken);

        h.service.signup(signup_cmd("ada@example.com")).await.unwrap();
        let pending = h
            .users
            .find_by_email(&Email::parse("ada@example.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        let token = crate::application::test_support::jwt().issue(pending.id()).unwrap();
        let err = h.service.authenticate(Some(&token)).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::AccountNotVerified);
    }
}

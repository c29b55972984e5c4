use async_graphql::InputObject;

use crate::application::services::{ResetPasswordCommand, SignupCommand};
use codefolio_domain::user::ProfileChanges;

#[derive(Debug, Clone, InputObject)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl From<SignupInput> for SignupCommand {
    fn from(input: SignupInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
            password: input.password,
            confirm_password: input.confirm_password,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct SigninInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, InputObject)]
pub struct CheckCodeInput {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, InputObject)]
pub struct ForgotPasswordInput {
    pub email: String,
}

#[derive(Debug, Clone, InputObject)]
pub struct ResetPasswordInput {
    pub email: String,
    pub code: String,
    pub password: String,
    pub confirm_password: String,
}

impl From<ResetPasswordInput> for ResetPasswordCommand {
    fn from(input: ResetPasswordInput) -> Self {
        Self {
            email: input.email,
            code: input.code,
            password: input.password,
            confirm_password: input.confirm_password,
        }
    }
}

/// Omitted fields stay unchanged; an empty handle unlinks the provider
#[derive(Debug, Clone, Default, InputObject)]
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub codeforces_username: Option<String>,
    pub leetcode_username: Option<String>,
}

impl From<UpdateProfileInput> for ProfileChanges {
    fn from(input: UpdateProfileInput) -> Self {
        Self {
            name: input.name,
            description: input.description,
            codeforces_username: input.codeforces_username,
            leetcode_username: input.leetcode_username,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct UserIdInput {
    pub user_id: String,
}

#[derive(Debug, Clone, InputObject)]
pub struct SeeNotificationInput {
    pub notification_id: String,
}

#[derive(Debug, Clone, InputObject)]
pub struct SeeNotificationsInput {
    pub notification_ids: Vec<String>,
}

use async_graphql::{Context, Object, Result};

use super::{
    app_state, current_user, user_id, CheckCodeInput, ForgotPasswordInput, ResetPasswordInput,
    SeeNotificationInput, SeeNotificationsInput, SigninInput, SignupInput, UpdateProfileInput,
    UserIdInput,
};
use crate::application::dtos::{AuthPayloadDto, GithubAuthorizationDto, UserDto};
use crate::application::services::AuthSession;
use crate::presentation::error::GraphqlResultExt;

pub struct MutationRoot;

fn payload(session: AuthSession) -> AuthPayloadDto {
    AuthPayloadDto {
        user: UserDto::from(&session.user),
        token: session.token,
    }
}

#[Object]
impl MutationRoot {
    async fn signup(&self, ctx: &Context<'_>, input: SignupInput) -> Result<String> {
        app_state(ctx)?
            .services
            .auth
            .signup(input.into())
            .await
            .into_gql()
    }

    async fn signin(&self, ctx: &Context<'_>, input: SigninInput) -> Result<AuthPayloadDto> {
        let session = app_state(ctx)?
            .services
            .auth
            .signin(&input.email, &input.password)
            .await
            .into_gql()?;
        Ok(payload(session))
    }

    /// Verify the account with the mailed code
    async fn check_code(&self, ctx: &Context<'_>, input: CheckCodeInput) -> Result<AuthPayloadDto> {
        let session = app_state(ctx)?
            .services
            .auth
            .check_code(&input.email, &input.code)
            .await
            .into_gql()?;
        Ok(payload(session))
    }

    async fn forgot_password(&self, ctx: &Context<'_>, input: ForgotPasswordInput) -> Result<String> {
        app_state(ctx)?
            .services
            .auth
            .forgot_password(&input.email)
            .await
            .into_gql()
    }

    async fn reset_password(&self, ctx: &Context<'_>, input: ResetPasswordInput) -> Result<String> {
        app_state(ctx)?
            .services
            .auth
            .reset_password(input.into())
            .await
            .into_gql()
    }

    /// Start the GitHub OAuth flow for the caller
    async fn authorize_github(&self, ctx: &Context<'_>) -> Result<GithubAuthorizationDto> {
        let user = current_user(ctx).await?;
        let start = app_state(ctx)?
            .services
            .github_link
            .authorize(&user)
            .await
            .into_gql()?;
        Ok(GithubAuthorizationDto {
            state: start.state,
            url: start.url,
        })
    }

    async fn update_profile(&self, ctx: &Context<'_>, input: UpdateProfileInput) -> Result<UserDto> {
        let user = current_user(ctx).await?;
        let user = app_state(ctx)?
            .services
            .profile
            .update_profile(user, input.into())
            .await
            .into_gql()?;
        Ok(UserDto::from(&user))
    }

    async fn follow_user(&self, ctx: &Context<'_>, input: UserIdInput) -> Result<String> {
        let user = current_user(ctx).await?;
        app_state(ctx)?
            .services
            .social
            .follow(&user, &user_id(&input.user_id))
            .await
            .into_gql()
    }

    async fn unfollow_user(&self, ctx: &Context<'_>, input: UserIdInput) -> Result<String> {
        let user = current_user(ctx).await?;
        app_state(ctx)?
            .services
            .social
            .unfollow(&user, &user_id(&input.user_id))
            .await
            .into_gql()
    }

    async fn see_notification(&self, ctx: &Context<'_>, input: SeeNotificationInput) -> Result<String> {
        let user = current_user(ctx).await?;
        app_state(ctx)?
            .services
            .notification
            .see(user.id(), &input.notification_id)
            .await
            .into_gql()
    }

    async fn see_notifications(
        &self,
        ctx: &Context<'_>,
        input: SeeNotificationsInput,
    ) -> Result<String> {
        let user = current_user(ctx).await?;
        app_state(ctx)?
            .services
            .notification
            .see_many(user.id(), &input.notification_ids)
            .await
            .into_gql()
    }
}

use async_graphql::{Context, Object, Result};

use super::{app_state, current_user, user_id, UserIdInput};
use crate::application::dtos::{
    CodeforcesGraphsDto, ContestScheduleDto, ContributionGraphDto, GithubGraphsDto,
    LeetcodeGraphsDto, NotificationsDto, PinnedRepositoryDto, UserDto, UserSummaryDto,
};
use crate::presentation::error::GraphqlResultExt;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The signed-in user
    async fn me(&self, ctx: &Context<'_>) -> Result<UserDto> {
        let user = current_user(ctx).await?;
        Ok(UserDto::from(&user))
    }

    async fn user(&self, ctx: &Context<'_>, input: UserIdInput) -> Result<UserDto> {
        current_user(ctx).await?;
        let state = app_state(ctx)?;
        let user = state
            .services
            .profile
            .find_user(&user_id(&input.user_id))
            .await
            .into_gql()?;
        Ok(UserDto::from(&user))
    }

    async fn followers(&self, ctx: &Context<'_>, input: UserIdInput) -> Result<Vec<UserSummaryDto>> {
        current_user(ctx).await?;
        let state = app_state(ctx)?;
        let users = state
            .services
            .social
            .followers(&user_id(&input.user_id))
            .await
            .into_gql()?;
        Ok(users.iter().map(UserSummaryDto::from).collect())
    }

    async fn following(&self, ctx: &Context<'_>, input: UserIdInput) -> Result<Vec<UserSummaryDto>> {
        current_user(ctx).await?;
        let state = app_state(ctx)?;
        let users = state
            .services
            .social
            .following(&user_id(&input.user_id))
            .await
            .into_gql()?;
        Ok(users.iter().map(UserSummaryDto::from).collect())
    }

    /// The caller's notifications, newest first
    async fn notifications(&self, ctx: &Context<'_>) -> Result<NotificationsDto> {
        let user = current_user(ctx).await?;
        app_state(ctx)?
            .services
            .notification
            .list(user.id())
            .await
            .into_gql()
    }

    /// Unified 365-day activity calendar across GitHub, Codeforces and LeetCode
    async fn contribution_graph(
        &self,
        ctx: &Context<'_>,
        input: UserIdInput,
    ) -> Result<ContributionGraphDto> {
        current_user(ctx).await?;
        app_state(ctx)?
            .queries
            .dashboard
            .contribution_graph(&user_id(&input.user_id))
            .await
            .into_gql()
    }

    async fn get_pinned_repos(
        &self,
        ctx: &Context<'_>,
        input: UserIdInput,
    ) -> Result<Vec<PinnedRepositoryDto>> {
        current_user(ctx).await?;
        app_state(ctx)?
            .queries
            .dashboard
            .pinned_repos(&user_id(&input.user_id))
            .await
            .into_gql()
    }

    async fn github_graphs(
        &self,
        ctx: &Context<'_>,
        input: UserIdInput,
    ) -> Result<Option<GithubGraphsDto>> {
        current_user(ctx).await?;
        app_state(ctx)?
            .queries
            .dashboard
            .github_graphs(&user_id(&input.user_id))
            .await
            .into_gql()
    }

    async fn codeforces_graphs(
        &self,
        ctx: &Context<'_>,
        input: UserIdInput,
    ) -> Result<Option<CodeforcesGraphsDto>> {
        current_user(ctx).await?;
        app_state(ctx)?
            .queries
            .dashboard
            .codeforces_graphs(&user_id(&input.user_id))
            .await
            .into_gql()
    }

    async fn leetcode_graphs(
        &self,
        ctx: &Context<'_>,
        input: UserIdInput,
    ) -> Result<Option<LeetcodeGraphsDto>> {
        current_user(ctx).await?;
        app_state(ctx)?
            .queries
            .dashboard
            .leetcode_graphs(&user_id(&input.user_id))
            .await
            .into_gql()
    }

    /// Upcoming contests from clist.by, bucketed by UTC date
    async fn get_contests(&self, ctx: &Context<'_>) -> Result<ContestScheduleDto> {
        current_user(ctx).await?;
        Ok(app_state(ctx)?.services.contest.schedule().await)
    }
}

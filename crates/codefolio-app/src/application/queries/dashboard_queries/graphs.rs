use std::time::Duration;

use super::within;
use crate::application::dtos::{
    CodeforcesGraphsDto, GithubGraphsDto, LeetcodeGraphsDto, PinnedRepositoryDto,
};
use codefolio_domain::providers::{CodeforcesApi, GithubApi, LeetcodeApi};
use codefolio_domain::shared::DomainError;
use codefolio_domain::stats::CodeforcesGraphs;
use codefolio_domain::user::User;
use codefolio_domain::Provider;

pub(super) async fn pinned_repos(
    api: &dyn GithubApi,
    user: &User,
    limit: Duration,
) -> Result<Vec<PinnedRepositoryDto>, DomainError> {
    let Some(token) = user.github_token() else {
        return Ok(Vec::new());
    };
    let repos = within(Provider::Github, limit, async {
        let login = api.viewer_login(token).await?;
        api.pinned_repositories(&login, token).await
    })
    .await?;
    Ok(repos.into_iter().map(Into::into).collect())
}

pub(super) async fn github_graphs(
    api: &dyn GithubApi,
    user: &User,
    limit: Duration,
) -> Result<Option<GithubGraphsDto>, DomainError> {
    let Some(token) = user.github_token() else {
        return Ok(None);
    };
    let snapshot = within(Provider::Github, limit, async {
        let login = api.viewer_login(token).await?;
        api.profile_snapshot(&login, token).await
    })
    .await?;
    Ok(Some(snapshot.into_graphs().into()))
}

pub(super) async fn codeforces_graphs(
    api: &dyn CodeforcesApi,
    user: &User,
    limit: Duration,
) -> Result<Option<CodeforcesGraphsDto>, DomainError> {
    let Some(handle) = user.codeforces_username() else {
        return Ok(None);
    };
    let (ratings, submissions) = within(Provider::Codeforces, limit, async {
        tokio::try_join!(
            api.rating_history(handle.as_str()),
            api.submissions(handle.as_str())
        )
    })
    .await?;
    Ok(Some(CodeforcesGraphs::build(ratings, &submissions).into()))
}

pub(super) async fn leetcode_graphs(
    api: &dyn LeetcodeApi,
    user: &User,
    limit: Duration,
) -> Result<Option<LeetcodeGraphsDto>, DomainError> {
    let Some(username) = user.leetcode_username() else {
        return Ok(None);
    };
    let graphs = within(Provider::Leetcode, limit, api.graphs(username.as_str())).await?;
    Ok(Some(graphs.into()))
}

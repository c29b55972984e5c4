use chrono::NaiveDate;
use std::time::Duration;
use tracing::{debug, warn};

use super::{within, ProviderClients};
use codefolio_domain::contribution::{
    ContributionAggregator, ContributionGraph, ContributionWindow, ProviderSeries,
};
use codefolio_domain::providers::{CodeforcesApi, GithubApi, LeetcodeApi};
use codefolio_domain::shared::DomainError;
use codefolio_domain::stats::accepted_submission_series;
use codefolio_domain::user::User;
use codefolio_domain::Provider;

/// `Ok(None)` means the user has not linked the provider
type Fetched = Result<Option<ProviderSeries>, DomainError>;

/// Fetch all linked providers concurrently and fold them into one calendar.
/// A provider that errors or runs past `limit` contributes zero and is listed
/// in the graph's failures.
pub(super) async fn build_graph(
    providers: &ProviderClients,
    user: &User,
    limit: Duration,
    today: NaiveDate,
) -> ContributionGraph {
    let (github, codeforces, leetcode) = tokio::join!(
        within(Provider::Github, limit, github_series(providers.github.as_ref(), user)),
        within(
            Provider::Codeforces,
            limit,
            codeforces_series(providers.codeforces.as_ref(), user)
        ),
        within(
            Provider::Leetcode,
            limit,
            leetcode_series(providers.leetcode.as_ref(), user)
        ),
    );

    let mut aggregator = ContributionAggregator::new(ContributionWindow::ending_on(today));
    for (provider, fetched) in [
        (Provider::Github, github),
        (Provider::Codeforces, codeforces),
        (Provider::Leetcode, leetcode),
    ] {
        fold(&mut aggregator, provider, fetched);
    }

    let graph = aggregator.finish();
    debug!(
        "[contribution] user={} total={} failures={}",
        user.id(),
        graph.total_contributions,
        graph.failures.len()
    );
    graph
}

fn fold(aggregator: &mut ContributionAggregator, provider: Provider, fetched: Fetched) {
    match fetched {
        Ok(Some(series)) => {
            aggregator.merge(provider, &series.into_day_counts());
        }
        Ok(None) => {}
        Err(e) => {
            warn!("[contribution] {} skipped: {}", provider, e);
            aggregator.record_failure(provider, e.message());
        }
    }
}

async fn github_series(api: &dyn GithubApi, user: &User) -> Fetched {
    let Some(token) = user.github_token() else {
        return Ok(None);
    };
    let login = api.viewer_login(token).await?;
    let calendar = api.contribution_calendar(&login, token).await?;
    Ok(Some(calendar.to_series()))
}

async fn codeforces_series(api: &dyn CodeforcesApi, user: &User) -> Fetched {
    let Some(handle) = user.codeforces_username() else {
        return Ok(None);
    };
    let submissions = api.submissions(handle.as_str()).await?;
    Ok(Some(accepted_submission_series(&submissions)))
}

async fn leetcode_series(api: &dyn LeetcodeApi, user: &User) -> Fetched {
    let Some(username) = user.leetcode_username() else {
        return Ok(None);
    };
    let events = api.submission_calendar(username.as_str()).await?;
    Ok(Some(ProviderSeries::Events(events)))
}

pub(super) const CONTRIBUTION_CALENDAR: &str = r#"
query ($userName: String!) {
  user(login: $userName) {
    contributionsCollection {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            contributionCount
            date
          }
        }
      }
    }
  }
}"#;

pub(super) const PINNED_REPOSITORIES: &str = r#"
query ($userName: String!) {
  user(login: $userName) {
    pinnedItems(first: 6, types: [REPOSITORY]) {
      nodes {
        ... on Repository {
          name
          description
          url
          stargazerCount
          forkCount
          primaryLanguage {
            name
            color
          }
        }
      }
    }
  }
}"#;

pub(super) const PROFILE_SNAPSHOT: &str = r#"
query ($userName: String!) {
  user(login: $userName) {
    followers { totalCount }
    following { totalCount }
    repositories(ownerAffiliations: OWNER, isFork: false, first: 100) {
      totalCount
      nodes {
        name
        forkCount
        watchers { totalCount }
        languages(first: 20, orderBy: {field: SIZE, direction: DESC}) {
          edges {
            size
            node { name color }
          }
        }
        refs(first: 50, refPrefix: "refs/heads/") {
          nodes {
            name
            target {
              ... on Commit {
                history { totalCount }
              }
            }
          }
        }
      }
    }
    issues { totalCount }
    repositoriesContributedTo { totalCount }
    pullRequests(first: 100) {
      totalCount
      nodes {
        reviews { totalCount }
      }
    }
    contributionsCollection {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            contributionCount
            date
          }
        }
      }
    }
  }
}"#;

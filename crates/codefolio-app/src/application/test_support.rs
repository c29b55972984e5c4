//! In-memory repositories and provider stubs shared by the application tests.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::services::AuthService;
use codefolio_domain::contribution::{ActivityEvent, DailyCount};
use codefolio_domain::github_link::{GithubAuthorization, GithubAuthorizationRepository};
use codefolio_domain::mail::{MailMessage, Mailer};
use codefolio_domain::media::{ImageStore, ImageUpload, StoredImage};
use codefolio_domain::notification::{Notification, NotificationRepository};
use codefolio_domain::providers::{CodeforcesApi, GithubApi, GithubOAuth, LeetcodeApi};
use codefolio_domain::shared::{DomainError, NotificationId, UserId};
use codefolio_domain::social::{Follow, FollowRepository};
use codefolio_domain::stats::{
    CodeforcesSubmission, GithubCalendar, GithubProfileSnapshot, LeetcodeGraphs,
    PinnedRepository, RatingChange,
};
use codefolio_domain::user::{Email, User, UserRepository};
use codefolio_domain::verification::{OneTimeCode, VerificationCodeRepository};
use codefolio_domain::Provider;
use codefolio_infrastructure::security::{JwtService, PasswordHashParams, PasswordService};

pub const TEST_SECRET: &str = "test-secret";

pub fn jwt() -> JwtService {
    JwtService::new(TEST_SECRET, Duration::days(1)).unwrap()
}

/// Argon2 with the smallest cost the crate accepts
pub fn cheap_passwords() -> PasswordService {
    PasswordService::new(PasswordHashParams {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .unwrap()
}

pub fn auth_service(
    users: Arc<InMemoryUsers>,
    codes: Arc<InMemoryCodes>,
    mailer: Arc<RecordingMailer>,
) -> AuthService {
    AuthService::new(
        users,
        codes,
        mailer,
        Arc::new(cheap_passwords()),
        Arc::new(jwt()),
    )
}

/// Store a verified user directly, skipping the mail round trip
pub async fn verified_user(users: &Arc<InMemoryUsers>, name: &str, email: &str) -> User {
    let mut user = User::register(name, Email::parse(email).unwrap(), "hash".to_string()).unwrap();
    user.verify();
    users.save(&user).await.unwrap();
    user
}

// Repositories

pub struct InMemoryUsers {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUsers {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        users.insert(user.id().as_str().to_string(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(id.as_str()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email() == email).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        let mut found: Vec<User> = ids
            .iter()
            .filter_map(|id| users.get(id.as_str()).cloned())
            .collect();
        found.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(found)
    }
}

pub struct InMemoryCodes {
    codes: RwLock<HashMap<String, OneTimeCode>>,
}

impl InMemoryCodes {
    pub fn new() -> Self {
        Self {
            codes: RwLock::new(HashMap::new()),
        }
    }

    pub async fn is_empty(&self) -> bool {
        self.codes.read().await.is_empty()
    }

    /// Push every stored code `by` into the past
    pub async fn age_all(&self, by: Duration) {
        let mut codes = self.codes.write().await;
        for code in codes.values_mut() {
            *code = OneTimeCode::restore(
                code.email().clone(),
                code.code().to_string(),
                code.created_at() - by,
            );
        }
    }
}

#[async_trait]
impl VerificationCodeRepository for InMemoryCodes {
    async fn replace(&self, code: &OneTimeCode) -> Result<(), DomainError> {
        let mut codes = self.codes.write().await;
        codes.insert(code.email().as_str().to_string(), code.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<OneTimeCode>, DomainError> {
        let codes = self.codes.read().await;
        Ok(codes.get(email.as_str()).cloned())
    }

    async fn delete_by_email(&self, email: &Email) -> Result<(), DomainError> {
        self.codes.write().await.remove(email.as_str());
        Ok(())
    }

    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut codes = self.codes.write().await;
        let before = codes.len();
        codes.retain(|_, c| c.created_at() >= cutoff);
        Ok((before - codes.len()) as u64)
    }
}

pub struct InMemoryGithubAuthorizations {
    pending: RwLock<HashMap<String, GithubAuthorization>>,
}

impl InMemoryGithubAuthorizations {
    pub fn new() -> Self {
        Self {
            pending: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl GithubAuthorizationRepository for InMemoryGithubAuthorizations {
    async fn replace(&self, authorization: &GithubAuthorization) -> Result<(), DomainError> {
        let mut pending = self.pending.write().await;
        pending.insert(
            authorization.user_id().as_str().to_string(),
            authorization.clone(),
        );
        Ok(())
    }

    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<GithubAuthorization>, DomainError> {
        Ok(self.pending.read().await.get(user_id.as_str()).cloned())
    }

    async fn delete_for_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.pending.write().await.remove(user_id.as_str());
        Ok(())
    }

    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut pending = self.pending.write().await;
        let before = pending.len();
        pending.retain(|_, a| a.created_at() >= cutoff);
        Ok((before - pending.len()) as u64)
    }
}

pub struct InMemoryFollows {
    edges: RwLock<HashSet<Follow>>,
}

impl InMemoryFollows {
    pub fn new() -> Self {
        Self {
            edges: RwLock::new(HashSet::new()),
        }
    }
}

#[async_trait]
impl FollowRepository for InMemoryFollows {
    async fn follow(&self, follow: &Follow) -> Result<bool, DomainError> {
        Ok(self.edges.write().await.insert(follow.clone()))
    }

    async fn unfollow(&self, follow: &Follow) -> Result<bool, DomainError> {
        Ok(self.edges.write().await.remove(follow))
    }

    async fn followers_of(&self, user_id: &UserId) -> Result<Vec<UserId>, DomainError> {
        let edges = self.edges.read().await;
        Ok(edges
            .iter()
            .filter(|e| &e.followee == user_id)
            .map(|e| e.follower.clone())
            .collect())
    }

    async fn following_of(&self, user_id: &UserId) -> Result<Vec<UserId>, DomainError> {
        let edges = self.edges.read().await;
        Ok(edges
            .iter()
            .filter(|e| &e.follower == user_id)
            .map(|e| e.followee.clone())
            .collect())
    }
}

pub struct InMemoryNotifications {
    notifications: RwLock<Vec<Notification>>,
}

impl InMemoryNotifications {
    pub fn new() -> Self {
        Self {
            notifications: RwLock::new(Vec::new()),
        }
    }

    /// Move the `seen_at` of every seen notification `by` into the past
    pub async fn age_seen(&self, by: Duration) {
        let mut notifications = self.notifications.write().await;
        for n in notifications.iter_mut() {
            if let Some(seen_at) = n.seen_at() {
                *n = Notification::from_persistence(
                    n.id().clone(),
                    n.recipient().clone(),
                    n.sender().cloned(),
                    n.kind(),
                    n.description().to_string(),
                    Some(seen_at - by),
                    n.created_at() - by,
                );
            }
        }
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotifications {
    async fn replace(&self, notification: &Notification) -> Result<(), DomainError> {
        let mut notifications = self.notifications.write().await;
        notifications.retain(|n| {
            !(n.recipient() == notification.recipient()
                && n.kind() == notification.kind()
                && n.sender() == notification.sender())
        });
        notifications.push(notification.clone());
        Ok(())
    }

    async fn find_for_user(&self, user_id: &UserId) -> Result<Vec<Notification>, DomainError> {
        let notifications = self.notifications.read().await;
        let mut found: Vec<Notification> = notifications
            .iter()
            .filter(|n| n.recipient() == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(found)
    }

    async fn mark_seen(
        &self,
        user_id: &UserId,
        ids: &[NotificationId],
        seen_at: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        let mut notifications = self.notifications.write().await;
        let mut changed = 0;
        for n in notifications
            .iter_mut()
            .filter(|n| n.recipient() == user_id && !n.is_seen() && ids.contains(n.id()))
        {
            n.mark_seen(seen_at);
            changed += 1;
        }
        Ok(changed)
    }

    async fn delete_seen_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut notifications = self.notifications.write().await;
        let before = notifications.len();
        notifications.retain(|n| n.seen_at().map_or(true, |at| at > cutoff));
        Ok((before - notifications.len()) as u64)
    }
}

// Outbound adapters

pub struct RecordingMailer {
    sent: RwLock<Vec<MailMessage>>,
    fail_next: RwLock<bool>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self {
            sent: RwLock::new(Vec::new()),
            fail_next: RwLock::new(false),
        }
    }

    pub async fn last(&self) -> Option<MailMessage> {
        self.sent.read().await.last().cloned()
    }

    pub async fn count(&self) -> usize {
        self.sent.read().await.len()
    }

    pub async fn fail_next(&self) {
        *self.fail_next.write().await = true;
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), DomainError> {
        let mut fail = self.fail_next.write().await;
        if *fail {
            *fail = false;
            return Err(DomainError::Infrastructure("SMTP unavailable".to_string()));
        }
        self.sent.write().await.push(message.clone());
        Ok(())
    }
}

pub struct InMemoryImageStore {
    stored: RwLock<HashMap<String, usize>>,
    deleted: RwLock<Vec<String>>,
    uploads: RwLock<u32>,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self {
            stored: RwLock::new(HashMap::new()),
            deleted: RwLock::new(Vec::new()),
            uploads: RwLock::new(0),
        }
    }

    pub async fn deleted(&self) -> Vec<String> {
        self.deleted.read().await.clone()
    }

    pub async fn stored_count(&self) -> usize {
        self.stored.read().await.len()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn upload_profile_picture(&self, image: &ImageUpload) -> Result<StoredImage, DomainError> {
        let mut uploads = self.uploads.write().await;
        *uploads += 1;
        let public_id = format!("profile_pictures/{}", uploads);
        self.stored
            .write()
            .await
            .insert(public_id.clone(), image.bytes.len());
        Ok(StoredImage {
            url: format!("https://images.test/{}", public_id),
            public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), DomainError> {
        self.stored.write().await.remove(public_id);
        self.deleted.write().await.push(public_id.to_string());
        Ok(())
    }
}

pub struct StubGithubOAuth;

#[async_trait]
impl GithubOAuth for StubGithubOAuth {
    fn authorize_url(&self, state: &str) -> String {
        format!("https://github.test/login/oauth/authorize?state={}", state)
    }

    async fn exchange_code(&self, code: &str) -> Result<String, DomainError> {
        Ok(format!("gho_{code}"))
    }
}

// Provider stubs

/// How a stubbed provider answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubMode {
    Answer,
    Reject,
    /// Never completes
    Hang,
}

impl StubMode {
    async fn gate(self, provider: Provider) -> Result<(), DomainError> {
        match self {
            StubMode::Answer => Ok(()),
            StubMode::Reject => Err(DomainError::ProviderCredential {
                provider,
                message: "rejected by stub".to_string(),
            }),
            StubMode::Hang => std::future::pending().await,
        }
    }
}

pub struct StubGithubApi {
    pub mode: StubMode,
    pub days: Vec<DailyCount>,
    pub pinned: Vec<PinnedRepository>,
}

impl StubGithubApi {
    pub fn answering(days: Vec<DailyCount>) -> Self {
        Self {
            mode: StubMode::Answer,
            days,
            pinned: Vec::new(),
        }
    }

    pub fn with_mode(mode: StubMode) -> Self {
        Self {
            mode,
            days: Vec::new(),
            pinned: Vec::new(),
        }
    }
}

#[async_trait]
impl GithubApi for StubGithubApi {
    async fn viewer_login(&self, _token: &str) -> Result<String, DomainError> {
        self.mode.gate(Provider::Github).await?;
        Ok("octocat".to_string())
    }

    async fn contribution_calendar(
        &self,
        _login: &str,
        _token: &str,
    ) -> Result<GithubCalendar, DomainError> {
        self.mode.gate(Provider::Github).await?;
        Ok(GithubCalendar {
            total_contributions: self.days.iter().map(|d| d.count).sum(),
            days: self.days.clone(),
        })
    }

    async fn pinned_repositories(
        &self,
        _login: &str,
        _token: &str,
    ) -> Result<Vec<PinnedRepository>, DomainError> {
        self.mode.gate(Provider::Github).await?;
        Ok(self.pinned.clone())
    }

    async fn profile_snapshot(
        &self,
        _login: &str,
        _token: &str,
    ) -> Result<GithubProfileSnapshot, DomainError> {
        self.mode.gate(Provider::Github).await?;
        Ok(GithubProfileSnapshot {
            calendar: GithubCalendar {
                total_contributions: self.days.iter().map(|d| d.count).sum(),
                days: self.days.clone(),
            },
            ..Default::default()
        })
    }
}

pub struct StubCodeforcesApi {
    pub mode: StubMode,
    pub submissions: Vec<CodeforcesSubmission>,
    pub ratings: Vec<RatingChange>,
}

impl StubCodeforcesApi {
    pub fn answering(submissions: Vec<CodeforcesSubmission>) -> Self {
        Self {
            mode: StubMode::Answer,
            submissions,
            ratings: Vec::new(),
        }
    }

    pub fn with_mode(mode: StubMode) -> Self {
        Self {
            mode,
            submissions: Vec::new(),
            ratings: Vec::new(),
        }
    }
}

#[async_trait]
impl CodeforcesApi for StubCodeforcesApi {
    async fn submissions(&self, _handle: &str) -> Result<Vec<CodeforcesSubmission>, DomainError> {
        self.mode.gate(Provider::Codeforces).await?;
        Ok(self.submissions.clone())
    }

    async fn rating_history(&self, _handle: &str) -> Result<Vec<RatingChange>, DomainError> {
        self.mode.gate(Provider::Codeforces).await?;
        Ok(self.ratings.clone())
    }
}

pub struct StubLeetcodeApi {
    pub mode: StubMode,
    pub events: Vec<ActivityEvent>,
}

impl StubLeetcodeApi {
    pub fn answering(events: Vec<ActivityEvent>) -> Self {
        Self {
            mode: StubMode::Answer,
            events,
        }
    }

    pub fn with_mode(mode: StubMode) -> Self {
        Self {
            mode,
            events: Vec::new(),
        }
    }
}

#[async_trait]
impl LeetcodeApi for StubLeetcodeApi {
    async fn submission_calendar(
        &self,
        _username: &str,
    ) -> Result<Vec<ActivityEvent>, DomainError> {
        self.mode.gate(Provider::Leetcode).await?;
        Ok(self.events.clone())
    }

    async fn graphs(&self, _username: &str) -> Result<LeetcodeGraphs, DomainError> {
        self.mode.gate(Provider::Leetcode).await?;
        Err(DomainError::ProviderCredential {
            provider: Provider::Leetcode,
            message: "user does not exist".to_string(),
        })
    }
}

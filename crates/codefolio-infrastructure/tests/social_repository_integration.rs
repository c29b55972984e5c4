use chrono::{Duration, Utc};
use std::sync::Arc;

use codefolio_domain::notification::{Notification, NotificationRepository};
use codefolio_domain::social::{Follow, FollowRepository};
use codefolio_infrastructure::persistence::repositories::{
    SqliteFollowRepository, SqliteNotificationRepository,
};

mod test_helpers;

#[tokio::test]
async fn follow_is_idempotent_integration() {
    let (pool, encryption) = test_helpers::setup_in_memory_db().await;
    let repo = SqliteFollowRepository::new(Arc::new(pool.clone()));

    let ada = test_helpers::create_user(&pool, &encryption, "Ada", "ada@example.com").await;
    let alan = test_helpers::create_user(&pool, &encryption, "Alan", "alan@example.com").await;
    let edge = Follow::new(ada.id().clone(), alan.id().clone()).expect("follow");

    assert!(repo.follow(&edge).await.expect("first follow"));
    assert!(!repo.follow(&edge).await.expect("second follow"));

    assert_eq!(repo.followers_of(alan.id()).await.expect("followers"), vec![ada.id().clone()]);
    assert_eq!(repo.following_of(ada.id()).await.expect("following"), vec![alan.id().clone()]);
    assert!(repo.followers_of(ada.id()).await.expect("followers").is_empty());

    assert!(repo.unfollow(&edge).await.expect("unfollow"));
    assert!(!repo.unfollow(&edge).await.expect("unfollow again"));
    assert!(repo.following_of(ada.id()).await.expect("following").is_empty());
}

#[tokio::test]
async fn notifications_mark_seen_is_scoped_to_recipient_integration() {
    let (pool, encryption) = test_helpers::setup_in_memory_db().await;
    let repo = SqliteNotificationRepository::new(Arc::new(pool.clone()));

    let ada = test_helpers::create_user(&pool, &encryption, "Ada", "ada@example.com").await;
    let alan = test_helpers::create_user(&pool, &encryption, "Alan", "alan@example.com").await;

    let to_alan = Notification::following(ada.id(), ada.name(), alan.id()).expect("notification");
    let to_ada = Notification::following(alan.id(), alan.name(), ada.id()).expect("notification");
    repo.replace(&to_alan).await.expect("save");
    repo.replace(&to_ada).await.expect("save");

    // Ada cannot mark Alan's notification
    let touched = repo
        .mark_seen(ada.id(), &[to_alan.id().clone(), to_ada.id().clone()], Utc::now())
        .await
        .expect("mark seen");
    assert_eq!(touched, 1);

    let alans = repo.find_for_user(alan.id()).await.expect("find");
    assert_eq!(alans.len(), 1);
    assert!(!alans[0].is_seen());
    assert_eq!(alans[0].sender(), Some(ada.id()));

    let adas = repo.find_for_user(ada.id()).await.expect("find");
    assert!(adas[0].is_seen());
}

#[tokio::test]
async fn notifications_purge_only_old_seen_integration() {
    let (pool, encryption) = test_helpers::setup_in_memory_db().await;
    let repo = SqliteNotificationRepository::new(Arc::new(pool.clone()));

    let ada = test_helpers::create_user(&pool, &encryption, "Ada", "ada@example.com").await;
    let alan = test_helpers::create_user(&pool, &encryption, "Alan", "alan@example.com").await;
    let now = Utc::now();

    let old_seen = Notification::following(alan.id(), "Alan", ada.id()).expect("n");
    let recent_seen = Notification::following(alan.id(), "Alan", ada.id()).expect("n");
    let unseen = Notification::following(alan.id(), "Alan", ada.id()).expect("n");
    for n in [&old_seen, &recent_seen, &unseen] {
        repo.replace(n).await.expect("save");
    }
    repo.mark_seen(ada.id(), &[old_seen.id().clone()], now - Duration::hours(25))
        .await
        .expect("mark old");
    repo.mark_seen(ada.id(), &[recent_seen.id().clone()], now - Duration::hours(1))
        .await
        .expect("mark recent");

    let removed = repo
        .delete_seen_before(now - Notification::retention())
        .await
        .expect("purge");
    assert_eq!(removed, 1);

    let remaining = repo.find_for_user(ada.id()).await.expect("find");
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|n| n.id() != old_seen.id()));
}

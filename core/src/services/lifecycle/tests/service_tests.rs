//! Unit tests for the lifecycle notification service

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::user::{MembershipStatus, User};
use crate::errors::DomainError;
use crate::repositories::{
    EmailLogRepository, InMemoryEmailLogRepository, InMemoryUserRepository, UserRepository,
};
use crate::services::clock::ManualClock;
use crate::services::lifecycle::{
    DeliveryOutcome, LifecycleEvent, LifecycleMailer, SkipReason,
};

use super::mocks::MockNotificationMailer;

type TestMailer = LifecycleMailer<
    InMemoryUserRepository,
    MockNotificationMailer,
    InMemoryEmailLogRepository,
    ManualClock,
>;

fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

struct Fixture {
    service: TestMailer,
    users: Arc<InMemoryUserRepository>,
    mailer: Arc<MockNotificationMailer>,
    email_log: Arc<InMemoryEmailLogRepository>,
}

fn setup(mailer_fails: bool) -> Fixture {
    let users = Arc::new(InMemoryUserRepository::new());
    let mailer = Arc::new(MockNotificationMailer::new(mailer_fails));
    let email_log = Arc::new(InMemoryEmailLogRepository::new());
    let clock = Arc::new(ManualClock::new(start_time()));
    let service = LifecycleMailer::new(
        users.clone(),
        mailer.clone(),
        email_log.clone(),
        clock.clone(),
    );
    Fixture {
        service,
        users,
        mailer,
        email_log,
    }
}

async fn seed_user(fixture: &Fixture, email: &str) -> User {
    fixture
        .users
        .create(User::new(email, start_time()))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_welcome_notification_sent_and_logged() {
    let fixture = setup(false);
    let user = seed_user(&fixture, "new@example.com").await;

    let outcome = fixture
        .service
        .notify(user.id, LifecycleEvent::Welcome)
        .await
        .unwrap();
    assert!(outcome.was_sent());

    assert_eq!(fixture.mailer.kinds_for("new@example.com"), vec!["welcome"]);

    let logged = fixture.email_log.list_for_user(user.id).await.unwrap();
    assert_eq!(logged.len(), 1);
    assert!(logged[0].success);
    assert_eq!(logged[0].kind, "welcome");
    assert_eq!(logged[0].sent_at, start_time());
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let fixture = setup(false);

    let result = fixture
        .service
        .notify(Uuid::new_v4(), LifecycleEvent::Welcome)
        .await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
    assert_eq!(fixture.mailer.sent_count(), 0);
}

#[tokio::test]
async fn test_unsubscribed_user_is_skipped() {
    let fixture = setup(false);
    let mut user = seed_user(&fixture, "optout@example.com").await;
    user.mark_unsubscribed(start_time());
    fixture.users.update(user.clone()).await.unwrap();

    let outcome = fixture
        .service
        .notify(user.id, LifecycleEvent::Welcome)
        .await
        .unwrap();
    assert_eq!(
        outcome,
        DeliveryOutcome::Skipped {
            reason: SkipReason::Unsubscribed
        }
    );
    assert_eq!(fixture.mailer.sent_count(), 0);
    assert!(fixture.email_log.is_empty().await);
}

#[tokio::test]
async fn test_account_deleted_reaches_unsubscribed_user() {
    let fixture = setup(false);
    let mut user = seed_user(&fixture, "leaving@example.com").await;
    user.mark_unsubscribed(start_time());
    fixture.users.update(user.clone()).await.unwrap();

    let outcome = fixture
        .service
        .notify(user.id, LifecycleEvent::AccountDeleted)
        .await
        .unwrap();
    assert!(outcome.was_sent());
    assert_eq!(
        fixture.mailer.kinds_for("leaving@example.com"),
        vec!["account_deleted"]
    );
}

#[tokio::test]
async fn test_transport_failure_is_logged_and_surfaced() {
    let fixture = setup(true);
    let user = seed_user(&fixture, "user@example.com").await;

    let result = fixture.service.notify(user.id, LifecycleEvent::Welcome).await;
    assert!(matches!(result, Err(DomainError::Notification(_))));

    let logged = fixture.email_log.list_for_user(user.id).await.unwrap();
    assert_eq!(logged.len(), 1);
    assert!(!logged[0].success);
    assert_eq!(logged[0].error.as_deref(), Some("mailer error"));
}

#[tokio::test]
async fn test_membership_upgrade_sends_purchase_confirmation() {
    let fixture = setup(false);
    let mut user = seed_user(&fixture, "buyer@example.com").await;
    user.membership_status = MembershipStatus::Premium;
    user.membership_plan = Some("annual".to_string());
    user.membership_end_date = Some(start_time() + Duration::days(365));
    fixture.users.update(user.clone()).await.unwrap();

    let outcome = fixture
        .service
        .handle_membership_change(user.id, MembershipStatus::Free, MembershipStatus::Premium)
        .await
        .unwrap();
    assert!(outcome.unwrap().was_sent());
    assert_eq!(
        fixture.mailer.kinds_for("buyer@example.com"),
        vec!["purchase_confirmation"]
    );
}

#[tokio::test]
async fn test_membership_downgrade_sends_cancellation() {
    let fixture = setup(false);
    let user = seed_user(&fixture, "former@example.com").await;

    let outcome = fixture
        .service
        .handle_membership_change(user.id, MembershipStatus::Premium, MembershipStatus::Free)
        .await
        .unwrap();
    assert!(outcome.unwrap().was_sent());
    assert_eq!(
        fixture.mailer.kinds_for("former@example.com"),
        vec!["membership_cancelled"]
    );
}

#[tokio::test]
async fn test_silent_membership_transitions() {
    let fixture = setup(false);
    let user = seed_user(&fixture, "user@example.com").await;

    for (old, new) in [
        (MembershipStatus::Free, MembershipStatus::Free),
        (MembershipStatus::Free, MembershipStatus::Starter),
        (MembershipStatus::Premium, MembershipStatus::Starter),
        (MembershipStatus::Starter, MembershipStatus::Free),
    ] {
        let outcome = fixture
            .service
            .handle_membership_change(user.id, old, new)
            .await
            .unwrap();
        assert!(outcome.is_none());
    }
    assert_eq!(fixture.mailer.sent_count(), 0);
}

#[tokio::test]
async fn test_trial_ending_sweep_counts_deliveries() {
    let fixture = setup(false);
    let cutoff = start_time() + Duration::days(1);

    for (email, ends_in_hours, unsubscribed) in [
        ("soon@example.com", 12, false),
        ("also-soon@example.com", 20, true),
        ("later@example.com", 72, false),
    ] {
        let mut user = User::new(email, start_time());
        user.membership_status = MembershipStatus::Starter;
        user.membership_end_date = Some(start_time() + Duration::hours(ends_in_hours));
        if unsubscribed {
            user.mark_unsubscribed(start_time());
        }
        fixture.users.create(user).await.unwrap();
    }

    let delivered = fixture.service.notify_trials_ending(cutoff).await.unwrap();

    // later@example.com is outside the window; the opted-out user is skipped
    assert_eq!(delivered, 1);
    assert_eq!(
        fixture.mailer.kinds_for("soon@example.com"),
        vec!["trial_ending"]
    );
    assert!(fixture.mailer.kinds_for("also-soon@example.com").is_empty());
}

#[tokio::test]
async fn test_unsubscribe_is_idempotent() {
    let fixture = setup(false);
    let user = seed_user(&fixture, "user@example.com").await;

    fixture.service.unsubscribe(user.id).await.unwrap();
    let first = fixture
        .users
        .find_by_id(user.id)
        .await
        .unwrap()
        .unwrap()
        .unsubscribed_at;
    assert!(first.is_some());

    fixture.service.unsubscribe(user.id).await.unwrap();
    let second = fixture
        .users
        .find_by_id(user.id)
        .await
        .unwrap()
        .unwrap()
        .unsubscribed_at;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unsubscribe_unknown_user() {
    let fixture = setup(false);
    let result = fixture.service.unsubscribe(Uuid::new_v4()).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

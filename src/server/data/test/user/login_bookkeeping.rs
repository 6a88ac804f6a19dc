use super::*;
use chrono::{Duration, Utc};

/// Tests counting failed logins.
///
/// Verifies that each call adds one to the stored count rather than overwriting it, and
/// that an unknown user id reports nothing.
///
/// Expected: counts 3 then 4 from a starting value of 2, None for a missing user
#[tokio::test]
async fn increments_failed_logins() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .failed_login_attempts(2)
        .build()
        .await?;

    let repo = UserRepository::new(db);
    assert_eq!(repo.increment_failed_logins(user.id).await?, Some(3));
    assert_eq!(repo.increment_failed_logins(user.id).await?, Some(4));
    assert_eq!(repo.increment_failed_logins(user.id + 1000).await?, None);

    let stored = repo.find_by_id(user.id).await?.unwrap();
    assert_eq!(stored.failed_login_attempts, 4);

    Ok(())
}

/// Tests locking an account.
///
/// Expected: failure count reset and lock expiry persisted
#[tokio::test]
async fn locks_account() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .failed_login_attempts(5)
        .build()
        .await?;
    let until = Utc::now() + Duration::minutes(15);

    let repo = UserRepository::new(db);
    repo.lock(user.id, until).await?;

    let stored = repo.find_by_id(user.id).await?.unwrap();
    assert_eq!(stored.failed_login_attempts, 0);
    assert!(stored.is_locked(Utc::now()));

    Ok(())
}

/// Tests that a successful login clears the lockout state.
///
/// Expected: attempts reset, lock cleared, last_login_at stamped
#[tokio::test]
async fn successful_login_resets_state() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .failed_login_attempts(3)
        .locked_until(Utc::now() - Duration::minutes(1))
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let now = Utc::now();
    let updated = repo.record_successful_login(user.id, now).await?.unwrap();

    assert_eq!(updated.failed_login_attempts, 0);
    assert!(updated.locked_until.is_none());
    assert!(updated.last_login_at.is_some());

    Ok(())
}

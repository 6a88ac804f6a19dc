use super::*;

/// Tests creating a user account.
///
/// Verifies that the repository stores the given fields and starts the account
/// with no failed logins and no lock.
///
/// Expected: Ok(User) with a clean lockout state
#[tokio::test]
async fn creates_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.create(params("alice", "alice@example.com")).await?;

    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.role, UserRole::User);
    assert_eq!(user.failed_login_attempts, 0);
    assert!(user.locked_until.is_none());
    assert!(user.last_login_at.is_none());

    Ok(())
}

/// Tests the unique constraint on email.
///
/// Expected: Err on the second insert
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(params("alice", "same@example.com")).await?;
    let result = repo.create(params("bob", "same@example.com")).await;

    assert!(result.is_err());
    assert!(repo.email_exists("same@example.com").await?);
    assert!(repo.username_exists("alice").await?);
    assert!(!repo.username_exists("bob").await?);

    Ok(())
}

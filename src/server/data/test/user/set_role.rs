use super::*;

/// Tests promoting a user to admin.
///
/// Expected: Ok(Some(User)) with the admin role, Ok(None) for unknown ids
#[tokio::test]
async fn updates_role() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    let updated = repo.set_role(user.id, UserRole::Admin).await?.unwrap();
    assert!(updated.is_admin());

    assert!(repo.set_role(9999, UserRole::Admin).await?.is_none());

    Ok(())
}

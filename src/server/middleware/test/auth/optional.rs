use super::*;

/// Tests anonymous requests.
///
/// Expected: Ok(None)
#[tokio::test]
async fn anonymous_request_has_no_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();
    let headers = HeaderMap::new();

    assert!(AuthGuard::new(db, &tokens, &headers).optional().await?.is_none());

    Ok(())
}

/// Tests that a present but broken token is not silently ignored.
///
/// Expected: Err(AuthError::InvalidToken) for a bad scheme and a forged token
#[tokio::test]
async fn rejects_malformed_tokens() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let basic = header("Basic dXNlcjpwYXNz");
    let forged = header("Bearer abc.def.ghi");

    assert!(matches!(
        AuthGuard::new(db, &tokens, &basic).optional().await,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));
    assert!(matches!(
        AuthGuard::new(db, &tokens, &forged).optional().await,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}

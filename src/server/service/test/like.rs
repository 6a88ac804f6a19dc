use chrono::Utc;
use entity::view_event::ContentKind;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::AppError,
    model::like::Liker,
    service::{comic::ComicService, like::LikeService},
};

/// Tests likes from users and visitors.
///
/// Expected: repeats do not change the count, unlike of a non-liker is a no-op
#[tokio::test]
async fn likes_count_distinct_likers() -> Result<(), AppError> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let comic = factory::create_comic(db).await?;
    let service = LikeService::new(db);
    let user = Liker::User(1);
    let visitor = Liker::Visitor("abc".to_string());

    let first = service.like(ContentKind::Comic, comic.id, &user).await?;
    assert!(first.changed);
    assert_eq!(first.likes, 1);

    let repeat = service.like(ContentKind::Comic, comic.id, &user).await?;
    assert!(!repeat.changed);
    assert_eq!(repeat.likes, 1);

    let second = service.like(ContentKind::Comic, comic.id, &visitor).await?;
    assert_eq!(second.likes, 2);

    let status = service.status(ContentKind::Comic, comic.id, &visitor).await?;
    assert!(status.liked);

    let stranger = service
        .unlike(ContentKind::Comic, comic.id, &Liker::User(99))
        .await?;
    assert!(!stranger.changed);
    assert_eq!(stranger.likes, 2);

    let removed = service.unlike(ContentKind::Comic, comic.id, &user).await?;
    assert!(removed.changed);
    assert_eq!(removed.likes, 1);

    Ok(())
}

/// Tests liking deleted or missing content.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn deleted_content_cannot_be_liked() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let comic = factory::create_comic(db).await?;
    ComicService::new(db).delete(comic.id, Utc::now()).await?;

    let service = LikeService::new(db);
    let liker = Liker::User(1);

    assert!(matches!(
        service.like(ContentKind::Comic, comic.id, &liker).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.like(ContentKind::BlogPost, 12345, &liker).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

use crate::server::data::like::LikeRepository;
use entity::view_event::ContentKind;
use sea_orm::{DbErr, TransactionTrait};
use test_utils::{builder::TestBuilder, factory};

/// Tests that liking twice counts once.
///
/// Expected: first like changes state, second is a no-op, counter is 1
#[tokio::test]
async fn like_is_idempotent() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let comic = factory::create_comic(db).await?;

    let repo = LikeRepository::new(db);
    assert!(repo.like(ContentKind::Comic, comic.id, "user:1").await?);
    assert!(!repo.like(ContentKind::Comic, comic.id, "user:1").await?);

    assert_eq!(repo.likes(ContentKind::Comic, comic.id).await?, Some(1));
    assert!(repo.has_liked(ContentKind::Comic, comic.id, "user:1").await?);
    assert!(!repo.has_liked(ContentKind::Comic, comic.id, "user:2").await?);

    Ok(())
}

/// Tests unliking without a prior like.
///
/// Expected: no-op returning false with the counter untouched
#[tokio::test]
async fn unlike_without_like_is_noop() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_blog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let post = factory::create_blog_post(db).await?;

    let repo = LikeRepository::new(db);
    assert!(!repo.unlike(ContentKind::BlogPost, post.id, "visitor:abc").await?);
    assert_eq!(repo.likes(ContentKind::BlogPost, post.id).await?, Some(0));

    Ok(())
}

/// Tests that the counter tracks the set of likers through a mixed sequence.
///
/// Expected: likes equals the number of distinct current likers after each step
#[tokio::test]
async fn counter_matches_likers() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_blog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let post = factory::create_blog_post(db).await?;
    let kind = ContentKind::BlogPost;

    let steps: [(bool, &str, i64); 6] = [
        (true, "user:1", 1),
        (true, "visitor:a", 2),
        (true, "user:1", 2),
        (false, "user:1", 1),
        (false, "user:1", 1),
        (false, "visitor:a", 0),
    ];

    for (like, liker, expected) in steps {
        let txn = db.begin().await?;
        let repo = LikeRepository::new(&txn);
        if like {
            repo.like(kind, post.id, liker).await?;
        } else {
            repo.unlike(kind, post.id, liker).await?;
        }
        txn.commit().await?;

        let repo = LikeRepository::new(db);
        assert_eq!(repo.likes(kind, post.id).await?, Some(expected));
    }

    Ok(())
}

/// Tests reading the counter of a missing row.
///
/// Expected: Ok(None)
#[tokio::test]
async fn likes_of_missing_content_is_none() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LikeRepository::new(db);
    assert_eq!(repo.likes(ContentKind::Comic, 9999).await?, None);

    Ok(())
}

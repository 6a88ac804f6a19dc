use super::*;
use sea_orm::EntityTrait;

/// Tests deleting a user who authored posts.
///
/// Verifies that the posts survive with no author.
///
/// Expected: Ok(true) and author_id cleared
#[tokio::test]
async fn deletes_user_and_detaches_posts() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_blog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let post = factory::blog_post::BlogPostFactory::new(db)
        .author_id(user.id)
        .build()
        .await?;

    let repo = UserRepository::new(db);
    assert!(repo.delete(user.id).await?);
    assert!(!repo.delete(user.id).await?);

    let stored = entity::prelude::BlogPost::find_by_id(post.id)
        .one(db)
        .await?
        .unwrap();
    assert!(stored.author_id.is_none());

    Ok(())
}

use super::*;

/// Tests deleting a category referenced by posts.
///
/// Expected: Ok(true) and the post's category_id cleared
#[tokio::test]
async fn deletes_category_and_detaches_posts() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_blog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let category = factory::create_category(db).await?;
    let post = factory::blog_post::BlogPostFactory::new(db)
        .category_id(category.id)
        .build()
        .await?;

    let repo = CategoryRepository::new(db);
    assert!(repo.delete(category.id).await?);

    let stored = entity::prelude::BlogPost::find_by_id(post.id)
        .one(db)
        .await?
        .unwrap();
    assert!(stored.category_id.is_none());

    Ok(())
}

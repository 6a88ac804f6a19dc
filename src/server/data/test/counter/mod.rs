use crate::server::data::counter::CounterRepository;
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

/// Tests reconciling drifted counters.
///
/// Verifies that genre, tag and category counters are rewritten to the number of
/// non-deleted referencing rows, and that only drifted rows are reported.
///
/// Expected: one correction per collection, correct stored values
#[tokio::test]
async fn recounts_drifted_counters() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let genre = factory::genre::GenreFactory::new(db).comic_count(10).build().await?;
    let accurate = factory::genre::GenreFactory::new(db).comic_count(0).build().await?;
    let tag = factory::create_tag(db).await?;
    let category = factory::category::CategoryFactory::new(db)
        .post_count(3)
        .build()
        .await?;

    factory::comic::ComicFactory::new(db)
        .genre_id(genre.id)
        .tag(tag.id)
        .build()
        .await?;
    factory::comic::ComicFactory::new(db)
        .genre_id(genre.id)
        .tag(tag.id)
        .deleted()
        .build()
        .await?;
    factory::blog_post::BlogPostFactory::new(db)
        .category_id(category.id)
        .build()
        .await?;

    let repo = CounterRepository::new(db);
    let report = repo.recount().await?;

    assert_eq!(report.genres, 1);
    assert_eq!(report.tags, 1);
    assert_eq!(report.categories, 1);

    let genre = entity::prelude::Genre::find_by_id(genre.id).one(db).await?.unwrap();
    let accurate = entity::prelude::Genre::find_by_id(accurate.id).one(db).await?.unwrap();
    let tag = entity::prelude::Tag::find_by_id(tag.id).one(db).await?.unwrap();
    let category = entity::prelude::Category::find_by_id(category.id)
        .one(db)
        .await?
        .unwrap();

    assert_eq!(genre.comic_count, 1);
    assert_eq!(accurate.comic_count, 0);
    assert_eq!(tag.comic_count, 1);
    assert_eq!(category.post_count, 1);

    let again = repo.recount().await?;
    assert_eq!(again.total(), 0);

    Ok(())
}

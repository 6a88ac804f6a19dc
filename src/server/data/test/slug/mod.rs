use crate::server::data::slug::available_slug;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

/// Tests that soft-deleted rows still reserve their slug.
///
/// Expected: the next colliding title is suffixed
#[tokio::test]
async fn deleted_rows_reserve_slug() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::comic::ComicFactory::new(db)
        .slug("night-shift")
        .deleted()
        .build()
        .await?;

    let slug = available_slug::<entity::prelude::Comic, _>(
        db,
        entity::comic::Column::Slug,
        entity::comic::Column::Id,
        "Night Shift",
        None,
    )
    .await?;

    assert_eq!(slug, "night-shift-1");

    Ok(())
}

/// Tests that colliding titles never share a slug.
///
/// Expected: base, base-1, base-2
#[tokio::test]
async fn probes_until_free() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let mut slugs = Vec::new();
    for _ in 0..3 {
        let slug = available_slug::<entity::prelude::Comic, _>(
            db,
            entity::comic::Column::Slug,
            entity::comic::Column::Id,
            "Same Title",
            None,
        )
        .await?;
        factory::comic::ComicFactory::new(db)
            .slug(slug.clone())
            .build()
            .await?;
        slugs.push(slug);
    }

    assert_eq!(slugs, vec!["same-title", "same-title-1", "same-title-2"]);

    Ok(())
}

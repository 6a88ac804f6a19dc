use crate::server::{
    data::{analytics::AnalyticsRepository, like::LikeRepository, view::ViewEventRepository},
    model::analytics::AnalyticsWindow,
};
use chrono::{Duration, Utc};
use entity::view_event::ContentKind;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

/// Tests window counts for comics.
///
/// Expected: deleted comics excluded, creations split into current and previous windows
#[tokio::test]
async fn counts_comics_per_window() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    factory::comic::ComicFactory::new(db)
        .created_at(now - Duration::days(2))
        .build()
        .await?;
    factory::comic::ComicFactory::new(db)
        .created_at(now - Duration::days(3))
        .build()
        .await?;
    factory::comic::ComicFactory::new(db)
        .created_at(now - Duration::days(10))
        .build()
        .await?;
    factory::comic::ComicFactory::new(db)
        .created_at(now - Duration::days(1))
        .deleted()
        .build()
        .await?;

    let window = AnalyticsWindow::new(Some(7), now).unwrap();
    let repo = AnalyticsRepository::new(db);
    let metric = repo.comic_metric(&window).await?;

    assert_eq!(metric.total, 3);
    assert_eq!(metric.current, 2);
    assert_eq!(metric.previous, 1);
    assert_eq!(metric.trend(), 100.0);

    Ok(())
}

/// Tests the like and view metrics.
///
/// Expected: totals sum the counters, window counts follow like rows and view events
#[tokio::test]
async fn sums_likes_and_views() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let comic = factory::comic::ComicFactory::new(db).views(4).build().await?;
    let post = factory::blog_post::BlogPostFactory::new(db).views(6).build().await?;

    let likes = LikeRepository::new(db);
    likes.like(ContentKind::Comic, comic.id, "user:1").await?;
    likes.like(ContentKind::BlogPost, post.id, "user:1").await?;

    let views = ViewEventRepository::new(db);
    views.record(ContentKind::Comic, comic.id, now - Duration::hours(1)).await?;
    views
        .record(ContentKind::BlogPost, post.id, now - Duration::days(10))
        .await?;

    let window = AnalyticsWindow::new(Some(7), now + Duration::seconds(1)).unwrap();
    let repo = AnalyticsRepository::new(db);

    let like_metric = repo.like_metric(&window).await?;
    assert_eq!(like_metric.total, 2);
    assert_eq!(like_metric.current, 2);
    assert_eq!(like_metric.previous, 0);

    let view_metric = repo.view_metric(&window).await?;
    assert_eq!(view_metric.total, 10);
    assert_eq!(view_metric.current, 1);
    assert_eq!(view_metric.previous, 1);

    Ok(())
}

/// Tests that likes on soft-deleted content stay out of the like metric.
///
/// Expected: total and window counts both cover live content only
#[tokio::test]
async fn like_metric_ignores_deleted_content() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let live = factory::comic::ComicFactory::new(db).build().await?;
    let deleted = factory::comic::ComicFactory::new(db).deleted().build().await?;
    let deleted_post = factory::blog_post::BlogPostFactory::new(db)
        .deleted()
        .build()
        .await?;

    let likes = LikeRepository::new(db);
    likes.like(ContentKind::Comic, live.id, "user:1").await?;
    likes.like(ContentKind::Comic, deleted.id, "user:1").await?;
    likes.like(ContentKind::BlogPost, deleted_post.id, "user:1").await?;

    let window = AnalyticsWindow::new(Some(7), now + Duration::seconds(1)).unwrap();
    let metric = AnalyticsRepository::new(db).like_metric(&window).await?;

    assert_eq!(metric.total, 1);
    assert_eq!(metric.current, 1);
    assert_eq!(metric.previous, 0);

    Ok(())
}

/// Tests top content ordering.
///
/// Expected: most viewed first, deleted comics excluded
#[tokio::test]
async fn ranks_top_comics() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let low = factory::comic::ComicFactory::new(db).views(1).build().await?;
    let high = factory::comic::ComicFactory::new(db).views(100).build().await?;
    factory::comic::ComicFactory::new(db)
        .views(1000)
        .deleted()
        .build()
        .await?;

    let repo = AnalyticsRepository::new(db);
    let top = repo.top_comics(entity::comic::Column::Views, 5).await?;

    let ids: Vec<_> = top.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![high.id, low.id]);

    Ok(())
}

/// Tests the per-day activity series.
///
/// Expected: one point per day with zero days included
#[tokio::test]
async fn builds_daily_activity() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    factory::comic::ComicFactory::new(db).created_at(now).build().await?;
    factory::create_user(db).await?;
    factory::subscriber::SubscriberFactory::new(db)
        .subscribed_at(now - Duration::days(30))
        .build()
        .await?;

    let window = AnalyticsWindow::new(Some(5), now).unwrap();
    let repo = AnalyticsRepository::new(db);
    let points = repo.activity(&window).await?;

    assert_eq!(points.len(), 5);
    let today = points.last().unwrap();
    assert_eq!(today.date, now.date_naive());
    assert_eq!(today.comics, 1);
    assert_eq!(today.users, 1);
    assert_eq!(points.iter().map(|p| p.subscribers).sum::<i64>(), 0);
    assert!(points[..4].iter().all(|p| p.comics == 0));

    Ok(())
}

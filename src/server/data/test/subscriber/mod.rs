use crate::server::{
    data::subscriber::SubscriberRepository,
    model::subscriber::{SubscribeParams, SubscriberFilter},
    util::pagination::PageRequest,
};
use chrono::Utc;
use entity::subscriber::SubscriberStatus;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

/// Tests subscribing, unsubscribing and reactivating an address.
///
/// Expected: status flips and the token is replaced on reactivation
#[tokio::test]
async fn subscription_lifecycle() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Subscriber)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SubscriberRepository::new(db);
    let subscriber = repo
        .create(
            SubscribeParams {
                email: "fan@example.com".to_string(),
                name: Some("Fan".to_string()),
            },
            "first-token".to_string(),
        )
        .await?;
    assert!(subscriber.is_active());

    repo.mark_unsubscribed(subscriber.id, Utc::now()).await?;
    let stored = repo.find_by_token("first-token").await?.unwrap();
    assert_eq!(stored.status, SubscriberStatus::Unsubscribed);
    assert!(stored.unsubscribed_at.is_some());

    let reactivated = repo
        .reactivate(subscriber.id, None, "second-token".to_string())
        .await?
        .unwrap();
    assert!(reactivated.is_active());
    assert_eq!(reactivated.name.as_deref(), Some("Fan"));
    assert!(reactivated.unsubscribed_at.is_none());
    assert!(repo.find_by_token("first-token").await?.is_none());

    Ok(())
}

/// Tests the admin listing filters.
///
/// Expected: status and search narrow the result
#[tokio::test]
async fn filters_by_status_and_search() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Subscriber)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::subscriber::SubscriberFactory::new(db)
        .email("ann@comics.test")
        .build()
        .await?;
    factory::subscriber::SubscriberFactory::new(db)
        .email("bob@comics.test")
        .unsubscribed()
        .build()
        .await?;
    factory::subscriber::SubscriberFactory::new(db)
        .email("cy@elsewhere.test")
        .build()
        .await?;

    let repo = SubscriberRepository::new(db);

    let active = SubscriberFilter {
        status: Some(SubscriberStatus::Active),
        search: None,
    };
    let (_, total) = repo.get_paginated(&active, PageRequest::default()).await?;
    assert_eq!(total, 2);

    let search = SubscriberFilter {
        status: None,
        search: Some("comics".to_string()),
    };
    let (subscribers, total) = repo.get_paginated(&search, PageRequest::default()).await?;
    assert_eq!(total, 2);
    assert!(subscribers.iter().all(|s| s.email.ends_with("@comics.test")));

    Ok(())
}

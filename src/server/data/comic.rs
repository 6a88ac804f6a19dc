//! Comic data repository.
//!
//! Comics are always returned with their genre and tags resolved. Tag links live in the
//! `comic_tag` join table; the repository replaces them wholesale on update. Counter
//! maintenance for genres and tags is the caller's job so it can share a transaction.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use entity::comic::ComicStatus;
use sea_orm::{
    sea_query::Query, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use crate::server::{
    data::{counter, slug::available_slug},
    model::{
        comic::{Comic, ComicFilter, CreateComicParams, UpdateComicParams},
        sort::ContentSort,
    },
    util::pagination::PageRequest,
};

pub struct ComicRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ComicRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn available_slug(&self, title: &str, exclude_id: Option<i32>) -> Result<String, DbErr> {
        available_slug::<entity::prelude::Comic, C>(
            self.db,
            entity::comic::Column::Slug,
            entity::comic::Column::Id,
            title,
            exclude_id,
        )
        .await
    }

    /// Inserts a comic and links its tags.
    ///
    /// `published_at` is stamped when the comic is created as published.
    ///
    /// # Arguments
    /// - `params` - Validated comic fields and tag ids
    /// - `slug` - Free slug reserved by the caller
    ///
    /// # Returns
    /// - `Ok(Comic)` - Created comic with genre and tags resolved
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, params: CreateComicParams, slug: String) -> Result<Comic, DbErr> {
        let now = Utc::now();
        let published_at = (params.status == ComicStatus::Published).then_some(now);

        let comic = entity::comic::ActiveModel {
            title: ActiveValue::Set(params.title),
            slug: ActiveValue::Set(slug),
            description: ActiveValue::Set(params.description),
            author: ActiveValue::Set(params.author),
            cover_image_url: ActiveValue::Set(params.cover_image_url),
            genre_id: ActiveValue::Set(params.genre_id),
            status: ActiveValue::Set(params.status),
            views: ActiveValue::Set(0),
            likes: ActiveValue::Set(0),
            published_at: ActiveValue::Set(published_at),
            deleted_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.replace_tags(comic.id, &params.tag_ids).await?;

        let mut comics = self.load_relations(vec![comic]).await?;
        comics.pop().ok_or(DbErr::RecordNotFound(
            "Comic not found after creation".to_string(),
        ))
    }

    /// Finds a comic by id, including soft-deleted ones.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Comic>, DbErr> {
        let Some(comic) = entity::prelude::Comic::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        Ok(self.load_relations(vec![comic]).await?.pop())
    }

    /// Finds a comic by slug, including soft-deleted ones.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Comic>, DbErr> {
        let Some(comic) = entity::prelude::Comic::find()
            .filter(entity::comic::Column::Slug.eq(slug))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        Ok(self.load_relations(vec![comic]).await?.pop())
    }

    /// Whether a comic exists and is not soft-deleted.
    pub async fn exists_live(&self, id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Comic::find()
            .filter(entity::comic::Column::Id.eq(id))
            .filter(entity::comic::Column::DeletedAt.is_null())
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Ids of the tags linked to a comic, ascending.
    pub async fn tag_ids(&self, comic_id: i32) -> Result<Vec<i32>, DbErr> {
        let links = entity::prelude::ComicTag::find()
            .filter(entity::comic_tag::Column::ComicId.eq(comic_id))
            .order_by_asc(entity::comic_tag::Column::TagId)
            .all(self.db)
            .await?;

        Ok(links.into_iter().map(|link| link.tag_id).collect())
    }

    /// Gets a page of comics matching `filter`.
    ///
    /// An unknown genre or tag slug yields an empty page rather than an error.
    ///
    /// # Returns
    /// - `Ok((comics, total))` - Comics for the requested page and the total match count
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_paginated(
        &self,
        filter: &ComicFilter,
        page: PageRequest,
    ) -> Result<(Vec<Comic>, u64), DbErr> {
        let mut query = entity::prelude::Comic::find();

        if filter.public_only {
            query = query
                .filter(entity::comic::Column::Status.eq(ComicStatus::Published))
                .filter(entity::comic::Column::DeletedAt.is_null());
        } else {
            query = if filter.deleted {
                query.filter(entity::comic::Column::DeletedAt.is_not_null())
            } else {
                query.filter(entity::comic::Column::DeletedAt.is_null())
            };
            if let Some(status) = filter.status {
                query = query.filter(entity::comic::Column::Status.eq(status));
            }
        }

        if let Some(slug) = &filter.genre_slug {
            let Some(genre) = entity::prelude::Genre::find()
                .filter(entity::genre::Column::Slug.eq(slug.as_str()))
                .one(self.db)
                .await?
            else {
                return Ok((Vec::new(), 0));
            };
            query = query.filter(entity::comic::Column::GenreId.eq(genre.id));
        }

        if let Some(slug) = &filter.tag_slug {
            let Some(tag) = entity::prelude::Tag::find()
                .filter(entity::tag::Column::Slug.eq(slug.as_str()))
                .one(self.db)
                .await?
            else {
                return Ok((Vec::new(), 0));
            };
            query = query.filter(
                entity::comic::Column::Id.in_subquery(
                    Query::select()
                        .column(entity::comic_tag::Column::ComicId)
                        .from(entity::prelude::ComicTag)
                        .and_where(entity::comic_tag::Column::TagId.eq(tag.id))
                        .to_owned(),
                ),
            );
        }

        if let Some(search) = &filter.search {
            query = query.filter(entity::comic::Column::Title.contains(search.as_str()));
        }

        let paginator = sorted(query, filter.sort).paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.index()).await?;
        let comics = self.load_relations(entities).await?;

        Ok((comics, total))
    }

    /// Applies a partial update.
    ///
    /// # Arguments
    /// - `id` - Comic id
    /// - `params` - Changed fields; tag links are replaced when `tag_ids` is set
    /// - `slug` - Regenerated slug when the title changed
    ///
    /// # Returns
    /// - `Ok(Some(Comic))` - Updated comic
    /// - `Ok(None)` - No comic with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(
        &self,
        id: i32,
        params: UpdateComicParams,
        slug: Option<String>,
    ) -> Result<Option<Comic>, DbErr> {
        let Some(comic) = entity::prelude::Comic::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        let first_publish = params.status == Some(ComicStatus::Published) && comic.published_at.is_none();

        let mut active_model: entity::comic::ActiveModel = comic.into();
        if let Some(title) = params.title {
            active_model.title = ActiveValue::Set(title);
        }
        if let Some(slug) = slug {
            active_model.slug = ActiveValue::Set(slug);
        }
        if let Some(description) = params.description {
            active_model.description = ActiveValue::Set(description);
        }
        if let Some(author) = params.author {
            active_model.author = ActiveValue::Set(author);
        }
        if let Some(cover_image_url) = params.cover_image_url {
            active_model.cover_image_url = ActiveValue::Set(cover_image_url);
        }
        if let Some(genre_id) = params.genre_id {
            active_model.genre_id = ActiveValue::Set(genre_id);
        }
        if let Some(status) = params.status {
            active_model.status = ActiveValue::Set(status);
        }
        if first_publish {
            active_model.published_at = ActiveValue::Set(Some(now));
        }
        active_model.updated_at = ActiveValue::Set(now);

        let entity = active_model.update(self.db).await?;

        if let Some(tag_ids) = params.tag_ids {
            self.replace_tags(id, &tag_ids).await?;
        }

        Ok(self.load_relations(vec![entity]).await?.pop())
    }

    /// Sets or clears `deleted_at`.
    ///
    /// # Returns
    /// - `Ok(true)` - Row updated
    /// - `Ok(false)` - No comic with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_deleted_at(
        &self,
        id: i32,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::Comic::update_many()
            .set(entity::comic::ActiveModel {
                deleted_at: ActiveValue::Set(deleted_at),
                updated_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            })
            .filter(entity::comic::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn increment_views(&self, id: i32) -> Result<(), DbErr> {
        counter::increment::<entity::prelude::Comic, C>(
            self.db,
            entity::comic::Column::Views,
            entity::comic::Column::Id,
            &[id],
        )
        .await?;
        Ok(())
    }

    async fn replace_tags(&self, comic_id: i32, tag_ids: &[i32]) -> Result<(), DbErr> {
        entity::prelude::ComicTag::delete_many()
            .filter(entity::comic_tag::Column::ComicId.eq(comic_id))
            .exec(self.db)
            .await?;

        for tag_id in tag_ids {
            entity::comic_tag::ActiveModel {
                comic_id: ActiveValue::Set(comic_id),
                tag_id: ActiveValue::Set(*tag_id),
            }
            .insert(self.db)
            .await?;
        }

        Ok(())
    }

    /// Resolves genre and tags for a batch of comics, keeping the input order.
    async fn load_relations(&self, comics: Vec<entity::comic::Model>) -> Result<Vec<Comic>, DbErr> {
        if comics.is_empty() {
            return Ok(Vec::new());
        }

        let comic_ids: Vec<i32> = comics.iter().map(|c| c.id).collect();
        let genre_ids: Vec<i32> = comics.iter().filter_map(|c| c.genre_id).collect();

        let genres: HashMap<i32, entity::genre::Model> = if genre_ids.is_empty() {
            HashMap::new()
        } else {
            entity::prelude::Genre::find()
                .filter(entity::genre::Column::Id.is_in(genre_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|g| (g.id, g))
                .collect()
        };

        let links = entity::prelude::ComicTag::find()
            .filter(entity::comic_tag::Column::ComicId.is_in(comic_ids))
            .all(self.db)
            .await?;

        let tag_ids: Vec<i32> = links.iter().map(|l| l.tag_id).collect();
        let tags: HashMap<i32, entity::tag::Model> = if tag_ids.is_empty() {
            HashMap::new()
        } else {
            entity::prelude::Tag::find()
                .filter(entity::tag::Column::Id.is_in(tag_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|t| (t.id, t))
                .collect()
        };

        let mut tags_by_comic: HashMap<i32, Vec<entity::tag::Model>> = HashMap::new();
        for link in links {
            if let Some(tag) = tags.get(&link.tag_id) {
                tags_by_comic
                    .entry(link.comic_id)
                    .or_default()
                    .push(tag.clone());
            }
        }

        Ok(comics
            .into_iter()
            .map(|comic| {
                let genre = comic.genre_id.and_then(|id| genres.get(&id).cloned());
                let mut comic_tags = tags_by_comic.remove(&comic.id).unwrap_or_default();
                comic_tags.sort_by(|a, b| a.name.cmp(&b.name));
                Comic::from_parts(comic, genre, comic_tags)
            })
            .collect())
    }
}

fn sorted(query: Select<entity::prelude::Comic>, sort: ContentSort) -> Select<entity::prelude::Comic> {
    use entity::comic::Column;

    match sort {
        ContentSort::Newest => query
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id),
        ContentSort::Oldest => query
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id),
        ContentSort::Popular => query
            .order_by_desc(Column::Views)
            .order_by_desc(Column::Id),
        ContentSort::Liked => query
            .order_by_desc(Column::Likes)
            .order_by_desc(Column::Id),
        ContentSort::Title => query.order_by_asc(Column::Title).order_by_asc(Column::Id),
    }
}

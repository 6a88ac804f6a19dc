use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::comic::{ComicPage, UpdateComicPageParams};

pub struct ComicPageRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ComicPageRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Pages of a comic ordered by page number.
    pub async fn get_by_comic_id(&self, comic_id: i32) -> Result<Vec<ComicPage>, DbErr> {
        let entities = entity::prelude::ComicPage::find()
            .filter(entity::comic_page::Column::ComicId.eq(comic_id))
            .order_by_asc(entity::comic_page::Column::PageNumber)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(ComicPage::from_entity).collect())
    }

    /// Finds a page by id, scoped to its comic.
    pub async fn find(&self, comic_id: i32, page_id: i32) -> Result<Option<ComicPage>, DbErr> {
        let entity = entity::prelude::ComicPage::find_by_id(page_id)
            .filter(entity::comic_page::Column::ComicId.eq(comic_id))
            .one(self.db)
            .await?;

        Ok(entity.map(ComicPage::from_entity))
    }

    /// Highest page number of a comic, `None` when it has no pages.
    pub async fn last_page_number(&self, comic_id: i32) -> Result<Option<i32>, DbErr> {
        let last = entity::prelude::ComicPage::find()
            .filter(entity::comic_page::Column::ComicId.eq(comic_id))
            .order_by_desc(entity::comic_page::Column::PageNumber)
            .one(self.db)
            .await?;

        Ok(last.map(|page| page.page_number))
    }

    /// Whether `page_number` is used by a page of the comic other than `exclude_id`.
    pub async fn page_number_taken(
        &self,
        comic_id: i32,
        page_number: i32,
        exclude_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query = entity::prelude::ComicPage::find()
            .filter(entity::comic_page::Column::ComicId.eq(comic_id))
            .filter(entity::comic_page::Column::PageNumber.eq(page_number));
        if let Some(id) = exclude_id {
            query = query.filter(entity::comic_page::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    pub async fn create(
        &self,
        comic_id: i32,
        page_number: i32,
        image_url: String,
        caption: Option<String>,
    ) -> Result<ComicPage, DbErr> {
        let entity = entity::comic_page::ActiveModel {
            comic_id: ActiveValue::Set(comic_id),
            page_number: ActiveValue::Set(page_number),
            image_url: ActiveValue::Set(image_url),
            caption: ActiveValue::Set(caption),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(ComicPage::from_entity(entity))
    }

    /// Applies a partial update.
    ///
    /// # Returns
    /// - `Ok(Some(ComicPage))` - Updated page
    /// - `Ok(None)` - No such page on that comic
    /// - `Err(DbErr)` - Database error, including a duplicate page number
    pub async fn update(
        &self,
        comic_id: i32,
        page_id: i32,
        params: UpdateComicPageParams,
    ) -> Result<Option<ComicPage>, DbErr> {
        let Some(page) = entity::prelude::ComicPage::find_by_id(page_id)
            .filter(entity::comic_page::Column::ComicId.eq(comic_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::comic_page::ActiveModel = page.clone().into();
        if let Some(page_number) = params.page_number {
            active_model.page_number = ActiveValue::Set(page_number);
        }
        if let Some(image_url) = params.image_url {
            active_model.image_url = ActiveValue::Set(image_url);
        }
        if let Some(caption) = params.caption {
            active_model.caption = ActiveValue::Set(caption);
        }
        if !active_model.is_changed() {
            return Ok(Some(ComicPage::from_entity(page)));
        }

        let entity = active_model.update(self.db).await?;

        Ok(Some(ComicPage::from_entity(entity)))
    }

    pub async fn delete(&self, comic_id: i32, page_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::ComicPage::delete_many()
            .filter(entity::comic_page::Column::Id.eq(page_id))
            .filter(entity::comic_page::Column::ComicId.eq(comic_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

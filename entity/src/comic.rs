use sea_orm::entity::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ComicStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "archived")]
    Archived,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comic")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub author: String,
    pub cover_image_url: Option<String>,
    pub genre_id: Option<i32>,
    pub status: ComicStatus,
    pub views: i64,
    pub likes: i64,
    pub published_at: Option<DateTimeUtc>,
    pub deleted_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::genre::Entity",
        from = "Column::GenreId",
        to = "super::genre::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Genre,
    #[sea_orm(has_many = "super::comic_page::Entity")]
    ComicPage,
    #[sea_orm(has_many = "super::comic_tag::Entity")]
    ComicTag,
    #[sea_orm(has_many = "super::comic_like::Entity")]
    ComicLike,
}

impl Related<super::genre::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Genre.def()
    }
}

impl Related<super::comic_page::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ComicPage.def()
    }
}

impl Related<super::comic_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ComicTag.def()
    }
}

impl Related<super::comic_like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ComicLike.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tag")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    /// Number of non-deleted comics carrying this tag.
    pub comic_count: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::comic_tag::Entity")]
    ComicTag,
}

impl Related<super::comic_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ComicTag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

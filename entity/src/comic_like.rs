use sea_orm::entity::prelude::*;

/// One row per liker of a comic; the composite key makes likes idempotent.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comic_like")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub comic_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub liker: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::comic::Entity",
        from = "Column::ComicId",
        to = "super::comic::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Comic,
}

impl Related<super::comic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comic.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ContentKind {
    #[sea_orm(string_value = "comic")]
    Comic,
    #[sea_orm(string_value = "blog_post")]
    BlogPost,
}

/// A single qualifying read of a comic or blog post, kept for view trends.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "view_event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub content_kind: ContentKind,
    pub content_id: i32,
    pub viewed_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

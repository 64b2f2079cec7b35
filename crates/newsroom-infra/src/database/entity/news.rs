//! News entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "news")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain News.
impl From<Model> for newsroom_core::domain::News {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            text: model.text,
            date: model.date,
        }
    }
}

/// Conversion from Domain News to SeaORM ActiveModel.
impl From<newsroom_core::domain::News> for ActiveModel {
    fn from(news: newsroom_core::domain::News) -> Self {
        Self {
            id: Set(news.id),
            title: Set(news.title),
            text: Set(news.text),
            date: Set(news.date),
        }
    }
}

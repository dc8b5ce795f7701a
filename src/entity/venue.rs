use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "venue")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    /// JSON-serialized list of genre tags.
    #[sea_orm(column_type = "Text")]
    pub genres: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,

    pub created_date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::show::Entity")]
    Show,
}

impl Related<super::show::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Show.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

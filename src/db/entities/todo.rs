use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    pub text: String,
    #[sea_orm(default_value = false)]
    pub checked: bool,
    #[sea_orm(indexed)]
    pub list_id: i64,
    #[sea_orm(belongs_to, from = "list_id", to = "id", on_delete = "Cascade")]
    pub list: HasOne<super::list::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}

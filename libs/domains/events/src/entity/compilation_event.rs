use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the compilation_events link table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "compilation_events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub compilation_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub event_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn link(compilation_id: i64, event_id: i64) -> ActiveModel {
    ActiveModel {
        compilation_id: Set(compilation_id),
        event_id: Set(event_id),
    }
}

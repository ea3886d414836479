use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the hits table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "hits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub app: String,
    pub uri: String,
    pub ip: String,
    pub timestamp: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::EndpointHit {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            app: model.app,
            uri: model.uri,
            ip: model.ip,
            timestamp: model.timestamp,
        }
    }
}

impl From<crate::models::EndpointHit> for ActiveModel {
    fn from(hit: crate::models::EndpointHit) -> Self {
        Self {
            id: NotSet,
            app: Set(hit.app),
            uri: Set(hit.uri),
            ip: Set(hit.ip),
            timestamp: Set(hit.timestamp),
        }
    }
}

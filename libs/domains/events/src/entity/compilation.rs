use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::Compilation;

/// Sea-ORM Entity for the compilations table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "compilations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub pinned: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_compilation(self, event_ids: Vec<i64>) -> Compilation {
        Compilation {
            id: self.id,
            title: self.title,
            pinned: self.pinned,
            event_ids,
        }
    }
}

impl From<&Compilation> for ActiveModel {
    fn from(compilation: &Compilation) -> Self {
        Self {
            id: if compilation.id == 0 {
                NotSet
            } else {
                Set(compilation.id)
            },
            title: Set(compilation.title.clone()),
            pinned: Set(compilation.pinned),
        }
    }
}

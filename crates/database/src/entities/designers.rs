use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Instructional designers
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "designers_instrucionais")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nome: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::offerings::Entity")]
    Offerings,
}

impl Related<super::offerings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Offerings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for models::catalog::Designer {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            nome: model.nome,
        }
    }
}

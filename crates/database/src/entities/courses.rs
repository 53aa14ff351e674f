use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cursos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub eixo: String,
    pub nome: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_disciplines::Entity")]
    CourseDisciplines,
}

impl Related<super::course_disciplines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseDisciplines.def()
    }
}

// Many-to-many relationship with disciplines
impl Related<super::disciplines::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_disciplines::Relation::Discipline.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_disciplines::Relation::Course.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for models::catalog::Course {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            eixo: model.eixo,
            nome: model.nome,
        }
    }
}

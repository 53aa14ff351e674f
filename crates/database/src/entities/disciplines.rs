use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "disciplinas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub codigo: String,
    pub nome: String,
    pub carga_horaria: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_disciplines::Entity")]
    CourseDisciplines,
    #[sea_orm(has_many = "super::offerings::Entity")]
    Offerings,
}

impl Related<super::course_disciplines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseDisciplines.def()
    }
}

impl Related<super::offerings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Offerings.def()
    }
}

// Many-to-many relationship with courses
impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_disciplines::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_disciplines::Relation::Discipline.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for models::catalog::Discipline {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            codigo: model.codigo,
            nome: model.nome,
            carga_horaria: model.carga_horaria,
        }
    }
}

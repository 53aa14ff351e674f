use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ofertas_disciplinas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub disciplina_id: i32,
    pub ano: Option<i32>,
    pub bimestre_operacional: Option<i32>,
    pub professor_id: Option<i32>,
    pub di_id: Option<i32>,
    pub tipo: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::disciplines::Entity",
        from = "Column::DisciplinaId",
        to = "super::disciplines::Column::Id"
    )]
    Discipline,
    #[sea_orm(
        belongs_to = "super::professors::Entity",
        from = "Column::ProfessorId",
        to = "super::professors::Column::Id"
    )]
    Professor,
    #[sea_orm(
        belongs_to = "super::designers::Entity",
        from = "Column::DiId",
        to = "super::designers::Column::Id"
    )]
    Designer,
    #[sea_orm(has_many = "super::video_lessons::Entity")]
    VideoLessons,
}

impl Related<super::disciplines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Discipline.def()
    }
}

impl Related<super::professors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professor.def()
    }
}

impl Related<super::designers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Designer.def()
    }
}

impl Related<super::video_lessons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VideoLessons.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for models::catalog::Offering {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            disciplina_id: model.disciplina_id,
            ano: model.ano,
            bimestre_operacional: model.bimestre_operacional,
            professor_id: model.professor_id,
            di_id: model.di_id,
            tipo: model.tipo,
        }
    }
}

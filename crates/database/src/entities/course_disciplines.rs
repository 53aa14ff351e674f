use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Junction table for the many-to-many relationship between courses and disciplines
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cursos_disciplinas")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub curso_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub disciplina_id: i32,
    pub ano_curso: Option<i32>,
    pub bimestre_pedagogico: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CursoId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::disciplines::Entity",
        from = "Column::DisciplinaId",
        to = "super::disciplines::Column::Id"
    )]
    Discipline,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::disciplines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Discipline.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for models::catalog::CourseDiscipline {
    fn from(model: Model) -> Self {
        Self {
            curso_id: model.curso_id,
            disciplina_id: model.disciplina_id,
            ano_curso: model.ano_curso,
            bimestre_pedagogico: model.bimestre_pedagogico,
        }
    }
}

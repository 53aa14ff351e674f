use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "videoaulas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub oferta_disciplina_id: i32,
    pub semana: Option<i32>,
    pub numero_aula: Option<i32>,
    #[sea_orm(column_type = "Text")]
    pub titulo: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub sinopse: Option<String>,
    pub link_youtube_original: Option<String>,
    pub slides_disponivel: bool,
    pub status: Option<String>,
    pub id_tv_cultura: Option<String>,
    pub duracao_minutos: Option<i32>,
    pub link_libras: Option<String>,
    pub link_audiodescricao: Option<String>,
    pub cc_legenda: bool,
    pub link_download: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::offerings::Entity",
        from = "Column::OfertaDisciplinaId",
        to = "super::offerings::Column::Id"
    )]
    Offering,
}

impl Related<super::offerings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Offering.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for models::catalog::VideoLesson {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            oferta_disciplina_id: model.oferta_disciplina_id,
            semana: model.semana,
            numero_aula: model.numero_aula,
            titulo: model.titulo,
            sinopse: model.sinopse,
            link_youtube_original: model.link_youtube_original,
            slides_disponivel: model.slides_disponivel,
            status: model.status,
            id_tv_cultura: model.id_tv_cultura,
            duracao_minutos: model.duracao_minutos,
            link_libras: model.link_libras,
            link_audiodescricao: model.link_audiodescricao,
            cc_legenda: model.cc_legenda,
            link_download: model.link_download,
        }
    }
}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "historico_importacoes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub tipo: String,
    pub nome_arquivo: String,
    pub total_linhas: i32,
    pub sucessos: i32,
    pub erros: i32,
    pub criado_em: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for models::import::ImportHistory {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            tipo: model.tipo,
            nome_arquivo: model.nome_arquivo,
            total_linhas: model.total_linhas,
            sucessos: model.sucessos,
            erros: model.erros,
            criado_em: model.criado_em,
        }
    }
}

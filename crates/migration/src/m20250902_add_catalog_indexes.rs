use crate::m20250901_create_catalog_tables::{
    CursosDisciplinas, Disciplinas, OfertasDisciplinas, Videoaulas,
};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One offering per discipline, year and operational bimester
        manager
            .create_index(
                Index::create()
                    .name("idx_ofertas_disciplinas_chave")
                    .table(OfertasDisciplinas::Table)
                    .col(OfertasDisciplinas::DisciplinaId)
                    .col(OfertasDisciplinas::Ano)
                    .col(OfertasDisciplinas::BimestreOperacional)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index on videoaulas.oferta_disciplina_id for faster joins
        manager
            .create_index(
                Index::create()
                    .name("idx_videoaulas_oferta_disciplina_id")
                    .table(Videoaulas::Table)
                    .col(Videoaulas::OfertaDisciplinaId)
                    .to_owned(),
            )
            .await?;

        // The junction primary key leads with curso_id, so index the other side
        manager
            .create_index(
                Index::create()
                    .name("idx_cursos_disciplinas_disciplina_id")
                    .table(CursosDisciplinas::Table)
                    .col(CursosDisciplinas::DisciplinaId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_disciplinas_nome")
                    .table(Disciplinas::Table)
                    .col(Disciplinas::Nome)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_disciplinas_nome",
            "idx_cursos_disciplinas_disciplina_id",
            "idx_videoaulas_oferta_disciplina_id",
            "idx_ofertas_disciplinas_chave",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}

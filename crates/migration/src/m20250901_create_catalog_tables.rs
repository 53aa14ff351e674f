use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create cursos table
        manager
            .create_table(
                Table::create()
                    .table(Cursos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cursos::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cursos::Eixo).string().not_null())
                    .col(ColumnDef::new(Cursos::Nome).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Create disciplinas table
        manager
            .create_table(
                Table::create()
                    .table(Disciplinas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Disciplinas::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Disciplinas::Codigo)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Disciplinas::Nome).string().not_null())
                    .col(
                        ColumnDef::new(Disciplinas::CargaHoraria)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // Create cursos_disciplinas junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(CursosDisciplinas::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CursosDisciplinas::CursoId).integer().not_null())
                    .col(
                        ColumnDef::new(CursosDisciplinas::DisciplinaId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CursosDisciplinas::AnoCurso).integer())
                    .col(ColumnDef::new(CursosDisciplinas::BimestrePedagogico).integer())
                    .primary_key(
                        Index::create()
                            .col(CursosDisciplinas::CursoId)
                            .col(CursosDisciplinas::DisciplinaId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cursos_disciplinas-curso_id")
                            .from(CursosDisciplinas::Table, CursosDisciplinas::CursoId)
                            .to(Cursos::Table, Cursos::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cursos_disciplinas-disciplina_id")
                            .from(CursosDisciplinas::Table, CursosDisciplinas::DisciplinaId)
                            .to(Disciplinas::Table, Disciplinas::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Create professores table
        manager
            .create_table(
                Table::create()
                    .table(Professores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Professores::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Professores::Nome).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Create designers_instrucionais table
        manager
            .create_table(
                Table::create()
                    .table(DesignersInstrucionais::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DesignersInstrucionais::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DesignersInstrucionais::Nome)
                            .string()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create ofertas_disciplinas table
        manager
            .create_table(
                Table::create()
                    .table(OfertasDisciplinas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OfertasDisciplinas::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OfertasDisciplinas::DisciplinaId)
                            .integer()
                            .not_null(),
                    )
                    // Year and bimester are nullable to accept legacy rows
                    .col(ColumnDef::new(OfertasDisciplinas::Ano).integer())
                    .col(ColumnDef::new(OfertasDisciplinas::BimestreOperacional).integer())
                    .col(ColumnDef::new(OfertasDisciplinas::ProfessorId).integer())
                    .col(ColumnDef::new(OfertasDisciplinas::DiId).integer())
                    .col(
                        ColumnDef::new(OfertasDisciplinas::Tipo)
                            .string()
                            .not_null()
                            .default("regular"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-ofertas_disciplinas-disciplina_id")
                            .from(OfertasDisciplinas::Table, OfertasDisciplinas::DisciplinaId)
                            .to(Disciplinas::Table, Disciplinas::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-ofertas_disciplinas-professor_id")
                            .from(OfertasDisciplinas::Table, OfertasDisciplinas::ProfessorId)
                            .to(Professores::Table, Professores::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-ofertas_disciplinas-di_id")
                            .from(OfertasDisciplinas::Table, OfertasDisciplinas::DiId)
                            .to(DesignersInstrucionais::Table, DesignersInstrucionais::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create videoaulas table
        manager
            .create_table(
                Table::create()
                    .table(Videoaulas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Videoaulas::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Videoaulas::OfertaDisciplinaId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Videoaulas::Semana).integer())
                    .col(ColumnDef::new(Videoaulas::NumeroAula).integer())
                    .col(ColumnDef::new(Videoaulas::Titulo).text().not_null())
                    .col(ColumnDef::new(Videoaulas::Sinopse).text())
                    .col(ColumnDef::new(Videoaulas::LinkYoutubeOriginal).string())
                    .col(
                        ColumnDef::new(Videoaulas::SlidesDisponivel)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Videoaulas::Status).string())
                    .col(ColumnDef::new(Videoaulas::IdTvCultura).string())
                    .col(ColumnDef::new(Videoaulas::DuracaoMinutos).integer())
                    .col(ColumnDef::new(Videoaulas::LinkLibras).string())
                    .col(ColumnDef::new(Videoaulas::LinkAudiodescricao).string())
                    .col(
                        ColumnDef::new(Videoaulas::CcLegenda)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Videoaulas::LinkDownload).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-videoaulas-oferta_disciplina_id")
                            .from(Videoaulas::Table, Videoaulas::OfertaDisciplinaId)
                            .to(OfertasDisciplinas::Table, OfertasDisciplinas::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(Videoaulas::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(OfertasDisciplinas::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(DesignersInstrucionais::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Professores::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CursosDisciplinas::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Disciplinas::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Cursos::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
pub(crate) enum Cursos {
    Table,
    Id,
    Eixo,
    Nome,
}

#[derive(Iden)]
pub(crate) enum Disciplinas {
    Table,
    Id,
    Codigo,
    Nome,
    CargaHoraria,
}

#[derive(Iden)]
pub(crate) enum CursosDisciplinas {
    Table,
    CursoId,
    DisciplinaId,
    AnoCurso,
    BimestrePedagogico,
}

#[derive(Iden)]
pub(crate) enum Professores {
    Table,
    Id,
    Nome,
}

#[derive(Iden)]
pub(crate) enum DesignersInstrucionais {
    Table,
    Id,
    Nome,
}

#[derive(Iden)]
pub(crate) enum OfertasDisciplinas {
    Table,
    Id,
    DisciplinaId,
    Ano,
    BimestreOperacional,
    ProfessorId,
    DiId,
    Tipo,
}

#[derive(Iden)]
pub(crate) enum Videoaulas {
    Table,
    Id,
    OfertaDisciplinaId,
    Semana,
    NumeroAula,
    Titulo,
    Sinopse,
    LinkYoutubeOriginal,
    SlidesDisponivel,
    Status,
    IdTvCultura,
    DuracaoMinutos,
    LinkLibras,
    LinkAudiodescricao,
    CcLegenda,
    LinkDownload,
}

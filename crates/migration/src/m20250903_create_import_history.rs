use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HistoricoImportacoes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HistoricoImportacoes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(HistoricoImportacoes::Tipo).string().not_null())
                    .col(
                        ColumnDef::new(HistoricoImportacoes::NomeArquivo)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HistoricoImportacoes::TotalLinhas)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HistoricoImportacoes::Sucessos)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(HistoricoImportacoes::Erros).integer().not_null())
                    .col(
                        ColumnDef::new(HistoricoImportacoes::CriadoEm)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HistoricoImportacoes::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum HistoricoImportacoes {
    Table,
    Id,
    Tipo,
    NomeArquivo,
    TotalLinhas,
    Sucessos,
    Erros,
    CriadoEm,
}

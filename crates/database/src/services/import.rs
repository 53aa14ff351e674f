//! Bulk discipline import
//!
//! Rows are independent: one failing row never stops the others.

use super::ServiceResult;
use crate::{
    error::{ServiceError, StoreError},
    store::{CatalogStore, dedup_ids},
};
use log::{info, warn};
use models::{
    forms::NewDiscipline,
    import::{
        ImportHistory, ImportKind, ImportOutcome, ImportReport, ImportRow, ImportSummary,
        NewImportHistory, parse_discipline_csv,
    },
};
use std::{collections::HashSet, io::Read};

pub struct ImportService;

impl ImportService {
    /// Imports discipline rows, reporting one outcome per row in input order
    ///
    /// Course ids that do not exist are left out of the links and named in
    /// the row's message; the row itself still succeeds. When `nome_arquivo`
    /// is given the totals are recorded in the import history.
    pub async fn import_disciplines(
        store: &dyn CatalogStore,
        rows: Vec<ImportRow>,
        nome_arquivo: Option<&str>,
    ) -> ServiceResult<ImportReport> {
        let known: HashSet<i32> = store.list_courses().await?.iter().map(|c| c.id).collect();

        let mut resultados = Vec::with_capacity(rows.len());
        for row in rows {
            resultados.push(Self::import_row(store, &known, row).await);
        }

        let resumo = ImportSummary::from_outcomes(&resultados);
        info!(
            "Imported disciplines: {} rows, {} succeeded, {} failed",
            resumo.total_linhas, resumo.sucessos, resumo.erros
        );

        let historico = match nome_arquivo.map(str::trim).filter(|n| !n.is_empty()) {
            Some(nome_arquivo) => Self::record(store, nome_arquivo, resumo).await,
            None => None,
        };

        Ok(ImportReport {
            resultados,
            resumo,
            historico,
        })
    }

    /// Parses CSV text and imports its rows
    pub async fn import_discipline_csv<R: Read>(
        store: &dyn CatalogStore,
        reader: R,
        nome_arquivo: Option<&str>,
    ) -> ServiceResult<ImportReport> {
        let rows =
            parse_discipline_csv(reader).map_err(|e| ServiceError::Validation(e.to_string()))?;
        Self::import_disciplines(store, rows, nome_arquivo).await
    }

    pub async fn history(store: &dyn CatalogStore) -> ServiceResult<Vec<ImportHistory>> {
        Ok(store.list_import_history().await?)
    }

    async fn import_row(
        store: &dyn CatalogStore,
        known: &HashSet<i32>,
        row: ImportRow,
    ) -> ImportOutcome {
        let codigo = row.codigo.trim().to_string();
        let nome = row.nome.trim().to_string();
        if codigo.is_empty() || nome.is_empty() {
            return ImportOutcome::error(codigo, "Código e nome são obrigatórios");
        }

        let requested = dedup_ids(row.cursos.as_deref().unwrap_or_default());
        let (valid, ignored): (Vec<i32>, Vec<i32>) =
            requested.into_iter().partition(|id| known.contains(id));

        let discipline = NewDiscipline {
            codigo: codigo.clone(),
            nome,
            carga_horaria: 0,
        };

        match store.insert_discipline(&discipline, &valid).await {
            Ok(_) if ignored.is_empty() => {
                ImportOutcome::success(codigo, "Disciplina importada com sucesso")
            }
            Ok(_) => {
                let ignored = ignored
                    .iter()
                    .map(i32::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                warn!("Discipline {codigo} imported without unknown courses {ignored}");
                ImportOutcome::success(
                    codigo,
                    format!("Disciplina importada; cursos inexistentes ignorados: {ignored}"),
                )
            }
            Err(StoreError::Conflict { .. }) => {
                ImportOutcome::error(codigo, "Já existe uma disciplina com este código")
            }
            Err(err) => ImportOutcome::error(codigo, err.to_string()),
        }
    }

    /// A history failure is logged; the rows are already written by then
    async fn record(
        store: &dyn CatalogStore,
        nome_arquivo: &str,
        summary: ImportSummary,
    ) -> Option<ImportHistory> {
        let history = NewImportHistory {
            tipo: ImportKind::Disciplinas,
            nome_arquivo: nome_arquivo.to_string(),
            summary,
        };

        match store.insert_import_history(&history).await {
            Ok(saved) => Some(saved),
            Err(err) => {
                warn!("Failed to record import history for {nome_arquivo}: {err}");
                None
            }
        }
    }
}

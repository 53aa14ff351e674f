pub mod util;

use database::{
    error::ServiceError,
    services::ImportService,
    store::CatalogStore,
};
use models::import::ImportReport;
use std::{fs::File, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImporterError {
    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write results: {0}")]
    Write(#[from] csv::Error),

    #[error("failed to connect: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Import(#[from] ServiceError),
}

/// Imports the disciplines of a CSV file, recording it under its file name
pub async fn import_file(
    store: &dyn CatalogStore,
    path: &Path,
) -> Result<ImportReport, ImporterError> {
    let file = File::open(path).map_err(|source| ImporterError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let nome_arquivo = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    Ok(ImportService::import_discipline_csv(store, file, nome_arquivo.as_deref()).await?)
}

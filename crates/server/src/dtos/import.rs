use models::import::ImportRow;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Rows to import as disciplines
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DisciplineImportRequest {
    pub disciplinas: Vec<ImportRow>,
    /// File the rows came from; when present the import is recorded
    #[serde(default)]
    pub nome_arquivo: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CsvImportQuery {
    pub nome_arquivo: Option<String>,
}

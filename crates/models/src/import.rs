use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use std::io::Read;
use strum::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Template offered to admins before a discipline import
pub const DISCIPLINE_TEMPLATE: &str = "codigo,nome,cursos
MAT001,Matemática Básica,\"1,2\"
FIS001,Física I,3
QUI001,Química Geral,\"1,3\"
";

/// Accepted header names for each column, first match wins
const CODE_HEADERS: [&str; 2] = ["codigo", "Código"];
const NAME_HEADERS: [&str; 2] = ["nome", "Nome"];
const COURSES_HEADERS: [&str; 2] = ["cursos", "Cursos (IDs)"];

/// One discipline to import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ImportRow {
    pub codigo: String,
    pub nome: String,
    #[serde(default)]
    pub cursos: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ImportStatus {
    Success,
    Error,
}

/// Result of importing a single row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ImportOutcome {
    pub codigo: String,
    pub status: ImportStatus,
    pub message: String,
}

impl ImportOutcome {
    pub fn success(codigo: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            codigo: codigo.into(),
            status: ImportStatus::Success,
            message: message.into(),
        }
    }

    pub fn error(codigo: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            codigo: codigo.into(),
            status: ImportStatus::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ImportStatus::Success
    }
}

/// Kind of data an import brought in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ImportKind {
    Disciplinas,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub total_linhas: u64,
    pub sucessos: u64,
    pub erros: u64,
}

impl ImportSummary {
    pub fn from_outcomes(outcomes: &[ImportOutcome]) -> Self {
        let sucessos = outcomes.iter().filter(|o| o.is_success()).count() as u64;
        let total_linhas = outcomes.len() as u64;

        Self {
            total_linhas,
            sucessos,
            erros: total_linhas - sucessos,
        }
    }
}

/// A persisted record of a past import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ImportHistory {
    pub id: i32,
    pub tipo: String,
    pub nome_arquivo: String,
    pub total_linhas: i32,
    pub sucessos: i32,
    pub erros: i32,
    pub criado_em: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImportHistory {
    pub tipo: ImportKind,
    pub nome_arquivo: String,
    pub summary: ImportSummary,
}

/// Per-row results of an import together with its totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ImportReport {
    pub resultados: Vec<ImportOutcome>,
    pub resumo: ImportSummary,
    /// Present when the import was recorded in the history
    pub historico: Option<ImportHistory>,
}

#[derive(Debug, Error)]
pub enum CsvImportError {
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("Malformed CSV: {0}")]
    Malformed(#[from] csv::Error),
}

/// Parses a list of course ids such as `"1,2"` or `"1; 3"`
///
/// Each piece keeps its leading integer, so `"12abc"` reads as 12. Pieces
/// without leading digits are dropped.
pub fn parse_course_ids(text: &str) -> Vec<i32> {
    text.split([',', ';']).filter_map(leading_int).collect()
}

/// Reads an optionally signed run of digits at the start of `piece`
fn leading_int(piece: &str) -> Option<i32> {
    let piece = piece.trim();
    let sign_len = usize::from(piece.starts_with(['+', '-']));
    let digits = piece[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(piece.len() - sign_len);
    if digits == 0 {
        return None;
    }
    piece[..sign_len + digits].parse().ok()
}

/// Finds the index of the first header matching any of the accepted names
fn column_index(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let header = header.trim_start_matches('\u{feff}').trim();
        names.iter().any(|name| header == *name)
    })
}

/// Reads discipline rows from CSV text with a header line
///
/// Rows without a code or a name are skipped. An empty course column yields
/// `cursos: None`.
pub fn parse_discipline_csv<R: Read>(reader: R) -> Result<Vec<ImportRow>, CsvImportError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let code_idx = column_index(&headers, &CODE_HEADERS)
        .ok_or(CsvImportError::MissingColumn("codigo"))?;
    let name_idx =
        column_index(&headers, &NAME_HEADERS).ok_or(CsvImportError::MissingColumn("nome"))?;
    let courses_idx = column_index(&headers, &COURSES_HEADERS);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;

        let codigo = record.get(code_idx).unwrap_or_default();
        let nome = record.get(name_idx).unwrap_or_default();
        if codigo.is_empty() || nome.is_empty() {
            continue;
        }

        let cursos = courses_idx
            .and_then(|idx| record.get(idx))
            .filter(|text| !text.is_empty())
            .map(parse_course_ids);

        rows.push(ImportRow {
            codigo: codigo.to_string(),
            nome: nome.to_string(),
            cursos,
        });
    }

    Ok(rows)
}

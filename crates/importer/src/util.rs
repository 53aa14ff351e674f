use csv::Writer;
use models::import::{ImportOutcome, ImportReport};
use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

/// Output directory for result files
pub const DEFAULT_OUTPUT_DIR: &str = "./data/output";

/// Result file columns
const CSV_HEADERS: [&str; 3] = ["codigo", "status", "mensagem"];

/// Ensures a directory exists, creating it if necessary
pub fn ensure_dir(dir_path: &Path) -> io::Result<()> {
    if !dir_path.exists() {
        fs::create_dir_all(dir_path)?;
    }

    Ok(())
}

/// Where the per-row results of importing `input` are written
///
/// `disciplinas.csv` becomes `<output_dir>/disciplinas_resultados.csv`.
pub fn results_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "importacao".to_string());

    output_dir.join(format!("{stem}_resultados.csv"))
}

/// Writes one CSV record per outcome, after a header line
pub fn write_outcomes<W: Write>(writer: W, outcomes: &[ImportOutcome]) -> csv::Result<()> {
    let mut writer = Writer::from_writer(writer);
    writer.write_record(CSV_HEADERS)?;

    for outcome in outcomes {
        writer.write_record([
            outcome.codigo.as_str(),
            outcome.status.as_ref(),
            outcome.message.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Creates the results file for `input` and fills it
pub fn save_outcomes(
    output_dir: &Path,
    input: &Path,
    report: &ImportReport,
) -> csv::Result<PathBuf> {
    ensure_dir(output_dir)?;

    let path = results_path(output_dir, input);
    let file = File::create(&path)?;
    write_outcomes(file, &report.resultados)?;

    Ok(path)
}

/// One-line totals for the console
pub fn summary_line(report: &ImportReport) -> String {
    let resumo = report.resumo;
    format!(
        "{} rows: {} imported, {} failed",
        resumo.total_linhas, resumo.sucessos, resumo.erros
    )
}
